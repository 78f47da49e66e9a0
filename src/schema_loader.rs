//! Loads the dictionary schema tables from disk.
//!
//! A schema directory holds the three tab-separated exports the taxonomy is
//! built from: `fields.tsv`, `categories.tsv`, and `catbrowse.tsv` (the
//! parent/child hierarchy). Each table carries a header row and typically
//! many more columns than the taxonomy needs; deserialization picks out the
//! named columns and ignores the rest.

use crate::taxonomy::model::{CategoryRow, FieldRow, HierarchyRow, SchemaTables};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// File name of the fields table inside a schema directory.
pub const FIELDS_TABLE: &str = "fields.tsv";
/// File name of the categories table inside a schema directory.
pub const CATEGORIES_TABLE: &str = "categories.tsv";
/// File name of the hierarchy table inside a schema directory.
pub const HIERARCHY_TABLE: &str = "catbrowse.tsv";

/// Read all three schema tables from `dir`.
///
/// Any missing file or malformed row is an error with the table path
/// attached; nothing is retried and no partial snapshot is returned.
pub fn load_tables(dir: &Path) -> Result<SchemaTables> {
    Ok(SchemaTables {
        fields: load_table::<FieldRow>(&dir.join(FIELDS_TABLE))?,
        categories: load_table::<CategoryRow>(&dir.join(CATEGORIES_TABLE))?,
        hierarchy: load_table::<HierarchyRow>(&dir.join(HIERARCHY_TABLE))?,
    })
}

/// Read one tab-separated table into typed rows.
///
/// Empty cells deserialize to `None` for `Option` columns, and columns not
/// named by the row type are skipped. Row errors carry the 1-based line
/// number (header is line 1) so a bad export is easy to locate.
pub fn load_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("opening schema table {}", path.display()))?;

    let mut rows = Vec::new();
    for (idx, record) in reader.deserialize().enumerate() {
        let row: T = record
            .with_context(|| format!("parsing {} line {}", path.display(), idx + 2))?;
        rows.push(row);
    }
    Ok(rows)
}
