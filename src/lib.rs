//! Shared library for the dictionary navigation helpers.
//!
//! The crate exposes the taxonomy index built from the three dictionary
//! schema tables (fields, categories, hierarchy) together with the loaders
//! and scanning utilities the helper binaries depend on: schema-table
//! loading, project-root discovery, and the export column scan.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod column_scan;
pub mod schema_loader;
pub mod taxonomy;

pub use column_scan::columns_containing;
pub use schema_loader::{
    CATEGORIES_TABLE, FIELDS_TABLE, HIERARCHY_TABLE, load_table, load_tables,
};
pub use taxonomy::{CategoryIndex, CategoryRow, FieldRow, HierarchyRow, SchemaTables};

const ROOT_MARKER: &str = "Cargo.toml";
const SCHEMA_DIR: &str = "data/schema";

/// Returns true when `candidate` looks like the project root.
fn is_project_root(candidate: &Path) -> bool {
    candidate.join(ROOT_MARKER).is_file()
}

/// Climb from `start` toward the filesystem root looking for the marker.
pub fn find_root_from(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_project_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the project root holding the schema data.
///
/// Honors `DICTNAV_ROOT` when it points at a directory with the marker file,
/// then falls back to climbing up from the current executable. Callers can
/// treat failure as fatal; the binaries cannot find their default schema
/// directory without a root.
pub fn find_project_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("DICTNAV_ROOT") {
        let hinted = PathBuf::from(&env_root);
        if hinted.exists() && is_project_root(&hinted) {
            if let Ok(canonical) = fs::canonicalize(hinted) {
                return Ok(canonical);
            }
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = find_root_from(exe_dir) {
                return Ok(root);
            }
        }
    }

    bail!("Unable to locate the project root. Set DICTNAV_ROOT to the checkout directory.");
}

/// Default schema directory under a project root.
pub fn default_schema_dir(root: &Path) -> PathBuf {
    root.join(SCHEMA_DIR)
}
