//! Substring scan over the columns of a wide tabular export.
//!
//! Participant exports fan one measurement out over many instance/array
//! columns sharing a name prefix (for example `s1t3_a0`, `s1t3_a1`, ...).
//! The scan reports which of those columns mention a target string anywhere,
//! so callers can narrow a bulk export to the columns that matter without
//! loading it into a frame library.

use anyhow::{Context, Result, anyhow};
use std::path::Path;

/// Names of the prefixed columns in `path` whose cells contain `target`.
///
/// Only columns whose header starts with `column_prefix` are scanned; other
/// columns (participant id and the like) are ignored, as are empty cells.
/// Column names appear in header order, each at most once.
pub fn columns_containing(path: &Path, column_prefix: &str, target: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("opening export table {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?;
    let scanned: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| name.starts_with(column_prefix))
        .map(|(idx, name)| (idx, name.to_string()))
        .collect();
    if scanned.is_empty() {
        return Err(anyhow!(
            "no columns starting with '{}' in {}",
            column_prefix,
            path.display()
        ));
    }

    let mut hit = vec![false; scanned.len()];
    for (row_idx, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("reading {} line {}", path.display(), row_idx + 2))?;
        for (slot, (col_idx, _)) in scanned.iter().enumerate() {
            if hit[slot] {
                continue;
            }
            if let Some(cell) = record.get(*col_idx) {
                if !cell.is_empty() && cell.contains(target) {
                    hit[slot] = true;
                }
            }
        }
        if hit.iter().all(|found| *found) {
            break;
        }
    }

    Ok(scanned
        .into_iter()
        .zip(hit)
        .filter(|(_, found)| *found)
        .map(|((_, name), _)| name)
        .collect())
}
