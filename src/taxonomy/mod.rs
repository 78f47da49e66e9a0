//! Dictionary taxonomy wiring.
//!
//! This module turns the flat schema tables (fields, categories, hierarchy)
//! into a queryable taxonomy. Types in `model` mirror the table columns;
//! callers use `CategoryIndex` for title resolution and descent.

pub mod index;
pub mod model;

pub use index::CategoryIndex;
pub use model::{CategoryRow, FieldRow, HierarchyRow, SchemaTables};
