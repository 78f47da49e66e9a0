//! Deserializable representations of the dictionary schema tables.
//!
//! The types mirror the columns the taxonomy logic needs; source tables carry
//! many more columns, which the loader ignores. Use `CategoryIndex` for
//! lookups; use these structs when the raw table rows are required.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// One row of the fields table: a data field attached to its owning category.
pub struct FieldRow {
    pub field_id: i64,
    pub main_category: i64,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
/// One row of the categories table.
///
/// `title` is `None` when the source cell is empty; such rows never enter the
/// title lookup.
pub struct CategoryRow {
    pub category_id: i64,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
/// One parent→child edge of the category hierarchy table.
///
/// `showcase_order` fixes the display order among siblings; the index sorts
/// on it when grouping children under a parent.
pub struct HierarchyRow {
    pub parent_id: i64,
    pub child_id: i64,
    pub showcase_order: i64,
}

#[derive(Clone, Debug, Default)]
/// Immutable snapshot of the three schema tables a `CategoryIndex` is built
/// from.
pub struct SchemaTables {
    pub fields: Vec<FieldRow>,
    pub categories: Vec<CategoryRow>,
    pub hierarchy: Vec<HierarchyRow>,
}
