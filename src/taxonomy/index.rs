//! Indexed view of the dictionary taxonomy.
//!
//! The index collapses the three schema tables into lookup maps at
//! construction time and answers every query from those maps. It never
//! mutates after construction, so shared references are safe to hand to
//! multiple readers.

use crate::schema_loader::load_tables;
use crate::taxonomy::model::{HierarchyRow, SchemaTables};
use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug)]
/// Derived lookup maps over the fields, categories, and hierarchy tables.
pub struct CategoryIndex {
    title_map: BTreeMap<String, i64>,
    subcategory_map: BTreeMap<i64, Vec<i64>>,
    field_map: BTreeMap<i64, Vec<i64>>,
}

impl CategoryIndex {
    /// Load the schema tables from `schema_dir` and build the index.
    ///
    /// Loader failures (missing table, malformed row) propagate unchanged;
    /// the index itself never fails to build from tables it is given.
    pub fn load(schema_dir: &Path) -> Result<Self> {
        let tables = load_tables(schema_dir)
            .with_context(|| format!("loading schema tables from {}", schema_dir.display()))?;
        Ok(Self::from_tables(&tables))
    }

    /// Build the three lookup maps from an in-memory table snapshot.
    ///
    /// Title keys are lowercased; rows with an empty title are skipped, and
    /// on duplicate titles the last row wins. Children are grouped under
    /// their parent ordered by `showcase_order`. Fields keep the row order
    /// of the fields table within each category.
    pub fn from_tables(tables: &SchemaTables) -> Self {
        let mut title_map = BTreeMap::new();
        for category in &tables.categories {
            if let Some(title) = &category.title {
                title_map.insert(title.to_lowercase(), category.category_id);
            }
        }

        // Stable sort on (parent, showcase_order), then group; sibling order
        // inside each bucket is exactly the showcase order.
        let mut edges: Vec<&HierarchyRow> = tables.hierarchy.iter().collect();
        edges.sort_by_key(|edge| (edge.parent_id, edge.showcase_order));
        let mut subcategory_map: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
        for edge in edges {
            subcategory_map
                .entry(edge.parent_id)
                .or_default()
                .push(edge.child_id);
        }

        let mut field_map: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
        for field in &tables.fields {
            field_map
                .entry(field.main_category)
                .or_default()
                .push(field.field_id);
        }

        Self {
            title_map,
            subcategory_map,
            field_map,
        }
    }

    /// Resolve a category title to its id, case-insensitively.
    ///
    /// Returns `-1` for unknown titles instead of erroring; callers surface
    /// the miss with whatever context referenced the title.
    pub fn id_by_title(&self, title: &str) -> i64 {
        self.title_map
            .get(&title.to_lowercase())
            .copied()
            .unwrap_or(-1)
    }

    /// Direct children of a category in showcase order, if it has any.
    pub fn children(&self, category_id: i64) -> Option<&[i64]> {
        self.subcategory_map
            .get(&category_id)
            .map(Vec::as_slice)
    }

    /// All categories reachable from `start_id`, including `start_id`
    /// itself, in pre-order with siblings in showcase order.
    ///
    /// The walk is an explicit-stack DFS with NO visited guard: if the
    /// hierarchy table contains a cycle reachable from `start_id`, this loop
    /// never terminates. The shipped tables are acyclic; callers that cannot
    /// trust their input should use [`descendants_bounded`] instead.
    ///
    /// An id absent from the hierarchy is treated as a leaf, so unknown ids
    /// yield `[start_id]` rather than an error.
    ///
    /// [`descendants_bounded`]: CategoryIndex::descendants_bounded
    pub fn descendants(&self, start_id: i64) -> Vec<i64> {
        let mut visited = Vec::new();
        let mut stack = vec![start_id];

        while let Some(current) = stack.pop() {
            visited.push(current);
            if let Some(children) = self.subcategory_map.get(&current) {
                // Reversed so the first child pops first.
                stack.extend(children.iter().rev());
            }
        }

        visited
    }

    /// Bounded variant of [`descendants`](CategoryIndex::descendants).
    ///
    /// Visits nodes in the same order but fails once more than `max_steps`
    /// nodes have been visited with work still queued, which turns a cyclic
    /// hierarchy into an error instead of a hang.
    pub fn descendants_bounded(&self, start_id: i64, max_steps: usize) -> Result<Vec<i64>> {
        let mut visited = Vec::new();
        let mut stack = vec![start_id];

        while let Some(current) = stack.pop() {
            if visited.len() >= max_steps {
                bail!(
                    "descendant walk from category {start_id} exceeded {max_steps} steps; \
                     the hierarchy likely contains a cycle"
                );
            }
            visited.push(current);
            if let Some(children) = self.subcategory_map.get(&current) {
                stack.extend(children.iter().rev());
            }
        }

        Ok(visited)
    }

    /// Every field id under `start_id` and all of its descendant categories.
    ///
    /// Concatenates the per-category field lists in descendant order without
    /// deduplication, so a field reachable twice appears twice.
    pub fn fields_under(&self, start_id: i64) -> Vec<i64> {
        let mut all_fields = Vec::new();
        for category_id in self.descendants(start_id) {
            if let Some(fields) = self.field_map.get(&category_id) {
                all_fields.extend_from_slice(fields);
            }
        }
        all_fields
    }

    /// Resolve a title straight to the field ids beneath it.
    ///
    /// An unknown title is non-fatal: a warning goes to stderr and the
    /// result is empty.
    pub fn fields_by_title(&self, title: &str) -> Vec<i64> {
        let category_id = self.id_by_title(title);
        if category_id == -1 {
            eprintln!("warning: category '{title}' not found in dictionary");
            return Vec::new();
        }
        self.fields_under(category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::model::{CategoryRow, FieldRow};

    fn field(field_id: i64, main_category: i64) -> FieldRow {
        FieldRow {
            field_id,
            main_category,
            title: None,
        }
    }

    fn category(category_id: i64, title: Option<&str>) -> CategoryRow {
        CategoryRow {
            category_id,
            title: title.map(str::to_string),
        }
    }

    fn edge(parent_id: i64, child_id: i64, showcase_order: i64) -> HierarchyRow {
        HierarchyRow {
            parent_id,
            child_id,
            showcase_order,
        }
    }

    fn sample_index() -> CategoryIndex {
        CategoryIndex::from_tables(&SchemaTables {
            fields: vec![field(101, 5), field(102, 5), field(103, 7)],
            categories: vec![
                category(5, Some("Imaging")),
                category(7, Some("Brain MRI")),
                category(3, Some("Heart MRI")),
                category(9, None),
            ],
            hierarchy: vec![edge(5, 9, 3), edge(5, 7, 1), edge(5, 3, 2)],
        })
    }

    #[test]
    fn title_lookup_is_case_insensitive() {
        let index = sample_index();
        assert_eq!(index.id_by_title("Imaging"), 5);
        assert_eq!(index.id_by_title("imaging"), 5);
        assert_eq!(index.id_by_title("IMAGING"), 5);
        assert_eq!(index.id_by_title("Brain MRI"), index.id_by_title("BRAIN mri"));
    }

    #[test]
    fn unknown_title_returns_sentinel() {
        let index = sample_index();
        assert_eq!(index.id_by_title("nonexistent"), -1);
        assert_eq!(index.id_by_title(""), -1);
    }

    #[test]
    fn null_titles_never_resolve() {
        // Category 9 has no title; nothing should map to it.
        let index = sample_index();
        assert_eq!(index.id_by_title(""), -1);
        assert!(index.children(9).is_none());
        assert_eq!(index.descendants(9), vec![9]);
    }

    #[test]
    fn duplicate_titles_last_row_wins() {
        let index = CategoryIndex::from_tables(&SchemaTables {
            fields: Vec::new(),
            categories: vec![
                category(1, Some("Imaging")),
                category(2, Some("IMAGING")),
                category(3, Some("imaging")),
            ],
            hierarchy: Vec::new(),
        });
        assert_eq!(index.id_by_title("imaging"), 3);
    }

    #[test]
    fn descendants_starts_with_start_id() {
        let index = sample_index();
        assert_eq!(index.descendants(5)[0], 5);
        assert_eq!(index.descendants(42), vec![42]);
    }

    #[test]
    fn descendants_follows_showcase_order() {
        // Edges arrive out of order; showcase_order 1,2,3 maps to 7,3,9.
        let index = sample_index();
        assert_eq!(index.descendants(5), vec![5, 7, 3, 9]);
        assert_eq!(index.children(5), Some(&[7, 3, 9][..]));
    }

    #[test]
    fn descendants_is_preorder_across_depths() {
        let index = CategoryIndex::from_tables(&SchemaTables {
            fields: Vec::new(),
            categories: Vec::new(),
            hierarchy: vec![
                edge(1, 2, 1),
                edge(1, 3, 2),
                edge(2, 4, 1),
                edge(2, 5, 2),
                edge(3, 6, 1),
            ],
        });
        assert_eq!(index.descendants(1), vec![1, 2, 4, 5, 3, 6]);
    }

    #[test]
    fn bounded_walk_matches_unbounded_on_acyclic_input() {
        let index = sample_index();
        let bounded = index.descendants_bounded(5, 100).unwrap();
        assert_eq!(bounded, index.descendants(5));
    }

    #[test]
    fn bounded_walk_trips_on_cycle() {
        // 1 -> 2 -> 1. The unguarded walk would never terminate here; the
        // bounded variant must report the budget instead.
        let index = CategoryIndex::from_tables(&SchemaTables {
            fields: Vec::new(),
            categories: Vec::new(),
            hierarchy: vec![edge(1, 2, 1), edge(2, 1, 1)],
        });
        let err = index.descendants_bounded(1, 64).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("64 steps"), "unexpected error: {message}");
        assert!(message.contains("category 1"), "unexpected error: {message}");
    }

    #[test]
    fn fields_under_concatenates_in_descendant_order() {
        let index = CategoryIndex::from_tables(&SchemaTables {
            fields: vec![field(101, 5), field(102, 5), field(103, 7)],
            categories: Vec::new(),
            hierarchy: vec![edge(5, 7, 1)],
        });
        assert_eq!(index.fields_under(5), vec![101, 102, 103]);
    }

    #[test]
    fn fields_under_length_matches_per_category_sum() {
        let index = sample_index();
        let expected: usize = index
            .descendants(5)
            .iter()
            .map(|id| index.field_map.get(id).map_or(0, Vec::len))
            .sum();
        assert_eq!(index.fields_under(5).len(), expected);
    }

    #[test]
    fn fields_under_unknown_category_is_empty() {
        let index = sample_index();
        assert!(index.fields_under(999).is_empty());
    }

    #[test]
    fn fields_by_title_resolves_and_collects() {
        let index = sample_index();
        assert_eq!(index.fields_by_title("imaging"), vec![101, 102, 103]);
        assert_eq!(index.fields_by_title("Brain MRI"), vec![103]);
    }

    #[test]
    fn fields_by_title_unknown_is_empty_not_error() {
        let index = sample_index();
        assert!(index.fields_by_title("unknown title").is_empty());
    }
}
