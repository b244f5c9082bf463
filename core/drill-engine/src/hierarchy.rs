//! FILENAME: core/drill-engine/src/hierarchy.rs
//! Hierarchy Builder - Groups flat rows into an aggregated tree.
//!
//! Algorithm:
//! 1. Partition the rows by the label of the current dimension field,
//!    keeping the order in which each label is first seen
//! 2. Recurse into every partition with the remaining dimension fields
//! 3. Aggregate bottom-up: terminal groups sum their own rows, inner groups
//!    sum their children
//!
//! The builder is a pure function. It is run once per data update; toggling
//! groups never rebuilds the tree.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::expansion::NodeId;
use crate::log_debug;
use crate::source::{group_label, measure_value, Row};

// ============================================================================
// GROUP NODE
// ============================================================================

/// One aggregated group at one level of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupNode {
    /// The dimension value shared by every row in the group (or the blank label).
    pub name: String,

    /// Depth in the tree (0 = root level), equal to the dimension index.
    pub level: usize,

    /// Sum of the measure over every row under this group.
    pub value: f64,

    /// Number of source rows under this group.
    pub row_count: usize,

    /// Groups formed by the next dimension field, in first-seen order.
    pub children: Vec<GroupNode>,
}

impl GroupNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// ============================================================================
// BUILD
// ============================================================================

/// Builds the group tree for `rows`, grouping by `dimension_fields` in order
/// and summing `measure_field`. Empty rows or no dimensions give an empty tree.
pub fn build_hierarchy(
    rows: &[Row],
    dimension_fields: &[String],
    measure_field: &str,
) -> Vec<GroupNode> {
    let all: Vec<&Row> = rows.iter().collect();
    let tree = build_level(&all, dimension_fields, 0, measure_field);

    log_debug!(
        "TREE",
        "built {} root groups from {} rows over {} dimensions",
        tree.len(),
        rows.len(),
        dimension_fields.len()
    );

    tree
}

/// Recursively builds one level of the tree.
fn build_level(
    rows: &[&Row],
    dimension_fields: &[String],
    level: usize,
    measure_field: &str,
) -> Vec<GroupNode> {
    let Some(field) = dimension_fields.get(level) else {
        return Vec::new();
    };

    // Label -> slot in `partitions`; the Vec keeps first-seen order.
    let mut slots: FxHashMap<String, usize> = FxHashMap::default();
    let mut partitions: Vec<(String, Vec<&Row>)> = Vec::new();

    for &row in rows {
        let label = group_label(row, field);
        match slots.get(&label) {
            Some(&slot) => partitions[slot].1.push(row),
            None => {
                slots.insert(label.clone(), partitions.len());
                partitions.push((label, vec![row]));
            }
        }
    }

    partitions
        .into_iter()
        .map(|(name, members)| {
            let children = build_level(&members, dimension_fields, level + 1, measure_field);
            let value = if children.is_empty() {
                members.iter().map(|row| measure_value(row, measure_field)).sum()
            } else {
                children.iter().map(|child| child.value).sum()
            };

            GroupNode {
                name,
                level,
                value,
                row_count: members.len(),
                children,
            }
        })
        .collect()
}

// ============================================================================
// LOOKUP
// ============================================================================

/// Resolves a positional id to the node it addresses in `tree`.
pub fn find_node<'a>(tree: &'a [GroupNode], id: &NodeId) -> Option<&'a GroupNode> {
    let (first, rest) = id.path().split_first()?;
    let mut node = tree.get(*first)?;
    for &index in rest {
        node = node.children.get(index)?;
    }
    Some(node)
}

/// Sum of the root values, i.e. the grand total of the measure.
pub fn tree_total(tree: &[GroupNode]) -> f64 {
    tree.iter().map(|node| node.value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{CellValue, DataCell};

    fn row(pairs: &[(&str, CellValue)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), DataCell::new(v.clone())))
            .collect()
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn create_test_rows() -> Vec<Row> {
        vec![
            row(&[("region", "East".into()), ("product", "A".into()), ("sales", CellValue::Number(10.0))]),
            row(&[("region", "East".into()), ("product", "B".into()), ("sales", CellValue::Number(5.0))]),
            row(&[("region", "West".into()), ("product", "A".into()), ("sales", CellValue::Number(7.0))]),
        ]
    }

    fn assert_consistent(nodes: &[GroupNode], expected_level: usize) {
        for node in nodes {
            assert_eq!(node.level, expected_level);
            if node.has_children() {
                let child_sum: f64 = node.children.iter().map(|c| c.value).sum();
                assert_eq!(node.value, child_sum, "group {} must equal its children", node.name);
                let child_rows: usize = node.children.iter().map(|c| c.row_count).sum();
                assert_eq!(node.row_count, child_rows);
                assert_consistent(&node.children, expected_level + 1);
            }
        }
    }

    #[test]
    fn test_single_dimension() {
        let tree = build_hierarchy(&create_test_rows(), &fields(&["region"]), "sales");

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "East");
        assert_eq!(tree[0].value, 15.0);
        assert!(tree[0].is_leaf());
        assert_eq!(tree[1].name, "West");
        assert_eq!(tree[1].value, 7.0);
    }

    #[test]
    fn test_two_dimensions() {
        let tree = build_hierarchy(&create_test_rows(), &fields(&["region", "product"]), "sales");

        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].name, "A");
        assert_eq!(tree[0].children[0].value, 10.0);
        assert_eq!(tree[0].children[1].name, "B");
        assert_eq!(tree[0].children[1].value, 5.0);
        assert_eq!(tree[1].children.len(), 1);
        assert_consistent(&tree, 0);
    }

    #[test]
    fn test_first_seen_order_is_kept() {
        let rows = vec![
            row(&[("year", CellValue::Number(2020.0)), ("sales", CellValue::Number(1.0))]),
            row(&[("year", CellValue::Number(2019.0)), ("sales", CellValue::Number(2.0))]),
            row(&[("year", CellValue::Number(2020.0)), ("sales", CellValue::Number(3.0))]),
            row(&[("year", CellValue::Number(2018.0)), ("sales", CellValue::Number(4.0))]),
        ];
        let tree = build_hierarchy(&rows, &fields(&["year"]), "sales");

        let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["2020", "2019", "2018"]);
        assert_eq!(tree[0].value, 4.0);
    }

    #[test]
    fn test_missing_value_groups_under_blank() {
        let mut rows = create_test_rows();
        rows.push(row(&[("sales", CellValue::Number(3.0))]));
        rows.push(row(&[("region", CellValue::Empty), ("sales", CellValue::Number(2.0))]));

        let tree = build_hierarchy(&rows, &fields(&["region"]), "sales");

        assert_eq!(tree.len(), 3);
        assert_eq!(tree[2].name, crate::definition::BLANK_LABEL);
        assert_eq!(tree[2].value, 5.0);
        assert_eq!(tree[2].row_count, 2);
    }

    #[test]
    fn test_non_numeric_measure_counts_as_zero() {
        let rows = vec![
            row(&[("region", "East".into()), ("sales", "oops".into())]),
            row(&[("region", "East".into())]),
            row(&[("region", "East".into()), ("sales", CellValue::Number(4.0))]),
        ];
        let tree = build_hierarchy(&rows, &fields(&["region"]), "sales");

        assert_eq!(tree[0].value, 4.0);
        assert_eq!(tree[0].row_count, 3);
    }

    #[test]
    fn test_totals_match_source() {
        let rows = create_test_rows();
        let tree = build_hierarchy(&rows, &fields(&["region", "product"]), "sales");
        let source_total: f64 = rows.iter().map(|r| measure_value(r, "sales")).sum();

        assert_eq!(tree_total(&tree), source_total);
    }

    #[test]
    fn test_build_is_idempotent() {
        let rows = create_test_rows();
        let dims = fields(&["region", "product"]);

        let first = build_hierarchy(&rows, &dims, "sales");
        let second = build_hierarchy(&rows.clone(), &dims, "sales");
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(build_hierarchy(&[], &fields(&["region"]), "sales").is_empty());
        assert!(build_hierarchy(&create_test_rows(), &[], "sales").is_empty());
    }

    #[test]
    fn test_find_node() {
        let tree = build_hierarchy(&create_test_rows(), &fields(&["region", "product"]), "sales");

        let b: NodeId = "0-1".parse().unwrap();
        assert_eq!(find_node(&tree, &b).map(|n| n.name.as_str()), Some("B"));

        let west: NodeId = "1".parse().unwrap();
        assert_eq!(find_node(&tree, &west).map(|n| n.value), Some(7.0));

        let missing: NodeId = "1-5".parse().unwrap();
        assert!(find_node(&tree, &missing).is_none());
    }
}
