//! FILENAME: core/drill-engine/src/expansion.rs
//! Expansion State - Positional node identity and the set of expanded groups.
//!
//! A node is identified by the sibling indices on the path from its root,
//! written as `"0"`, `"0-1"`, `"0-1-2"`. Ids are derived from position alone
//! while walking the tree and are never stored on the nodes, so a rebuilt
//! tree with reordered groups cannot carry a stale id.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::DrillError;

/// Separator between sibling indices in the string form of a `NodeId`.
pub const ID_SEPARATOR: char = '-';

// ============================================================================
// NODE ID
// ============================================================================

/// Positional path identifying one group within one build of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NodeId(SmallVec<[usize; 4]>);

impl NodeId {
    /// Id of the root group at `index`.
    pub fn root(index: usize) -> Self {
        let mut path = SmallVec::new();
        path.push(index);
        NodeId(path)
    }

    /// Id of the child at `index` under this node.
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        NodeId(path)
    }

    /// Sibling indices from the root down to this node.
    pub fn path(&self) -> &[usize] {
        &self.0
    }

    /// Depth of the node this id addresses (0 for roots).
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Id of the parent group, or `None` for a root.
    pub fn parent(&self) -> Option<NodeId> {
        if self.0.len() <= 1 {
            return None;
        }
        Some(NodeId(self.0[..self.0.len() - 1].iter().copied().collect()))
    }

    /// Ids of every proper ancestor, outermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeId> + '_ {
        (1..self.0.len()).map(move |len| NodeId(self.0[..len].iter().copied().collect()))
    }
}

/// Id of the `sibling_index`-th child of `parent`, or of a root when
/// `parent` is `None`.
pub fn compute_id(parent: Option<&NodeId>, sibling_index: usize) -> NodeId {
    match parent {
        Some(parent) => parent.child(sibling_index),
        None => NodeId::root(sibling_index),
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", ID_SEPARATOR)?;
            }
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

impl FromStr for NodeId {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DrillError::InvalidNodeId(s.to_string()));
        }

        s.split(ID_SEPARATOR)
            .map(|part| {
                // Reject signs and whitespace that `usize::from_str` would tolerate or misread
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(DrillError::InvalidNodeId(s.to_string()));
                }
                part.parse::<usize>()
                    .map_err(|_| DrillError::InvalidNodeId(s.to_string()))
            })
            .collect::<Result<SmallVec<[usize; 4]>, _>>()
            .map(NodeId)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for NodeId {
    type Error = DrillError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ============================================================================
// EXPANSION STORE
// ============================================================================

/// The set of currently expanded groups.
/// Empty at first render, mutated only by toggles, cleared on new data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionStore {
    expanded: FxHashSet<NodeId>,
}

impl ExpansionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id`. Returns `true` if the node is now expanded.
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded.contains(id)
    }

    pub fn has(&self, id: &NodeId) -> bool {
        self.is_expanded(id)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.expanded.iter()
    }

    /// True when every proper ancestor of `id` is expanded, i.e. the node
    /// addressed by `id` is currently shown. Roots are always reachable.
    pub fn is_reachable(&self, id: &NodeId) -> bool {
        id.ancestors().all(|ancestor| self.expanded.contains(&ancestor))
    }

    /// Index of the deepest dimension column that has to be shown for
    /// `dimension_count` dimensions.
    ///
    /// Every reachable expanded node at depth `d` reveals children at depth
    /// `d + 1`. Expanded nodes hidden under a collapsed ancestor are ignored.
    pub fn visible_level(&self, dimension_count: usize) -> usize {
        if dimension_count == 0 {
            return 0;
        }

        self.iter()
            .filter(|id| self.is_reachable(id))
            .map(|id| id.depth() + 1)
            .max()
            .unwrap_or(0)
            .min(dimension_count - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        s.parse().unwrap()
    }

    #[test]
    fn test_compute_id() {
        let root = compute_id(None, 2);
        assert_eq!(root.to_string(), "2");
        assert_eq!(root.depth(), 0);

        let child = compute_id(Some(&root), 0);
        assert_eq!(child.to_string(), "2-0");
        assert_eq!(compute_id(Some(&child), 11).to_string(), "2-0-11");
        assert_eq!(child.parent(), Some(root));
    }

    #[test]
    fn test_ids_are_positional() {
        // Same position, same id, regardless of which build produced it.
        assert_eq!(compute_id(Some(&NodeId::root(1)), 3), id("1-3"));
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        for bad in ["", "-", "1-", "-1", "a", "1--2", "+1", " 1", "1-x", "99999999999999999999999"] {
            assert!(bad.parse::<NodeId>().is_err(), "{:?} should not parse", bad);
        }
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_wide_sibling_indices_are_kept() {
        let index = u32::MAX as usize + 1;
        let root = NodeId::root(index);
        assert_eq!(root.path(), &[index]);
        assert_eq!(root.to_string(), "4294967296");

        let child = compute_id(Some(&root), index + 1);
        assert_eq!(child.to_string(), "4294967296-4294967297");
        assert_eq!(child.to_string().parse::<NodeId>().unwrap(), child);
    }

    #[test]
    fn test_ancestors() {
        let ancestors: Vec<String> = id("0-2-1").ancestors().map(|a| a.to_string()).collect();
        assert_eq!(ancestors, vec!["0", "0-2"]);
        assert_eq!(id("3").ancestors().count(), 0);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&id("0-1")).unwrap();
        assert_eq!(json, r#""0-1""#);
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id("0-1"));
        assert!(serde_json::from_str::<NodeId>(r#""0-""#).is_err());
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let mut store = ExpansionStore::new();
        store.toggle(&id("1"));
        let before = store.clone();

        assert!(store.toggle(&id("0")));
        assert!(store.is_expanded(&id("0")));
        assert!(!store.toggle(&id("0")));
        assert!(!store.has(&id("0")));
        assert_eq!(store, before);
    }

    #[test]
    fn test_reachability() {
        let mut store = ExpansionStore::new();
        assert!(store.is_reachable(&id("4")));
        assert!(!store.is_reachable(&id("0-1")));

        store.toggle(&id("0"));
        assert!(store.is_reachable(&id("0-1")));
        assert!(!store.is_reachable(&id("0-1-0")));
    }

    #[test]
    fn test_visible_level() {
        let mut store = ExpansionStore::new();
        assert_eq!(store.visible_level(3), 0);

        store.toggle(&id("0"));
        assert_eq!(store.visible_level(3), 1);

        store.toggle(&id("0-1"));
        assert_eq!(store.visible_level(3), 2);

        // Capped at the last dimension column.
        assert_eq!(store.visible_level(2), 1);

        // Collapsing the root hides 0-1, so it no longer widens the table.
        store.toggle(&id("0"));
        assert_eq!(store.visible_level(3), 0);
        assert!(store.has(&id("0-1")));
    }

    #[test]
    fn test_visible_level_without_dimensions() {
        let mut store = ExpansionStore::new();
        store.toggle(&id("0"));
        assert_eq!(store.visible_level(0), 0);
    }
}
