//! Expansion state.
//!
//! The override map is the only mutable state of a chart. It is shared behind
//! an `Arc` and never edited in place: a transition builds a fresh map and the
//! store swaps it in whole, so a reader holding a clone keeps a complete,
//! consistent snapshot.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::tree::TreeNode;

pub const DEFAULT_EXPANDED_DEPTH: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionOverrides(Arc<BTreeMap<String, bool>>);

impl ExpansionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<bool> {
        self.0.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(id, value)| (id.as_str(), *value))
    }

    /// True when both values are the same allocation, i.e. no transition
    /// happened between the two reads.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn to_map(&self) -> BTreeMap<String, bool> {
        self.0.as_ref().clone()
    }
}

impl From<BTreeMap<String, bool>> for ExpansionOverrides {
    fn from(map: BTreeMap<String, bool>) -> Self {
        Self(Arc::new(map))
    }
}

impl<'a> FromIterator<(&'a str, bool)> for ExpansionOverrides {
    fn from_iter<I: IntoIterator<Item = (&'a str, bool)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(id, value)| (id.to_string(), value))
            .collect::<BTreeMap<_, _>>()
            .into()
    }
}

/// The expansion rule: an explicit override wins, otherwise nodes shallower
/// than `default_expanded_depth` are open.
pub fn effective_expansion(
    overrides: &ExpansionOverrides,
    default_expanded_depth: usize,
    node: &TreeNode,
) -> bool {
    overrides
        .get(&node.id)
        .unwrap_or(node.depth < default_expanded_depth)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionStore {
    overrides: ExpansionOverrides,
    default_expanded_depth: usize,
}

impl Default for ExpansionStore {
    fn default() -> Self {
        Self::initialize(DEFAULT_EXPANDED_DEPTH)
    }
}

impl ExpansionStore {
    /// Fresh store for a newly built tree. Default-expanded nodes get no
    /// entry; the depth rule covers them until a toggle says otherwise.
    pub fn initialize(default_expanded_depth: usize) -> Self {
        Self {
            overrides: ExpansionOverrides::new(),
            default_expanded_depth,
        }
    }

    pub fn with_overrides(default_expanded_depth: usize, overrides: ExpansionOverrides) -> Self {
        Self {
            overrides,
            default_expanded_depth,
        }
    }

    pub fn default_expanded_depth(&self) -> usize {
        self.default_expanded_depth
    }

    pub fn overrides(&self) -> &ExpansionOverrides {
        &self.overrides
    }

    pub fn effective_expansion(&self, node: &TreeNode) -> bool {
        effective_expansion(&self.overrides, self.default_expanded_depth, node)
    }

    pub(crate) fn replace(&mut self, overrides: ExpansionOverrides) {
        self.overrides = overrides;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::EmployeeRecord;

    fn node(id: &str, depth: usize) -> TreeNode {
        TreeNode {
            id: id.to_string(),
            parent: None,
            children: Vec::new(),
            depth,
            record: EmployeeRecord::new(id, None),
        }
    }

    #[test]
    fn default_rule_uses_depth() {
        let store = ExpansionStore::initialize(2);
        assert!(store.effective_expansion(&node("a", 0)));
        assert!(store.effective_expansion(&node("b", 1)));
        assert!(!store.effective_expansion(&node("c", 2)));
        assert!(!store.effective_expansion(&node("d", 7)));
    }

    #[test]
    fn override_beats_default() {
        let overrides: ExpansionOverrides = [("a", false), ("c", true)].into_iter().collect();
        let store = ExpansionStore::with_overrides(2, overrides);
        assert!(!store.effective_expansion(&node("a", 0)));
        assert!(store.effective_expansion(&node("c", 5)));
    }

    #[test]
    fn zero_depth_collapses_everything_by_default() {
        let store = ExpansionStore::initialize(0);
        assert!(!store.effective_expansion(&node("root", 0)));
    }

    #[test]
    fn replace_swaps_whole_map() {
        let mut store = ExpansionStore::initialize(2);
        let before = store.overrides().clone();
        let next: ExpansionOverrides = [("x", true)].into_iter().collect();
        store.replace(next.clone());
        assert!(store.overrides().ptr_eq(&next));
        assert!(before.is_empty());
        assert_eq!(store.overrides().get("x"), Some(true));
    }
}
