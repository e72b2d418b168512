use tracing::debug;

use crate::error::UnknownNodeError;
use crate::expansion::{ExpansionOverrides, ExpansionStore};
use crate::tree::OrgTree;

/// Which way a toggle went, judged from the store it was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Expand,
    Collapse,
}

/// A computed transition. `overrides` is the complete map that replaces the
/// store's current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub action: ToggleAction,
    pub overrides: ExpansionOverrides,
    pub cleared: usize,
}

/// Compute the override map that results from toggling `node_id`.
///
/// Collapsing pins the node closed and drops every override below it, so a
/// later expand shows descendants by the depth rule again. Expanding only
/// pins the node open. The store is not touched; an unknown id leaves it as
/// it was.
pub fn toggle(
    tree: &OrgTree,
    store: &ExpansionStore,
    node_id: &str,
) -> Result<Transition, UnknownNodeError> {
    let ix = tree
        .ix(node_id)
        .ok_or_else(|| UnknownNodeError::new(node_id))?;
    let node = tree.node(ix);
    let was_expanded = store.effective_expansion(node);

    let mut next = store.overrides().to_map();
    let mut cleared = 0;
    let action = if was_expanded {
        next.insert(node.id.clone(), false);
        for descendant in tree.descendants(ix) {
            if next.remove(&tree.node(descendant).id).is_some() {
                cleared += 1;
            }
        }
        ToggleAction::Collapse
    } else {
        next.insert(node.id.clone(), true);
        ToggleAction::Expand
    };

    debug!(node = %node_id, ?action, cleared, "computed toggle");
    Ok(Transition {
        action,
        overrides: next.into(),
        cleared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::EmployeeRecord;

    fn chain() -> OrgTree {
        OrgTree::build(vec![
            EmployeeRecord::new("ceo", None),
            EmployeeRecord::new("vp", Some("ceo")),
            EmployeeRecord::new("mgr", Some("vp")),
            EmployeeRecord::new("ic", Some("mgr")),
            EmployeeRecord::new("peer", Some("ceo")),
        ])
        .unwrap()
    }

    #[test]
    fn expand_pins_node_open() {
        let tree = chain();
        let store = ExpansionStore::initialize(2);
        let transition = toggle(&tree, &store, "mgr").unwrap();
        assert_eq!(transition.action, ToggleAction::Expand);
        assert_eq!(transition.overrides.get("mgr"), Some(true));
        assert_eq!(transition.overrides.len(), 1);
    }

    #[test]
    fn collapse_clears_descendant_overrides_only() {
        let tree = chain();
        let overrides: ExpansionOverrides =
            [("mgr", true), ("ic", true), ("peer", false)].into_iter().collect();
        let store = ExpansionStore::with_overrides(2, overrides);
        let transition = toggle(&tree, &store, "vp").unwrap();
        assert_eq!(transition.action, ToggleAction::Collapse);
        assert_eq!(transition.cleared, 2);
        assert_eq!(transition.overrides.get("vp"), Some(false));
        assert!(!transition.overrides.contains("mgr"));
        assert!(!transition.overrides.contains("ic"));
        assert_eq!(transition.overrides.get("peer"), Some(false));
    }

    #[test]
    fn source_store_is_not_mutated() {
        let tree = chain();
        let overrides: ExpansionOverrides = [("mgr", true)].into_iter().collect();
        let store = ExpansionStore::with_overrides(2, overrides.clone());
        let transition = toggle(&tree, &store, "vp").unwrap();
        assert!(store.overrides().ptr_eq(&overrides));
        assert_eq!(store.overrides().get("mgr"), Some(true));
        assert!(!transition.overrides.ptr_eq(&overrides));
    }

    #[test]
    fn unknown_node_is_rejected() {
        let tree = chain();
        let store = ExpansionStore::initialize(2);
        let err = toggle(&tree, &store, "ghost").unwrap_err();
        assert_eq!(err, UnknownNodeError::new("ghost"));
    }

    #[test]
    fn explicit_collapse_override_is_read_back() {
        let tree = chain();
        let overrides: ExpansionOverrides = [("ceo", false)].into_iter().collect();
        let store = ExpansionStore::with_overrides(2, overrides);
        let transition = toggle(&tree, &store, "ceo").unwrap();
        assert_eq!(transition.action, ToggleAction::Expand);
        assert_eq!(transition.overrides.get("ceo"), Some(true));
    }
}
