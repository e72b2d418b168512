use std::collections::VecDeque;

use crate::expansion::ExpansionStore;
use crate::tree::{NodeIx, OrgTree};

/// Nodes that would be drawn for one expansion state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleSet {
    order: Vec<NodeIx>,
    visible: Vec<bool>,
    open: Vec<bool>,
}

impl VisibleSet {
    pub fn contains(&self, ix: NodeIx) -> bool {
        self.visible.get(ix).copied().unwrap_or(false)
    }

    /// Whether the resolver treated a visible node as expanded. Always false
    /// for hidden nodes, which are never asked.
    pub fn is_open(&self, ix: NodeIx) -> bool {
        self.open.get(ix).copied().unwrap_or(false)
    }

    /// Visible nodes in traversal order: roots first, then each level in
    /// parent order.
    pub fn order(&self) -> &[NodeIx] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn ids<'a>(&self, tree: &'a OrgTree) -> Vec<&'a str> {
        self.order
            .iter()
            .map(|&ix| tree.node(ix).id.as_str())
            .collect()
    }
}

/// Breadth-first walk from every root. A child is visible exactly when its
/// parent is visible and expanded; hidden subtrees are never entered.
pub fn resolve_visible(tree: &OrgTree, store: &ExpansionStore) -> VisibleSet {
    let mut order = Vec::new();
    let mut visible = vec![false; tree.len()];
    let mut open = vec![false; tree.len()];
    let mut queue: VecDeque<NodeIx> = VecDeque::new();

    for &root in tree.roots() {
        visible[root] = true;
        queue.push_back(root);
    }

    while let Some(ix) = queue.pop_front() {
        order.push(ix);
        let node = tree.node(ix);
        if !store.effective_expansion(node) {
            continue;
        }
        open[ix] = true;
        for &child in &node.children {
            visible[child] = true;
            queue.push_back(child);
        }
    }

    VisibleSet {
        order,
        visible,
        open,
    }
}
