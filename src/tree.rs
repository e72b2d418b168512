//! Tree construction from flat manager references.
//!
//! Nodes live in an arena indexed by [`NodeIx`], in input order. Parent links
//! are plain indices used for upward lookups; ownership only flows through the
//! arena itself.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, warn};

use crate::error::StructuralError;
use crate::ir::EmployeeRecord;

pub type NodeIx = usize;

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: String,
    pub parent: Option<NodeIx>,
    pub children: Vec<NodeIx>,
    pub depth: usize,
    pub record: EmployeeRecord,
}

#[derive(Debug, Clone, Default)]
pub struct OrgTree {
    nodes: Vec<TreeNode>,
    index: HashMap<String, NodeIx>,
    roots: Vec<NodeIx>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

impl OrgTree {
    pub fn build(records: Vec<EmployeeRecord>) -> Result<Self, StructuralError> {
        let mut index: HashMap<String, NodeIx> = HashMap::with_capacity(records.len());
        for (ix, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), ix).is_some() {
                return Err(StructuralError::DuplicateId {
                    id: record.id.clone(),
                });
            }
        }

        let parents: Vec<Option<NodeIx>> = records
            .iter()
            .map(|record| {
                record
                    .manager_id
                    .as_deref()
                    .and_then(|manager| index.get(manager).copied())
            })
            .collect();

        check_acyclic(&records, &parents)?;

        let mut children: Vec<Vec<NodeIx>> = vec![Vec::new(); records.len()];
        let mut roots = Vec::new();
        for (ix, parent) in parents.iter().enumerate() {
            match parent {
                Some(parent) => children[*parent].push(ix),
                None => {
                    if let Some(manager) = records[ix].manager_id.as_deref() {
                        warn!(
                            node = %records[ix].id,
                            manager = %manager,
                            "manager not in data set, treating as root"
                        );
                    }
                    roots.push(ix);
                }
            }
        }

        let mut depths = vec![0usize; records.len()];
        let mut queue: VecDeque<NodeIx> = roots.iter().copied().collect();
        while let Some(ix) = queue.pop_front() {
            for &child in &children[ix] {
                depths[child] = depths[ix] + 1;
                queue.push_back(child);
            }
        }

        let nodes = records
            .into_iter()
            .zip(parents)
            .zip(children)
            .zip(depths)
            .map(|(((record, parent), children), depth)| TreeNode {
                id: record.id.clone(),
                parent,
                children,
                depth,
                record,
            })
            .collect::<Vec<_>>();

        debug!(nodes = nodes.len(), roots = roots.len(), "built org tree");
        Ok(Self {
            nodes,
            index,
            roots,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeIx] {
        &self.roots
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn node(&self, ix: NodeIx) -> &TreeNode {
        &self.nodes[ix]
    }

    pub fn ix(&self, id: &str) -> Option<NodeIx> {
        self.index.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&TreeNode> {
        self.ix(id).map(|ix| &self.nodes[ix])
    }

    /// A root whose manager exists but was left out of the current data set.
    pub fn is_synthetic_root(&self, ix: NodeIx) -> bool {
        let node = &self.nodes[ix];
        node.parent.is_none() && node.record.manager_id.is_some()
    }

    /// Strict descendants of `ix` in pre-order.
    pub fn descendants(&self, ix: NodeIx) -> Vec<NodeIx> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeIx> = self.nodes[ix].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next].children.iter().rev().copied());
        }
        out
    }

    /// Ancestors of `ix`, nearest first.
    pub fn ancestors(&self, ix: NodeIx) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.nodes[ix].parent,
        }
    }

    pub fn parent_of(&self, id: &str) -> Option<&str> {
        let parent = self.get(id)?.parent?;
        Some(self.nodes[parent].id.as_str())
    }

    pub fn children_of(&self, id: &str) -> Option<Vec<&str>> {
        self.get(id).map(|node| {
            node.children
                .iter()
                .map(|&child| self.nodes[child].id.as_str())
                .collect()
        })
    }

    pub fn direct_report_count(&self, id: &str) -> Option<usize> {
        self.get(id).map(|node| node.children.len())
    }

    pub fn total_report_count(&self, id: &str) -> Option<usize> {
        self.ix(id).map(|ix| self.descendants(ix).len())
    }

    pub fn is_manager(&self, id: &str) -> Option<bool> {
        self.get(id).map(|node| !node.children.is_empty())
    }

    /// Ids from the node's root down to the node itself.
    pub fn hierarchy_path(&self, id: &str) -> Option<Vec<&str>> {
        let ix = self.ix(id)?;
        let mut path: Vec<&str> = self
            .ancestors(ix)
            .map(|ancestor| self.nodes[ancestor].id.as_str())
            .collect();
        path.reverse();
        path.push(self.nodes[ix].id.as_str());
        Some(path)
    }
}

pub struct Ancestors<'a> {
    tree: &'a OrgTree,
    next: Option<NodeIx>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeIx;

    fn next(&mut self) -> Option<NodeIx> {
        let current = self.next?;
        self.next = self.tree.nodes[current].parent;
        Some(current)
    }
}

/// Walk every manager chain once. Each node enters the current path at most
/// once, so the walk is bounded by the node count even on malformed input.
fn check_acyclic(
    records: &[EmployeeRecord],
    parents: &[Option<NodeIx>],
) -> Result<(), StructuralError> {
    let mut marks = vec![Mark::Unvisited; parents.len()];
    let mut path: Vec<NodeIx> = Vec::new();

    for start in 0..parents.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }
        path.clear();
        let mut current = Some(start);
        while let Some(ix) = current {
            match marks[ix] {
                Mark::Done => break,
                Mark::OnPath => {
                    let begin = path.iter().position(|&p| p == ix).unwrap_or(0);
                    let ids = path[begin..]
                        .iter()
                        .map(|&p| records[p].id.clone())
                        .collect();
                    return Err(StructuralError::ManagerCycle { ids });
                }
                Mark::Unvisited => {
                    marks[ix] = Mark::OnPath;
                    path.push(ix);
                    current = parents[ix];
                }
            }
        }
        for &ix in &path {
            marks[ix] = Mark::Done;
        }
    }
    Ok(())
}
