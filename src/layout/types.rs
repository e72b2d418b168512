use serde::Serialize;

/// A visible employee with its resolved grid slot and coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub id: String,
    pub depth: usize,
    pub column: usize,
    pub row: usize,
    pub x: f32,
    pub y: f32,
    /// Expansion as decided while resolving visibility; drives the
    /// expand/collapse affordance.
    pub expanded: bool,
    pub child_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub parent_id: String,
    pub child_id: String,
}

/// One complete frame handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<Edge>,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn level(&self, depth: usize) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.iter().filter(move |node| node.depth == depth)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
