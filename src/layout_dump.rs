use crate::layout::Layout;
use crate::tree::OrgTree;
use serde::Serialize;
use serde_json::{Map, Value};

/// Serializable snapshot of a frame, enriched with what a client needs to
/// draw each box without a second lookup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: String,
    pub label: String,
    pub job_title: Option<String>,
    pub initials: String,
    pub depth: usize,
    pub column: usize,
    pub row: usize,
    pub x: f32,
    pub y: f32,
    pub expanded: bool,
    pub child_count: usize,
    pub total_report_count: usize,
    pub synthetic_root: bool,
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDump {
    pub parent_id: String,
    pub child_id: String,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout, tree: &OrgTree) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| {
                let ix = tree.ix(&node.id);
                let record = ix.map(|ix| &tree.node(ix).record);
                NodeDump {
                    id: node.id.clone(),
                    label: record
                        .map(|record| record.display_name())
                        .unwrap_or_else(|| node.id.clone()),
                    job_title: record.and_then(|record| record.job_title().map(str::to_string)),
                    initials: record.map(|record| record.initials()).unwrap_or_default(),
                    depth: node.depth,
                    column: node.column,
                    row: node.row,
                    x: node.x,
                    y: node.y,
                    expanded: node.expanded,
                    child_count: node.child_count,
                    total_report_count: tree.total_report_count(&node.id).unwrap_or(0),
                    synthetic_root: ix.is_some_and(|ix| tree.is_synthetic_root(ix)),
                    attributes: record
                        .map(|record| record.attributes.clone())
                        .unwrap_or_default(),
                }
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                parent_id: edge.parent_id.clone(),
                child_id: edge.child_id.clone(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            nodes,
            edges,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::expansion::ExpansionStore;
    use crate::ir::EmployeeRecord;
    use crate::layout::compute_layout;
    use crate::visibility::resolve_visible;

    #[test]
    fn dump_carries_labels_and_counts() {
        let tree = OrgTree::build(vec![
            EmployeeRecord::new("1", None).with_attribute("fullName", "Awa Diop"),
            EmployeeRecord::new("2", Some("1")).with_attribute("jobTitle", "DAF"),
            EmployeeRecord::new("3", Some("2")),
            EmployeeRecord::new("9", Some("404")),
        ])
        .unwrap();
        let visible = resolve_visible(&tree, &ExpansionStore::initialize(1));
        let layout = compute_layout(&tree, &visible, &LayoutConfig::default());
        let dump = LayoutDump::from_layout(&layout, &tree);

        let ids: Vec<&str> = dump.nodes.iter().map(|node| node.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "9", "2"]);
        assert_eq!(dump.nodes[0].label, "Awa Diop");
        assert_eq!(dump.nodes[0].total_report_count, 2);
        assert!(dump.nodes[1].synthetic_root);
        assert_eq!(dump.nodes[2].job_title.as_deref(), Some("DAF"));
        assert!(!dump.nodes[2].expanded);

        let json: Value = serde_json::from_str(&dump.to_json().unwrap()).unwrap();
        assert_eq!(json["edges"][0]["parentId"], "1");
        assert_eq!(json["nodes"][2]["childCount"], 1);
    }
}
