pub(crate) mod types;
pub use types::*;

use crate::config::LayoutConfig;
use crate::tree::OrgTree;
use crate::visibility::VisibleSet;

/// Grid slot of the `index`-th node of a level. Wrapped rows fill from the
/// left, so a short last row is left-aligned.
fn grid_slot(index: usize, columns: usize) -> (usize, usize) {
    (index % columns, index / columns)
}

/// Place every visible node on its level's grid and connect it to its
/// parent.
///
/// Levels keep the resolver's traversal order, so siblings stay adjacent and
/// cousins follow their parents' order. A level longer than
/// `config.grid_cols` wraps into extra rows spaced `config.row_spacing()`
/// below the level's baseline.
pub fn compute_layout(tree: &OrgTree, visible: &VisibleSet, config: &LayoutConfig) -> Layout {
    let columns = config.columns();
    let row_spacing = config.row_spacing();
    let mut level_fill: Vec<usize> = Vec::new();
    let mut nodes = Vec::with_capacity(visible.len());
    let mut edges = Vec::with_capacity(visible.len().saturating_sub(tree.roots().len()));
    let mut max_x = 0.0_f32;
    let mut max_y = 0.0_f32;

    for &ix in visible.order() {
        let node = tree.node(ix);
        if level_fill.len() <= node.depth {
            level_fill.resize(node.depth + 1, 0);
        }
        let (column, row) = grid_slot(level_fill[node.depth], columns);
        level_fill[node.depth] += 1;

        let x = column as f32 * config.horizontal_spacing;
        let y = node.depth as f32 * config.vertical_spacing + row as f32 * row_spacing;
        max_x = max_x.max(x);
        max_y = max_y.max(y);

        nodes.push(LayoutNode {
            id: node.id.clone(),
            depth: node.depth,
            column,
            row,
            x,
            y,
            expanded: visible.is_open(ix),
            child_count: node.children.len(),
        });

        if let Some(parent) = node.parent
            && visible.contains(parent)
        {
            edges.push(Edge {
                parent_id: tree.node(parent).id.clone(),
                child_id: node.id.clone(),
            });
        }
    }

    let (width, height) = if nodes.is_empty() {
        (0.0, 0.0)
    } else {
        (
            max_x + config.horizontal_spacing,
            max_y + config.vertical_spacing,
        )
    };

    Layout {
        nodes,
        edges,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expansion::ExpansionStore;
    use crate::ir::EmployeeRecord;
    use crate::visibility::resolve_visible;

    fn wide_org(reports: usize) -> OrgTree {
        let mut records = vec![EmployeeRecord::new("ceo", None)];
        for i in 0..reports {
            records.push(EmployeeRecord::new(format!("r{i}"), Some("ceo")));
        }
        OrgTree::build(records).unwrap()
    }

    fn config(grid_cols: usize) -> LayoutConfig {
        LayoutConfig {
            horizontal_spacing: 100.0,
            vertical_spacing: 80.0,
            grid_cols,
            default_expanded_depth: 2,
        }
    }

    #[test]
    fn grid_slot_wraps_by_columns() {
        assert_eq!(grid_slot(0, 3), (0, 0));
        assert_eq!(grid_slot(2, 3), (2, 0));
        assert_eq!(grid_slot(3, 3), (0, 1));
        assert_eq!(grid_slot(7, 3), (1, 2));
    }

    #[test]
    fn positions_follow_depth_and_column() {
        let tree = wide_org(3);
        let visible = resolve_visible(&tree, &ExpansionStore::initialize(2));
        let layout = compute_layout(&tree, &visible, &config(6));

        let ceo = layout.node("ceo").unwrap();
        assert_eq!((ceo.x, ceo.y), (0.0, 0.0));
        assert!(ceo.expanded);
        assert_eq!(ceo.child_count, 3);

        let r2 = layout.node("r2").unwrap();
        assert_eq!((r2.column, r2.row), (2, 0));
        assert_eq!((r2.x, r2.y), (200.0, 80.0));
        assert_eq!(layout.edges.len(), 3);
        assert_eq!(layout.width, 300.0);
        assert_eq!(layout.height, 160.0);
    }

    #[test]
    fn long_levels_wrap_into_rows() {
        let tree = wide_org(5);
        let visible = resolve_visible(&tree, &ExpansionStore::initialize(2));
        let layout = compute_layout(&tree, &visible, &config(2));

        let slots: Vec<(usize, usize)> = layout
            .level(1)
            .map(|node| (node.column, node.row))
            .collect();
        assert_eq!(slots, vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);

        let last = layout.node("r4").unwrap();
        assert_eq!((last.x, last.y), (0.0, 80.0 + 2.0 * 40.0));
    }

    #[test]
    fn cousins_follow_parent_order() {
        let tree = OrgTree::build(vec![
            EmployeeRecord::new("ceo", None),
            EmployeeRecord::new("a", Some("ceo")),
            EmployeeRecord::new("b", Some("ceo")),
            EmployeeRecord::new("b1", Some("b")),
            EmployeeRecord::new("a1", Some("a")),
        ])
        .unwrap();
        let visible = resolve_visible(&tree, &ExpansionStore::initialize(3));
        let layout = compute_layout(&tree, &visible, &config(6));
        let level: Vec<&str> = layout.level(2).map(|node| node.id.as_str()).collect();
        assert_eq!(level, vec!["a1", "b1"]);
    }

    #[test]
    fn edges_only_join_visible_nodes() {
        let tree = OrgTree::build(vec![
            EmployeeRecord::new("ceo", None),
            EmployeeRecord::new("vp", Some("ceo")),
            EmployeeRecord::new("mgr", Some("vp")),
            EmployeeRecord::new("ic", Some("mgr")),
        ])
        .unwrap();
        let visible = resolve_visible(&tree, &ExpansionStore::initialize(2));
        let layout = compute_layout(&tree, &visible, &config(6));
        let pairs: Vec<(&str, &str)> = layout
            .edges
            .iter()
            .map(|edge| (edge.parent_id.as_str(), edge.child_id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("ceo", "vp"), ("vp", "mgr")]);
        assert!(layout.node("ic").is_none());
        assert!(!layout.node("mgr").unwrap().expanded);
    }

    #[test]
    fn multiple_roots_share_the_top_level() {
        let tree = OrgTree::build(vec![
            EmployeeRecord::new("ceo", None),
            EmployeeRecord::new("contractor", Some("agency")),
        ])
        .unwrap();
        let visible = resolve_visible(&tree, &ExpansionStore::initialize(2));
        let layout = compute_layout(&tree, &visible, &config(6));
        let contractor = layout.node("contractor").unwrap();
        assert_eq!((contractor.depth, contractor.column), (0, 1));
        assert!(layout.edges.is_empty());
    }

    #[test]
    fn empty_tree_has_zero_bounds() {
        let tree = OrgTree::build(Vec::new()).unwrap();
        let visible = resolve_visible(&tree, &ExpansionStore::default());
        let layout = compute_layout(&tree, &visible, &LayoutConfig::default());
        assert!(layout.is_empty());
        assert_eq!((layout.width, layout.height), (0.0, 0.0));
    }
}
