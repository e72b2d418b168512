use crate::config::RenderConfig;
use crate::layout::{Layout, LayoutNode};
use crate::theme::Theme;
use crate::tree::OrgTree;
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

const CANVAS_PAD: f32 = 24.0;
const AFFORDANCE_RADIUS: f32 = 8.0;

/// Static SVG preview of one frame.
pub fn render_svg(layout: &Layout, tree: &OrgTree, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = (layout.width + CANVAS_PAD * 2.0).max(200.0);
    let height = (layout.height + CANVAS_PAD * 2.0).max(120.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    let by_id: HashMap<&str, &LayoutNode> = layout
        .nodes
        .iter()
        .map(|node| (node.id.as_str(), node))
        .collect();

    for edge in &layout.edges {
        let (Some(parent), Some(child)) = (
            by_id.get(edge.parent_id.as_str()),
            by_id.get(edge.child_id.as_str()),
        ) else {
            continue;
        };
        let d = points_to_path(&elbow_points(parent, child, theme));
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.4\"/>",
            d, theme.line_color
        ));
    }

    for node in &layout.nodes {
        svg.push_str(&node_svg(node, tree, theme));
    }

    svg.push_str("</svg>");
    svg
}

fn node_origin(node: &LayoutNode) -> (f32, f32) {
    (node.x + CANVAS_PAD, node.y + CANVAS_PAD)
}

fn elbow_points(parent: &LayoutNode, child: &LayoutNode, theme: &Theme) -> Vec<(f32, f32)> {
    let (px, py) = node_origin(parent);
    let (cx, cy) = node_origin(child);
    let start = (px + theme.node_width / 2.0, py + theme.node_height);
    let end = (cx + theme.node_width / 2.0, cy);
    let mid_y = (start.1 + end.1) / 2.0;
    vec![start, (start.0, mid_y), (end.0, mid_y), end]
}

fn points_to_path(points: &[(f32, f32)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].0, points[0].1));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
    }
    d
}

fn node_svg(node: &LayoutNode, tree: &OrgTree, theme: &Theme) -> String {
    let (x, y) = node_origin(node);
    let fill = if node.depth == 0 {
        theme.root_color.as_str()
    } else {
        theme.primary_color.as_str()
    };
    let mut out = format!(
        "<g data-id=\"{}\"><rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"10\" ry=\"10\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
        escape_xml(&node.id),
        theme.node_width,
        theme.node_height,
        fill,
        theme.primary_border_color
    );

    let max_chars = ((theme.node_width - 16.0) / (theme.font_size * 0.6)).max(4.0) as usize;
    let center_x = x + theme.node_width / 2.0;
    let (name, title) = match tree.get(&node.id) {
        Some(tree_node) => (
            tree_node.record.display_name(),
            tree_node.record.job_title().map(str::to_string),
        ),
        None => (node.id.clone(), None),
    };
    let name_y = if title.is_some() {
        y + theme.node_height / 2.0 - theme.font_size * 0.25
    } else {
        y + theme.node_height / 2.0 + theme.font_size * 0.35
    };
    out.push_str(&format!(
        "<text x=\"{center_x:.2}\" y=\"{name_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"600\" fill=\"{}\">{}</text>",
        theme.font_family,
        theme.font_size,
        theme.primary_text_color,
        escape_xml(&truncate(&name, max_chars))
    ));
    if let Some(title) = title {
        let title_y = name_y + theme.font_size * 1.3;
        out.push_str(&format!(
            "<text x=\"{center_x:.2}\" y=\"{title_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            theme.font_family,
            theme.font_size * 0.85,
            theme.secondary_text_color,
            escape_xml(&truncate(&title, max_chars))
        ));
    }

    if node.child_count > 0 {
        let cy = y + theme.node_height;
        let glyph = if node.expanded { "\u{2212}" } else { "+" };
        out.push_str(&format!(
            "<circle cx=\"{center_x:.2}\" cy=\"{cy:.2}\" r=\"{AFFORDANCE_RADIUS}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.2\"/>",
            theme.background, theme.primary_border_color
        ));
        out.push_str(&format!(
            "<text x=\"{center_x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{glyph}</text>",
            cy + AFFORDANCE_RADIUS * 0.5,
            theme.font_family,
            theme.font_size,
            theme.primary_text_color
        ));
    }

    out.push_str("</g>");
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the `png` feature"
    ))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
