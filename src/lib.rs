pub mod chart;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod expansion;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod theme;
pub mod toggle;
pub mod tree;
pub mod visibility;

pub use chart::{FrameLog, OrgChart, RenderSink};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use error::{ChartError, StructuralError, UnknownNodeError};
pub use expansion::{ExpansionOverrides, ExpansionStore, effective_expansion};
pub use ir::{EmployeeRecord, parse_records};
pub use layout::{Edge, Layout, LayoutNode, compute_layout};
pub use render::render_svg;
pub use theme::Theme;
pub use toggle::{ToggleAction, Transition, toggle};
pub use tree::{NodeIx, OrgTree, TreeNode};
pub use visibility::{VisibleSet, resolve_visible};

/// Build a chart, apply `toggles` in order and return the final frame. Any
/// unknown id fails the whole call.
pub fn layout_chart<T: AsRef<str>>(
    records: Vec<EmployeeRecord>,
    config: &LayoutConfig,
    toggles: &[T],
) -> Result<Layout, ChartError> {
    let mut chart = OrgChart::from_records(config.clone(), records, ())?;
    for id in toggles {
        chart.toggle(id.as_ref())?;
    }
    Ok(chart.frame().clone())
}
