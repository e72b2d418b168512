//! The chart session: owns the current tree, expansion store and frame, and
//! hands each finished frame to a [`RenderSink`].
//!
//! Every transition is computed into locals first and committed in one step,
//! so the sink and any reader only ever see a complete state. Transitions take
//! `&mut self`; requests are therefore applied strictly one after another.

use tracing::{info, warn};

use crate::config::LayoutConfig;
use crate::error::{StructuralError, UnknownNodeError};
use crate::expansion::{ExpansionOverrides, ExpansionStore};
use crate::ir::EmployeeRecord;
use crate::layout::{Layout, compute_layout};
use crate::toggle::{ToggleAction, toggle};
use crate::tree::OrgTree;
use crate::visibility::{VisibleSet, resolve_visible};

/// Receiver of finished frames, typically the drawing layer.
pub trait RenderSink {
    fn present(&mut self, frame: &Layout);
}

impl RenderSink for () {
    fn present(&mut self, _frame: &Layout) {}
}

/// Keeps every presented frame, in order.
#[derive(Debug, Default)]
pub struct FrameLog {
    pub frames: Vec<Layout>,
}

impl RenderSink for FrameLog {
    fn present(&mut self, frame: &Layout) {
        self.frames.push(frame.clone());
    }
}

pub struct OrgChart<S: RenderSink = ()> {
    config: LayoutConfig,
    tree: OrgTree,
    store: ExpansionStore,
    visible: VisibleSet,
    frame: Layout,
    sink: S,
}

impl<S: RenderSink> OrgChart<S> {
    /// An empty chart. Nothing is presented until the first rebuild.
    pub fn new(config: LayoutConfig, sink: S) -> Self {
        let tree = OrgTree::default();
        let store = ExpansionStore::initialize(config.default_expanded_depth);
        let visible = resolve_visible(&tree, &store);
        Self {
            config,
            tree,
            store,
            visible,
            frame: Layout::default(),
            sink,
        }
    }

    pub fn from_records(
        config: LayoutConfig,
        records: Vec<EmployeeRecord>,
        sink: S,
    ) -> Result<Self, StructuralError> {
        let mut chart = Self::new(config, sink);
        chart.rebuild(records)?;
        Ok(chart)
    }

    /// Replace the employee list. The tree and expansion state start over;
    /// on error the previous tree, state and frame stay current.
    pub fn rebuild(&mut self, records: Vec<EmployeeRecord>) -> Result<&Layout, StructuralError> {
        let tree = match OrgTree::build(records) {
            Ok(tree) => tree,
            Err(err) => {
                warn!(error = %err, "rebuild rejected, keeping previous chart");
                return Err(err);
            }
        };
        let store = ExpansionStore::initialize(self.config.default_expanded_depth);
        let visible = resolve_visible(&tree, &store);
        let frame = compute_layout(&tree, &visible, &self.config);

        self.tree = tree;
        self.store = store;
        self.visible = visible;
        self.frame = frame;
        info!(
            nodes = self.tree.len(),
            visible = self.visible.len(),
            "chart rebuilt"
        );
        self.sink.present(&self.frame);
        Ok(&self.frame)
    }

    /// Toggle one node and present the resulting frame. An unknown id is
    /// reported and nothing changes.
    pub fn toggle(&mut self, node_id: &str) -> Result<ToggleAction, UnknownNodeError> {
        let transition = match toggle(&self.tree, &self.store, node_id) {
            Ok(transition) => transition,
            Err(err) => {
                warn!(node = %node_id, "toggle rejected: node not in current chart");
                return Err(err);
            }
        };
        let store = ExpansionStore::with_overrides(
            self.store.default_expanded_depth(),
            transition.overrides,
        );
        let visible = resolve_visible(&self.tree, &store);
        let frame = compute_layout(&self.tree, &visible, &self.config);

        self.store = store;
        self.visible = visible;
        self.frame = frame;
        info!(
            node = %node_id,
            action = ?transition.action,
            cleared = transition.cleared,
            visible = self.visible.len(),
            "toggled"
        );
        self.sink.present(&self.frame);
        Ok(transition.action)
    }

    /// Apply queued toggles in order, each one running the whole pipeline
    /// before the next starts. Rejected ids do not stop the queue.
    pub fn toggle_all<I, T>(&mut self, node_ids: I) -> Vec<Result<ToggleAction, UnknownNodeError>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        node_ids
            .into_iter()
            .map(|id| self.toggle(id.as_ref()))
            .collect()
    }

    pub fn is_expanded(&self, node_id: &str) -> Result<bool, UnknownNodeError> {
        self.tree
            .get(node_id)
            .map(|node| self.store.effective_expansion(node))
            .ok_or_else(|| UnknownNodeError::new(node_id))
    }

    pub fn is_visible(&self, node_id: &str) -> bool {
        self.tree
            .ix(node_id)
            .is_some_and(|ix| self.visible.contains(ix))
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn tree(&self) -> &OrgTree {
        &self.tree
    }

    pub fn store(&self) -> &ExpansionStore {
        &self.store
    }

    pub fn overrides(&self) -> &ExpansionOverrides {
        self.store.overrides()
    }

    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    pub fn frame(&self) -> &Layout {
        &self.frame
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
