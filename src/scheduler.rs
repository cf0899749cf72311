//! Layout scheduler — decides when to re-run layout and merges positions back.
//!
//! Two mutation classes write to the same node records: the visibility
//! reducer writes `collapsed`/`hidden`, layout writes `position`. The
//! scheduler only watches `collapsed` (plus an explicit request flag), so a
//! position update produced by layout can never schedule another layout.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::LayoutConfig;
use crate::layout::LayoutEngine;
use crate::model::{Edge, GraphModel, Node, Position};

/// Result of one scheduling decision.
#[derive(Debug, Clone)]
pub struct Scheduled {
    pub model: GraphModel,
    /// True if a layout pass actually ran.
    pub relaid: bool,
}

#[derive(Debug, Default)]
pub struct LayoutScheduler {
    /// Collapse flag per node id as of the last layout pass.
    last_collapse_state: HashMap<String, bool>,
    layout_requested: bool,
    passes: u64,
}

impl LayoutScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the next `schedule` call to lay out, whatever the collapse state.
    pub fn request_layout(&mut self) {
        self.layout_requested = true;
    }

    pub fn is_layout_requested(&self) -> bool {
        self.layout_requested
    }

    /// Number of layout passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Forget the memoized collapse state (new data load).
    pub fn reset(&mut self) {
        self.last_collapse_state.clear();
        self.layout_requested = false;
    }

    /// True if any node's collapse flag differs from the last laid-out state.
    pub fn collapse_state_changed(&self, nodes: &[Node]) -> bool {
        nodes.len() != self.last_collapse_state.len()
            || nodes
                .iter()
                .any(|n| self.last_collapse_state.get(&n.id) != Some(&n.collapsed))
    }

    pub fn needs_layout(&self, model: &GraphModel) -> bool {
        self.layout_requested || self.collapse_state_changed(model.nodes())
    }

    /// Lay out the visible subgraph if needed and merge the positions.
    ///
    /// When nothing changed the model is handed back untouched. Hidden nodes
    /// keep their last position so a later re-expand resumes near it.
    pub fn schedule<L: LayoutEngine + ?Sized>(
        &mut self,
        model: GraphModel,
        engine: &L,
        config: &LayoutConfig,
    ) -> Scheduled {
        if !self.needs_layout(&model) {
            debug!("collapse state unchanged; layout skipped");
            return Scheduled {
                model,
                relaid: false,
            };
        }

        let visible: Vec<&Node> = model.visible_nodes().collect();
        let visible_ids: HashSet<&str> = visible.iter().map(|n| n.id.as_str()).collect();
        let visible_edges: Vec<&Edge> = model
            .edges()
            .iter()
            .filter(|e| {
                visible_ids.contains(e.source_id.as_str())
                    && visible_ids.contains(e.target_id.as_str())
            })
            .collect();

        let positioned = engine.layout(&visible, &visible_edges, config);
        let positions: HashMap<&str, Position> = positioned
            .iter()
            .map(|ln| (ln.id.as_str(), ln.position))
            .collect();

        let nodes: Vec<Node> = model
            .nodes()
            .iter()
            .map(|node| match positions.get(node.id.as_str()) {
                Some(&position) => Node {
                    position,
                    ..node.clone()
                },
                None => node.clone(),
            })
            .collect();

        self.last_collapse_state = nodes.iter().map(|n| (n.id.clone(), n.collapsed)).collect();
        self.layout_requested = false;
        self.passes += 1;
        debug!(
            pass = self.passes,
            visible_nodes = visible.len(),
            visible_edges = visible_edges.len(),
            direction = %config.direction,
            "layout pass complete"
        );

        let next = model.with_state(nodes, model.edges().to_vec());
        Scheduled {
            model: next,
            relaid: true,
        }
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_scheduler.rs"]
mod tests;
