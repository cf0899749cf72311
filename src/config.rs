//! Configuration for layout and the engine.
//!
//! Every struct deserializes with `#[serde(default)]`, so a partial JSON file
//! only overrides the keys it names.

use serde::{Deserialize, Serialize};

use crate::layout::Direction;
use crate::model::{Node, NodeKind};

// ─── NodeFootprint ───────────────────────────────────────────────────────────

/// Width and height of a node box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeFootprint {
    pub width: f64,
    pub height: f64,
}

impl NodeFootprint {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ─── FootprintTable ──────────────────────────────────────────────────────────

/// Box size per node kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FootprintTable {
    pub use_case: NodeFootprint,
    pub trigger: NodeFootprint,
    pub agent: NodeFootprint,
    pub tool: NodeFootprint,
    /// Characters of agent instructions that fit on one rendered line.
    pub instruction_chars_per_line: usize,
    /// Extra height per line of agent instructions.
    pub instruction_line_height: f64,
    /// Agent boxes never grow past this height.
    pub max_agent_height: f64,
}

impl Default for FootprintTable {
    fn default() -> Self {
        Self {
            use_case: NodeFootprint::new(320.0, 90.0),
            trigger: NodeFootprint::new(220.0, 70.0),
            agent: NodeFootprint::new(260.0, 110.0),
            tool: NodeFootprint::new(220.0, 70.0),
            instruction_chars_per_line: 36,
            instruction_line_height: 16.0,
            max_agent_height: 420.0,
        }
    }
}

impl FootprintTable {
    pub fn for_kind(&self, kind: NodeKind) -> NodeFootprint {
        match kind {
            NodeKind::UseCase => self.use_case,
            NodeKind::Trigger => self.trigger,
            NodeKind::Agent => self.agent,
            NodeKind::Tool => self.tool,
        }
    }

    /// Footprint of a concrete node. Agents grow taller with long `instructions`.
    pub fn for_node(&self, node: &Node) -> NodeFootprint {
        let base = self.for_kind(node.kind);
        if node.kind != NodeKind::Agent {
            return base;
        }
        let chars = node
            .payload
            .get("instructions")
            .and_then(|v| v.as_str())
            .map(|s| s.chars().count())
            .unwrap_or(0);
        if chars == 0 || self.instruction_chars_per_line == 0 {
            return base;
        }
        let lines = chars.div_ceil(self.instruction_chars_per_line) as f64;
        let height = (base.height + lines * self.instruction_line_height)
            .min(self.max_agent_height)
            .max(base.height);
        NodeFootprint::new(base.width, height)
    }
}

// ─── LayoutConfig ────────────────────────────────────────────────────────────

/// Parameters handed to the layered layout on every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub direction: Direction,
    /// Minimum gap between neighbouring nodes of the same rank.
    pub node_spacing: f64,
    /// Minimum gap between consecutive ranks.
    pub rank_spacing: f64,
    pub footprints: FootprintTable,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Horizontal,
            node_spacing: 50.0,
            rank_spacing: 120.0,
            footprints: FootprintTable::default(),
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

// ─── EngineConfig ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout: LayoutConfig,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(src: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(src)
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_config.rs"]
mod tests;
