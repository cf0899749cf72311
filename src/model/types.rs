//! Graph entities: NodeKind, Position, Node, Edge.
//!
//! Plain data, no behaviour beyond constructors. Field names serialize in
//! camelCase so JSON consumers see `parentId`, `childCount`, `sourceId`, ...

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── NodeKind ────────────────────────────────────────────────────────────────

/// Record type of a node. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    UseCase,
    Trigger,
    Agent,
    Tool,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::UseCase => "UseCase",
            NodeKind::Trigger => "Trigger",
            NodeKind::Agent => "Agent",
            NodeKind::Tool => "Tool",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

// ─── Position ────────────────────────────────────────────────────────────────

/// Top-left corner of a node box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ─── Node ────────────────────────────────────────────────────────────────────

fn default_collapsed() -> bool {
    true
}

/// A record in the use-case hierarchy.
///
/// `id`, `kind`, `level` and `parent_id` never change after load. `collapsed`
/// and `hidden` are owned by the visibility reducer, `position` by the layout
/// scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub level: u32,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub position: Position,
    /// True when this node's direct children are hidden.
    #[serde(default = "default_collapsed")]
    pub collapsed: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub child_count: usize,
    /// Domain attributes (label, description, instructions, ...), passed through untouched.
    #[serde(default)]
    pub payload: Value,
}

impl Node {
    /// A freshly loaded node: collapsed, hidden unless it is a root.
    pub fn new(id: impl Into<String>, kind: NodeKind, level: u32, parent_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            kind,
            level,
            parent_id: parent_id.map(str::to_owned),
            position: Position::default(),
            collapsed: true,
            hidden: level > 0,
            child_count: 0,
            payload: Value::Null,
        }
    }

    /// Create a level-0 use-case node.
    pub fn root(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::UseCase, 0, None)
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    /// Display label from the payload, falling back to the id.
    pub fn label(&self) -> &str {
        self.payload
            .get("label")
            .and_then(Value::as_str)
            .unwrap_or(&self.id)
    }
}

// ─── Edge ────────────────────────────────────────────────────────────────────

/// A directed relation between two nodes. `hidden` is derived from endpoint visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    #[serde(default)]
    pub hidden: bool,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            hidden: false,
        }
    }

    /// Build an edge whose id is derived from its endpoints (`source->target`).
    pub fn between(source_id: &str, target_id: &str) -> Self {
        Self::new(format!("{source_id}->{target_id}"), source_id, target_id)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_model_types.rs"]
mod tests;
