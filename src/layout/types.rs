//! Layout types: Direction, LayoutNode.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Position;

// ─── Direction ───────────────────────────────────────────────────────────────

/// Primary axis along which ranks are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left-to-right: ranks are columns.
    #[default]
    Horizontal,
    /// Top-to-bottom: ranks are rows.
    Vertical,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "horizontal" | "lr" => Ok(Direction::Horizontal),
            "vertical" | "tb" | "td" => Ok(Direction::Vertical),
            other => Err(format!(
                "unknown direction '{other}'; use horizontal (LR) or vertical (TB)"
            )),
        }
    }
}

// ─── LayoutNode ──────────────────────────────────────────────────────────────

/// A visible node with its computed rank, in-rank order, footprint and position.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: String,
    pub rank: usize,
    pub order: usize,
    pub width: f64,
    pub height: f64,
    pub position: Position,
}

impl LayoutNode {
    pub fn new(id: impl Into<String>, rank: usize, order: usize, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            rank,
            order,
            width,
            height,
            position: Position::default(),
        }
    }

    pub fn right(&self) -> f64 {
        self.position.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.height
    }

    /// True if the two boxes share any interior area.
    pub fn overlaps(&self, other: &LayoutNode) -> bool {
        self.position.x < other.right()
            && other.position.x < self.right()
            && self.position.y < other.bottom()
            && other.position.y < self.bottom()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_types.rs"]
mod tests;
