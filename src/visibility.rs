//! Visibility state machine.
//!
//! `reduce` is a pure function of (snapshot, command): it never touches
//! positions and never triggers layout itself. It only reports whether the
//! command explicitly asks for a layout pass.
//!
//! Visibility rule: a root is never hidden; any other node is hidden iff its
//! parent is hidden or collapsed. Subtrees re-open one level at a time: on
//! collapse every descendant that has children is forced back to collapsed.

use crate::error::NotFoundError;
use crate::layout::Direction;
use crate::model::{Edge, GraphModel, Hierarchy, Node};

// ─── Command ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ToggleNode(String),
    ExpandAll,
    CollapseAll,
    SetDirection(Direction),
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::ToggleNode(id) => write!(f, "toggle_node({id})"),
            Command::ExpandAll => f.write_str("expand_all"),
            Command::CollapseAll => f.write_str("collapse_all"),
            Command::SetDirection(direction) => write!(f, "set_direction({direction})"),
        }
    }
}

// ─── Reduction ───────────────────────────────────────────────────────────────

/// Output of one command: the next node set plus layout hints.
#[derive(Debug, Clone)]
pub struct Reduction {
    pub nodes: Vec<Node>,
    /// The command asks for a layout pass regardless of collapse-state changes.
    pub layout_requested: bool,
    /// New layout axis, for `SetDirection`.
    pub direction: Option<Direction>,
}

/// Apply `command` to the snapshot. Unknown ids fail without partial effects.
pub fn reduce(model: &GraphModel, command: &Command) -> Result<Reduction, NotFoundError> {
    let hierarchy = model.hierarchy();
    let mut nodes = model.nodes().to_vec();
    let mut layout_requested = false;
    let mut direction = None;

    match command {
        Command::ToggleNode(id) => {
            let slot = hierarchy.slot(id).ok_or_else(|| NotFoundError::new(id.as_str()))?;
            toggle(hierarchy, &mut nodes, slot);
        }
        Command::ExpandAll => {
            for node in &mut nodes {
                node.collapsed = false;
                node.hidden = false;
            }
            layout_requested = true;
        }
        Command::CollapseAll => {
            for node in &mut nodes {
                node.collapsed = true;
                node.hidden = node.level > 0;
            }
            layout_requested = true;
        }
        Command::SetDirection(d) => {
            direction = Some(*d);
            layout_requested = true;
        }
    }

    Ok(Reduction {
        nodes,
        layout_requested,
        direction,
    })
}

fn toggle(hierarchy: &Hierarchy, nodes: &mut [Node], slot: usize) {
    nodes[slot].collapsed = !nodes[slot].collapsed;
    if nodes[slot].child_count == 0 {
        return;
    }

    if nodes[slot].collapsed {
        for d in hierarchy.descendant_slots(slot) {
            nodes[d].hidden = true;
            if nodes[d].child_count > 0 {
                nodes[d].collapsed = true;
            }
        }
    } else {
        // Direct children take the parent's visibility; anything deeper is
        // re-derived, which leaves it hidden behind a collapsed child.
        rederive_below(hierarchy, nodes, slot);
    }
}

/// Recompute `hidden` for every descendant of `slot` from the visibility rule.
fn rederive_below(hierarchy: &Hierarchy, nodes: &mut [Node], slot: usize) {
    let mut stack = vec![slot];
    while let Some(parent) = stack.pop() {
        let hide = nodes[parent].hidden || nodes[parent].collapsed;
        for &child in hierarchy.child_slots(parent) {
            nodes[child].hidden = hide;
            stack.push(child);
        }
    }
}

// ─── Derivations ─────────────────────────────────────────────────────────────

/// Recompute `hidden` for the whole forest from the collapse flags alone.
pub fn derive_hidden(hierarchy: &Hierarchy, nodes: &mut [Node]) {
    for slot in 0..nodes.len() {
        if hierarchy.parent_slot(slot).is_none() {
            nodes[slot].hidden = false;
            rederive_below(hierarchy, nodes, slot);
        }
    }
}

/// Edge visibility from endpoint visibility: hidden unless both ends are visible.
pub fn derive_edge_visibility(hierarchy: &Hierarchy, nodes: &[Node], edges: &[Edge]) -> Vec<Edge> {
    let visible = |id: &str| hierarchy.slot(id).is_some_and(|slot| !nodes[slot].hidden);
    edges
        .iter()
        .map(|edge| Edge {
            hidden: !(visible(&edge.source_id) && visible(&edge.target_id)),
            ..edge.clone()
        })
        .collect()
}

/// Snapshot with node and edge visibility brought in line with the collapse flags.
pub fn normalize(model: &GraphModel) -> GraphModel {
    let mut nodes = model.nodes().to_vec();
    derive_hidden(model.hierarchy(), &mut nodes);
    let edges = derive_edge_visibility(model.hierarchy(), &nodes, model.edges());
    model.with_state(nodes, edges)
}

/// True when every node and edge `hidden` flag matches the visibility rule.
pub fn is_consistent(model: &GraphModel) -> bool {
    let hierarchy = model.hierarchy();
    let nodes = model.nodes();
    let nodes_ok = (0..nodes.len()).all(|slot| match hierarchy.parent_slot(slot) {
        None => !nodes[slot].hidden,
        Some(p) => nodes[slot].hidden == (nodes[p].hidden || nodes[p].collapsed),
    });
    let edges_ok = model
        .edges()
        .iter()
        .zip(derive_edge_visibility(hierarchy, nodes, model.edges()))
        .all(|(actual, expected)| actual.hidden == expected.hidden);
    nodes_ok && edges_ok
}

#[cfg(test)]
#[path = "../tests/rust/test_visibility.rs"]
mod tests;
