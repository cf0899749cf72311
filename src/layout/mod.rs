//! Layout engine adapter — positions for the visible subgraph.
//!
//! `LayoutEngine` is the seam: the scheduler only knows this trait, so any
//! layered drawing implementation can be swapped in. `SugiyamaLayout` is the
//! default.

pub mod sugiyama;
pub mod types;

pub use sugiyama::SugiyamaLayout;
pub use types::{Direction, LayoutNode};

use crate::config::LayoutConfig;
use crate::model::{Edge, Node};

/// Computes positions for a set of visible nodes.
///
/// Implementations must be deterministic for identical input, must return
/// exactly one `LayoutNode` per input node, and must ignore (not reject)
/// edges whose endpoints are not in `nodes`.
pub trait LayoutEngine {
    fn layout(&self, nodes: &[&Node], edges: &[&Edge], config: &LayoutConfig) -> Vec<LayoutNode>;
}

impl<T: LayoutEngine + ?Sized> LayoutEngine for Box<T> {
    fn layout(&self, nodes: &[&Node], edges: &[&Edge], config: &LayoutConfig) -> Vec<LayoutNode> {
        (**self).layout(nodes, edges, config)
    }
}
