//! Graph model — entities and the structural index over them.

pub mod document;
pub mod graph;
pub mod types;

pub use document::GraphDocument;
pub use graph::{GraphModel, Hierarchy};
pub use types::{Edge, Node, NodeKind, Position};
