//! Error types surfaced by the engine facade.

use thiserror::Error;

/// The input graph is malformed. Rejects the whole load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("duplicate node id '{0}'")]
    DuplicateNodeId(String),

    #[error("duplicate edge id '{0}'")]
    DuplicateEdgeId(String),

    #[error("edge '{edge}' references unknown node '{endpoint}'")]
    DanglingEdge { edge: String, endpoint: String },

    #[error("node '{node}' declares parent '{parent}', which does not exist")]
    MissingParent { node: String, parent: String },

    #[error("root node '{0}' (level 0) must not declare a parent")]
    RootWithParent(String),

    #[error("node '{0}' is below level 0 but has no parent")]
    OrphanNode(String),

    #[error("node '{node}' at level {level} sits under parent at level {parent_level}")]
    LevelMismatch {
        node: String,
        level: u32,
        parent_level: u32,
    },

    #[error("parent chain of node '{0}' loops back on itself")]
    CyclicParent(String),
}

/// A command referenced a node id that is not in the current graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("node '{id}' not found")]
pub struct NotFoundError {
    pub id: String,
}

impl NotFoundError {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Anything the engine facade can reject.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

/// A line of a command script could not be understood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct CommandParseError {
    pub line: usize,
    pub message: String,
}
