//! foldgraph — collapsible hierarchical graph explorer.
//!
//! Takes a flat node+edge list describing a use-case forest
//! (use cases → triggers/agents → tools), keeps per-node collapse state,
//! derives which nodes and edges are visible, and lays the visible subgraph
//! out with a layered (rank-based) drawing. The rendering surface only reads
//! the annotated node/edge lists back.
//!
//! Public API: `Engine`, plus `explore()` for the load-then-script path used
//! by the CLI and the WASM bindings.

pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod model;
pub mod scheduler;
pub mod visibility;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{EngineConfig, LayoutConfig, NodeFootprint};
pub use engine::{Action, AuditEntry, Engine};
pub use error::{CommandParseError, EngineError, NotFoundError, StructuralError};
pub use layout::{Direction, LayoutEngine, LayoutNode, SugiyamaLayout};
pub use model::{Edge, GraphDocument, GraphModel, Node, NodeKind, Position};
pub use visibility::Command;

/// Load a JSON graph document and run a command script against it.
pub fn explore(src: &str, script: &str, config: EngineConfig) -> Result<Engine, String> {
    let document = GraphDocument::from_json(src).map_err(|e| format!("invalid graph document: {e}"))?;
    let actions = commands::parse_script(script).map_err(|e| e.to_string())?;

    let mut engine = Engine::with_config(config);
    engine.load_document(document).map_err(|e| e.to_string())?;
    for action in actions {
        engine.dispatch(action).map_err(|e| e.to_string())?;
    }
    Ok(engine)
}
