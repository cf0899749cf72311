//! WASM bindings for foldgraph.
//!
//! Exposes a `GraphExplorer` class to JavaScript via wasm-bindgen. Node and
//! edge lists cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::{Direction, Engine, EngineConfig, EngineError, GraphDocument};

fn js_error(e: EngineError) -> JsError {
    JsError::new(&e.to_string())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&e.to_string()))
}

#[wasm_bindgen]
pub struct GraphExplorer {
    engine: Engine,
}

#[wasm_bindgen]
impl GraphExplorer {
    /// Build an explorer from a graph document (`{"nodes": [...], "edges": [...]}`).
    #[wasm_bindgen(constructor)]
    pub fn new(document: &str) -> Result<GraphExplorer, JsError> {
        let document =
            GraphDocument::from_json(document).map_err(|e| JsError::new(&e.to_string()))?;
        let mut engine = Engine::with_config(EngineConfig::default());
        engine.load_document(document).map_err(js_error)?;
        Ok(Self { engine })
    }

    #[wasm_bindgen(js_name = "toggleNode")]
    pub fn toggle_node(&mut self, id: &str) -> Result<(), JsError> {
        self.engine.toggle_node(id).map_err(js_error)
    }

    #[wasm_bindgen(js_name = "expandAll")]
    pub fn expand_all(&mut self) -> Result<(), JsError> {
        self.engine.expand_all().map_err(js_error)
    }

    #[wasm_bindgen(js_name = "collapseAll")]
    pub fn collapse_all(&mut self) -> Result<(), JsError> {
        self.engine.collapse_all().map_err(js_error)
    }

    /// `direction`: "horizontal" / "LR" or "vertical" / "TB".
    #[wasm_bindgen(js_name = "setDirection")]
    pub fn set_direction(&mut self, direction: &str) -> Result<(), JsError> {
        let direction = direction
            .parse::<Direction>()
            .map_err(|e| JsError::new(&e))?;
        self.engine.set_direction(direction).map_err(js_error)
    }

    /// Select a node by id; an empty string clears the selection.
    #[wasm_bindgen(js_name = "selectNode")]
    pub fn select_node(&mut self, id: &str) -> Result<(), JsError> {
        let id = if id.is_empty() { None } else { Some(id) };
        self.engine.select_node(id).map_err(js_error)
    }

    #[wasm_bindgen(js_name = "visibleNodes")]
    pub fn visible_nodes(&self) -> Result<String, JsError> {
        to_json(&self.engine.visible_nodes())
    }

    #[wasm_bindgen(js_name = "visibleEdges")]
    pub fn visible_edges(&self) -> Result<String, JsError> {
        to_json(&self.engine.visible_edges())
    }

    /// Selected node as JSON, or `undefined`.
    pub fn selection(&self) -> Result<Option<String>, JsError> {
        self.engine.selection().map(to_json).transpose()
    }

    #[wasm_bindgen(js_name = "lastAction")]
    pub fn last_action(&self) -> Option<String> {
        self.engine.last_action().map(|a| a.to_string())
    }
}
