//! Engine facade — the single owner of the current snapshot.
//!
//! Every command runs the same pipeline:
//!   visibility reducer → edge visibility → layout scheduler → publish.
//! Commands are applied one at a time; a failed command leaves the current
//! snapshot untouched.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info};

use crate::config::{EngineConfig, LayoutConfig};
use crate::error::{EngineError, NotFoundError};
use crate::layout::{Direction, LayoutEngine, SugiyamaLayout};
use crate::model::{Edge, GraphDocument, GraphModel, Node};
use crate::scheduler::LayoutScheduler;
use crate::visibility::{self, Command};

// ─── Action ──────────────────────────────────────────────────────────────────

/// Anything the rendering surface can ask the engine to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Apply(Command),
    /// Show the detail view of a node, or clear it with `None`.
    Select(Option<String>),
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        Action::Apply(command)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Apply(command) => command.fmt(f),
            Action::Select(Some(id)) => write!(f, "select_node({id})"),
            Action::Select(None) => f.write_str("select_node(none)"),
        }
    }
}

// ─── AuditEntry ──────────────────────────────────────────────────────────────

/// Last applied action and when it was applied. Debugging aid only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub action: String,
    pub at: DateTime<Utc>,
}

impl std::fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} @ {}",
            self.action,
            self.at.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

pub struct Engine<L: LayoutEngine = SugiyamaLayout> {
    config: EngineConfig,
    layout: L,
    model: GraphModel,
    scheduler: LayoutScheduler,
    selected: Option<String>,
    last_action: Option<AuditEntry>,
}

impl Default for Engine<SugiyamaLayout> {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine<SugiyamaLayout> {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_layout(config, SugiyamaLayout::default())
    }
}

impl<L: LayoutEngine> Engine<L> {
    /// Engine driven by a custom layout implementation.
    pub fn with_layout(config: EngineConfig, layout: L) -> Self {
        Self {
            config,
            layout,
            model: GraphModel::empty(),
            scheduler: LayoutScheduler::new(),
            selected: None,
            last_action: None,
        }
    }

    // ── Loading ──────────────────────────────────────────────────────────────

    /// Replace the whole graph. On a structural error the previous graph stays.
    ///
    /// Incoming `hidden` flags are re-derived from the collapse flags, and
    /// the new graph is always laid out.
    pub fn load_graph(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<(), EngineError> {
        let model = GraphModel::build(nodes, edges)?;
        let model = visibility::normalize(&model);

        self.scheduler.reset();
        self.scheduler.request_layout();
        let scheduled = self.scheduler.schedule(model, &self.layout, &self.config.layout);
        self.model = scheduled.model;
        self.selected = None;

        info!(
            nodes = self.model.node_count(),
            edges = self.model.edge_count(),
            "graph loaded"
        );
        self.record(format!(
            "load_graph({} nodes, {} edges)",
            self.model.node_count(),
            self.model.edge_count()
        ));
        Ok(())
    }

    pub fn load_document(&mut self, document: GraphDocument) -> Result<(), EngineError> {
        let (nodes, edges) = document.into_parts();
        self.load_graph(nodes, edges)
    }

    // ── Commands ─────────────────────────────────────────────────────────────

    pub fn toggle_node(&mut self, id: &str) -> Result<(), EngineError> {
        self.apply(Command::ToggleNode(id.to_string()))
    }

    pub fn expand_all(&mut self) -> Result<(), EngineError> {
        self.apply(Command::ExpandAll)
    }

    pub fn collapse_all(&mut self) -> Result<(), EngineError> {
        self.apply(Command::CollapseAll)
    }

    pub fn set_direction(&mut self, direction: Direction) -> Result<(), EngineError> {
        self.apply(Command::SetDirection(direction))
    }

    /// Run one visibility command through the full pipeline.
    pub fn apply(&mut self, command: Command) -> Result<(), EngineError> {
        let reduction = visibility::reduce(&self.model, &command)?;

        if let Some(direction) = reduction.direction {
            self.config.layout.direction = direction;
        }
        if reduction.layout_requested {
            self.scheduler.request_layout();
        }

        let edges = visibility::derive_edge_visibility(
            self.model.hierarchy(),
            &reduction.nodes,
            self.model.edges(),
        );
        let next = self.model.with_state(reduction.nodes, edges);
        let scheduled = self.scheduler.schedule(next, &self.layout, &self.config.layout);
        self.model = scheduled.model;

        debug!(%command, relaid = scheduled.relaid, "command applied");
        self.record(command.to_string());
        Ok(())
    }

    /// Record which node's detail view to show. No visibility or layout effect.
    pub fn select_node(&mut self, id: Option<&str>) -> Result<(), EngineError> {
        if let Some(id) = id {
            if self.model.node(id).is_none() {
                return Err(NotFoundError::new(id).into());
            }
        }
        self.selected = id.map(str::to_owned);
        self.record(Action::Select(self.selected.clone()).to_string());
        Ok(())
    }

    pub fn dispatch(&mut self, action: Action) -> Result<(), EngineError> {
        match action {
            Action::Apply(command) => self.apply(command),
            Action::Select(id) => self.select_node(id.as_deref()),
        }
    }

    fn record(&mut self, action: String) {
        self.last_action = Some(AuditEntry {
            action,
            at: Utc::now(),
        });
    }

    // ── Read side ────────────────────────────────────────────────────────────

    pub fn visible_nodes(&self) -> Vec<&Node> {
        self.model.visible_nodes().collect()
    }

    pub fn visible_edges(&self) -> Vec<&Edge> {
        self.model.visible_edges().collect()
    }

    pub fn selection(&self) -> Option<&Node> {
        self.selected.as_deref().and_then(|id| self.model.node(id))
    }

    pub fn nodes(&self) -> &[Node] {
        self.model.nodes()
    }

    pub fn edges(&self) -> &[Edge] {
        self.model.edges()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.model.node(id)
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn direction(&self) -> Direction {
        self.config.layout.direction
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.config.layout
    }

    /// Layout passes actually run since the engine was created.
    pub fn layout_passes(&self) -> u64 {
        self.scheduler.passes()
    }

    pub fn last_action(&self) -> Option<&AuditEntry> {
        self.last_action.as_ref()
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_engine.rs"]
mod tests;
