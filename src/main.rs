//! foldgraph CLI entry point.
//!
//! Loads a graph document, applies commands, prints the resulting
//! (visible) nodes and edges with their positions.

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use clap::{Parser, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use foldgraph::{Direction, Edge, Engine, EngineConfig, Node, explore};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// Explore a collapsible use-case graph from the command line.
#[derive(Parser, Debug)]
#[command(
    name = "foldgraph",
    version = env!("FOLDGRAPH_VERSION"),
    about = "Collapse/expand a hierarchical graph and print the laid-out visible subgraph"
)]
struct Cli {
    /// Graph document as JSON (reads from stdin if not provided)
    input: Option<String>,

    /// Command script file, one command per line
    #[arg(short = 's', long = "script")]
    script: Option<String>,

    /// Extra command, applied after the script (repeatable)
    #[arg(short = 'c', long = "command")]
    commands: Vec<String>,

    /// Engine config as JSON (partial files are fine)
    #[arg(long = "config")]
    config: Option<String>,

    /// Override layout direction (horizontal/LR, vertical/TB)
    #[arg(short = 'd', long = "direction")]
    direction: Option<String>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Print every node and edge, hidden ones included
    #[arg(long = "all")]
    all: bool,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Debug logging on stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| fail(format!("cannot read '{}': {}", path, e)))
}

fn load_config(cli: &Cli) -> EngineConfig {
    let mut config = match cli.config {
        Some(ref path) => EngineConfig::from_json(&read_file(path))
            .unwrap_or_else(|e| fail(format!("invalid config '{}': {}", path, e))),
        None => EngineConfig::default(),
    };
    if let Some(ref dir) = cli.direction {
        config.layout.direction = dir.parse::<Direction>().unwrap_or_else(|e| fail(e));
    }
    config
}

fn render_json(engine: &Engine, nodes: &[&Node], edges: &[&Edge]) -> String {
    let doc = json!({
        "direction": engine.direction(),
        "nodes": nodes,
        "edges": edges,
        "selection": engine.selection().map(|n| n.id.as_str()),
        "layoutPasses": engine.layout_passes(),
        "lastAction": engine.last_action().map(|a| a.to_string()),
    });
    serde_json::to_string_pretty(&doc).unwrap_or_else(|e| fail(e))
}

fn render_text(engine: &Engine, nodes: &[&Node], edges: &[&Edge]) -> String {
    let mut out = String::new();
    out.push_str(&format!("direction: {}\n", engine.direction()));
    for node in nodes {
        let mut flags = Vec::new();
        if node.child_count > 0 {
            flags.push(if node.collapsed { "collapsed" } else { "expanded" });
        }
        if node.hidden {
            flags.push("hidden");
        }
        out.push_str(&format!(
            "{:<20} {:<8} {:>2} {:>9.1} {:>9.1}  {}\n",
            node.id,
            node.kind,
            node.level,
            node.position.x,
            node.position.y,
            flags.join(",")
        ));
    }
    for edge in edges {
        out.push_str(&format!("{} -> {}\n", edge.source_id, edge.target_id));
    }
    if let Some(selected) = engine.selection() {
        out.push_str(&format!("selected: {}\n", selected.id));
    }
    out
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Read the document from file or stdin
    let text = match cli.input {
        Some(ref path) => read_file(path),
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                fail(format!("cannot read stdin: {}", e));
            }
            buf
        }
    };

    let mut script = cli.script.as_deref().map(read_file).unwrap_or_default();
    for command in &cli.commands {
        script.push('\n');
        script.push_str(command);
    }

    let config = load_config(&cli);
    let engine = explore(&text, &script, config).unwrap_or_else(|e| fail(e));

    let (nodes, edges): (Vec<&Node>, Vec<&Edge>) = if cli.all {
        (engine.nodes().iter().collect(), engine.edges().iter().collect())
    } else {
        (engine.visible_nodes(), engine.visible_edges())
    };
    let mut rendered = match cli.format {
        Format::Json => render_json(&engine, &nodes, &edges),
        Format::Text => render_text(&engine, &nodes, &edges),
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    // Write output to file or stdout
    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, rendered) {
            fail(format!("cannot write '{}': {}", path, e));
        }
    } else {
        print!("{}", rendered);
        if let Err(e) = io::stdout().flush() {
            fail(format!("cannot flush stdout: {}", e));
        }
    }
}
