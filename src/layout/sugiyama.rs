//! Sugiyama layered graph layout.
//!
//! Phases:
//!   1. Working graph (drop dangling edges, self-loops, duplicates)
//!   2. Cycle removal (DFS back-edge reversal)
//!   3. Rank assignment (longest path from sources)
//!   4. Dummy node insertion for edges spanning several ranks
//!   5. Crossing minimisation (barycenter sweeps)
//!   6. Coordinate assignment (rank bands + in-rank packing)
//!
//! Nodes are addressed by their index in the input slice; dummies are
//! appended after the real nodes. Nothing iterates a hash map in an order
//! that reaches the output, so identical input gives identical positions.

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{DfsEvent, depth_first_search};
use tracing::trace;

use super::LayoutEngine;
use super::types::{Direction, LayoutNode};
use crate::config::LayoutConfig;
use crate::model::{Edge, Node, Position};

const DEFAULT_MAX_SWEEPS: usize = 24;

// ─── Working graph ───────────────────────────────────────────────────────────

/// Build the working DiGraph. Node weight = input index, and
/// `NodeIndex::new(i)` addresses input node `i`.
fn build_work_graph(nodes: &[&Node], edges: &[&Edge]) -> DiGraph<usize, ()> {
    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(nodes.len(), edges.len());
    let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        index.insert(node.id.as_str(), graph.add_node(i));
    }

    let mut seen: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
    for edge in edges {
        let (Some(&src), Some(&tgt)) = (
            index.get(edge.source_id.as_str()),
            index.get(edge.target_id.as_str()),
        ) else {
            trace!(edge = %edge.id, "dropping edge with an endpoint outside the visible set");
            continue;
        };
        if src == tgt || !seen.insert((src, tgt)) {
            continue;
        }
        graph.add_edge(src, tgt, ());
    }
    graph
}

// ─── Cycle Removal ───────────────────────────────────────────────────────────

/// Return the edge list with every DFS back edge reversed, deduplicated.
fn remove_cycles(graph: &DiGraph<usize, ()>) -> Vec<(usize, usize)> {
    let mut back_edges: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
    depth_first_search(graph, graph.node_indices(), |event| {
        if let DfsEvent::BackEdge(u, v) = event {
            back_edges.insert((u, v));
        }
    });

    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut dag_edges = Vec::with_capacity(graph.edge_count());
    for edge in graph.raw_edges() {
        let (src, tgt) = (edge.source(), edge.target());
        let oriented = if back_edges.contains(&(src, tgt)) {
            (tgt.index(), src.index())
        } else {
            (src.index(), tgt.index())
        };
        if seen.insert(oriented) {
            dag_edges.push(oriented);
        }
    }
    dag_edges
}

// ─── Rank Assignment ─────────────────────────────────────────────────────────

/// Longest-path ranking: sources sit in rank 0, every edge points to a higher rank.
fn assign_ranks(node_count: usize, dag_edges: &[(usize, usize)]) -> Vec<usize> {
    let mut dag: DiGraph<(), ()> = DiGraph::with_capacity(node_count, dag_edges.len());
    for _ in 0..node_count {
        dag.add_node(());
    }
    for &(src, tgt) in dag_edges {
        dag.add_edge(NodeIndex::new(src), NodeIndex::new(tgt), ());
    }

    let order = toposort(&dag, None).unwrap_or_else(|_| dag.node_indices().collect());
    let mut ranks = vec![0usize; node_count];
    for idx in order {
        let current = ranks[idx.index()];
        for next in dag.neighbors(idx) {
            ranks[next.index()] = ranks[next.index()].max(current + 1);
        }
    }
    ranks
}

// ─── Dummy Node Insertion ────────────────────────────────────────────────────

/// Ranked graph where every edge spans exactly one rank.
struct AugmentedGraph {
    /// Rank per slot; slots `>= real_count` are dummies.
    ranks: Vec<usize>,
    real_count: usize,
    unit_edges: Vec<(usize, usize)>,
    rank_count: usize,
}

impl AugmentedGraph {
    fn is_dummy(&self, slot: usize) -> bool {
        slot >= self.real_count
    }
}

fn insert_dummy_nodes(ranks: Vec<usize>, dag_edges: &[(usize, usize)]) -> AugmentedGraph {
    let real_count = ranks.len();
    let mut ranks = ranks;
    let mut unit_edges = Vec::with_capacity(dag_edges.len());

    for &(src, tgt) in dag_edges {
        let (src_rank, tgt_rank) = (ranks[src], ranks[tgt]);
        if tgt_rank <= src_rank + 1 {
            unit_edges.push((src, tgt));
            continue;
        }
        let mut prev = src;
        for rank in (src_rank + 1)..tgt_rank {
            let dummy = ranks.len();
            ranks.push(rank);
            unit_edges.push((prev, dummy));
            prev = dummy;
        }
        unit_edges.push((prev, tgt));
    }

    let rank_count = ranks.iter().copied().max().map_or(0, |r| r + 1);
    AugmentedGraph {
        ranks,
        real_count,
        unit_edges,
        rank_count,
    }
}

// ─── Crossing Minimisation ───────────────────────────────────────────────────

fn count_crossings(ordering: &[Vec<usize>], successors: &[Vec<usize>]) -> usize {
    let mut position = vec![0usize; successors.len()];
    sync_positions(ordering, &mut position);

    let mut total = 0usize;
    for layer in ordering {
        let mut edges: Vec<(usize, usize)> = Vec::new();
        for &slot in layer {
            for &next in &successors[slot] {
                edges.push((position[slot], position[next]));
            }
        }
        for i in 0..edges.len() {
            for j in (i + 1)..edges.len() {
                let (a0, a1) = edges[i];
                let (b0, b1) = edges[j];
                if (a0 < b0 && a1 > b1) || (a0 > b0 && a1 < b1) {
                    total += 1;
                }
            }
        }
    }
    total
}

/// Reorder one layer by the mean position of its neighbours in the adjacent layer.
///
/// Nodes with no neighbours keep their current position as their key; ties
/// keep the prior order.
fn reorder_layer(layer: &mut [usize], neighbors: &[Vec<usize>], position: &[usize]) {
    let mut scored: Vec<(usize, f64, usize)> = layer
        .iter()
        .map(|&slot| {
            let adjacent = &neighbors[slot];
            let key = if adjacent.is_empty() {
                position[slot] as f64
            } else {
                adjacent.iter().map(|&n| position[n] as f64).sum::<f64>() / adjacent.len() as f64
            };
            (slot, key, position[slot])
        })
        .collect();
    scored.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.2.cmp(&b.2)));
    for (dst, (slot, _, _)) in layer.iter_mut().zip(scored) {
        *dst = slot;
    }
}

fn sync_positions(ordering: &[Vec<usize>], position: &mut [usize]) {
    for layer in ordering {
        for (pos, &slot) in layer.iter().enumerate() {
            position[slot] = pos;
        }
    }
}

fn minimise_crossings(aug: &AugmentedGraph, max_sweeps: usize) -> Vec<Vec<usize>> {
    let slot_count = aug.ranks.len();
    let mut ordering: Vec<Vec<usize>> = vec![Vec::new(); aug.rank_count];
    for (slot, &rank) in aug.ranks.iter().enumerate() {
        ordering[rank].push(slot);
    }

    let mut successors = vec![Vec::new(); slot_count];
    let mut predecessors = vec![Vec::new(); slot_count];
    for &(src, tgt) in &aug.unit_edges {
        successors[src].push(tgt);
        predecessors[tgt].push(src);
    }

    let mut position = vec![0usize; slot_count];
    sync_positions(&ordering, &mut position);

    let mut best = ordering.clone();
    let mut best_crossings = count_crossings(&ordering, &successors);

    for _sweep in 0..max_sweeps {
        if best_crossings == 0 {
            break;
        }
        for layer_idx in 1..ordering.len() {
            reorder_layer(&mut ordering[layer_idx], &predecessors, &position);
            sync_positions(&ordering, &mut position);
        }
        for layer_idx in (0..ordering.len().saturating_sub(1)).rev() {
            reorder_layer(&mut ordering[layer_idx], &successors, &position);
            sync_positions(&ordering, &mut position);
        }

        let crossings = count_crossings(&ordering, &successors);
        if crossings >= best_crossings {
            break;
        }
        best_crossings = crossings;
        best = ordering.clone();
    }

    trace!(crossings = best_crossings, "crossing minimisation done");
    best
}

// ─── Coordinate Assignment ───────────────────────────────────────────────────

/// Extent of a slot as (along the rank axis, across it).
fn extents(slot: usize, aug: &AugmentedGraph, sizes: &[(f64, f64)], direction: Direction) -> (f64, f64) {
    if aug.is_dummy(slot) {
        return (0.0, 0.0);
    }
    let (width, height) = sizes[slot];
    match direction {
        Direction::Horizontal => (width, height),
        Direction::Vertical => (height, width),
    }
}

/// Returns (primary, secondary) top-left offsets per slot.
fn assign_coordinates(
    ordering: &[Vec<usize>],
    aug: &AugmentedGraph,
    sizes: &[(f64, f64)],
    config: &LayoutConfig,
) -> Vec<(f64, f64)> {
    let direction = config.direction;
    let mut coords = vec![(0.0f64, 0.0f64); aug.ranks.len()];

    // Rank bands along the primary axis.
    let mut band_start = 0.0f64;
    for layer in ordering {
        let thickness = layer
            .iter()
            .map(|&slot| extents(slot, aug, sizes, direction).0)
            .fold(0.0f64, f64::max);
        for &slot in layer {
            let primary = extents(slot, aug, sizes, direction).0;
            coords[slot].0 = band_start + (thickness - primary) / 2.0;
        }
        band_start += thickness + config.rank_spacing;
    }

    // Pack each rank along the secondary axis, centred on the widest rank.
    let totals: Vec<f64> = ordering
        .iter()
        .map(|layer| {
            let sum: f64 = layer
                .iter()
                .map(|&slot| extents(slot, aug, sizes, direction).1)
                .sum();
            sum + layer.len().saturating_sub(1) as f64 * config.node_spacing
        })
        .collect();
    let widest = totals.iter().copied().fold(0.0f64, f64::max);

    for (layer, total) in ordering.iter().zip(&totals) {
        let mut cursor = (widest - total) / 2.0;
        for &slot in layer {
            coords[slot].1 = cursor;
            cursor += extents(slot, aug, sizes, direction).1 + config.node_spacing;
        }
    }

    align_ranks(ordering, aug, sizes, config, &mut coords);
    coords
}

/// Shift whole ranks so children sit under their parents on average, then
/// pull everything back to a zero minimum. Moving a rank as a unit keeps its
/// internal spacing intact.
fn align_ranks(
    ordering: &[Vec<usize>],
    aug: &AugmentedGraph,
    sizes: &[(f64, f64)],
    config: &LayoutConfig,
    coords: &mut [(f64, f64)],
) {
    let direction = config.direction;

    // Forward: each rank follows its predecessors.
    for rank in 1..ordering.len() {
        let pairs: Vec<(usize, usize)> = aug
            .unit_edges
            .iter()
            .filter(|&&(src, tgt)| aug.ranks[tgt] == rank && aug.ranks[src] + 1 == rank)
            .map(|&(src, tgt)| (tgt, src))
            .collect();
        shift_rank(&ordering[rank], &pairs, aug, sizes, direction, coords);
    }

    // Backward: source ranks follow their successors.
    for rank in (0..ordering.len().saturating_sub(1)).rev() {
        let pairs: Vec<(usize, usize)> = aug
            .unit_edges
            .iter()
            .filter(|&&(src, tgt)| aug.ranks[src] == rank && aug.ranks[tgt] == rank + 1)
            .copied()
            .collect();
        shift_rank(&ordering[rank], &pairs, aug, sizes, direction, coords);
    }

    let min_secondary = coords
        .iter()
        .map(|c| c.1)
        .fold(f64::INFINITY, f64::min);
    if min_secondary.is_finite() {
        for c in coords.iter_mut() {
            c.1 -= min_secondary;
        }
    }
}

/// Move every slot of `layer` by the mean centre offset over `pairs`
/// (`(own, other)`: own slot in this layer, neighbour in the adjacent one).
fn shift_rank(
    layer: &[usize],
    pairs: &[(usize, usize)],
    aug: &AugmentedGraph,
    sizes: &[(f64, f64)],
    direction: Direction,
    coords: &mut [(f64, f64)],
) {
    if pairs.is_empty() {
        return;
    }
    let center = |slot: usize| coords[slot].1 + extents(slot, aug, sizes, direction).1 / 2.0;
    let shift = pairs
        .iter()
        .map(|&(own, other)| center(other) - center(own))
        .sum::<f64>()
        / pairs.len() as f64;
    for &slot in layer {
        coords[slot].1 += shift;
    }
}

// ─── SugiyamaLayout ──────────────────────────────────────────────────────────

/// Layered (rank-based) layout for the visible subgraph.
#[derive(Debug, Clone)]
pub struct SugiyamaLayout {
    /// Upper bound on down+up barycenter sweep pairs.
    pub max_sweeps: usize,
}

impl Default for SugiyamaLayout {
    fn default() -> Self {
        Self {
            max_sweeps: DEFAULT_MAX_SWEEPS,
        }
    }
}

impl SugiyamaLayout {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutEngine for SugiyamaLayout {
    fn layout(&self, nodes: &[&Node], edges: &[&Edge], config: &LayoutConfig) -> Vec<LayoutNode> {
        if nodes.is_empty() {
            return Vec::new();
        }

        let work = build_work_graph(nodes, edges);
        let dag_edges = remove_cycles(&work);
        let ranks = assign_ranks(nodes.len(), &dag_edges);
        let aug = insert_dummy_nodes(ranks, &dag_edges);
        let ordering = minimise_crossings(&aug, self.max_sweeps);

        let sizes: Vec<(f64, f64)> = nodes
            .iter()
            .map(|node| {
                let fp = config.footprints.for_node(node);
                (fp.width, fp.height)
            })
            .collect();
        let coords = assign_coordinates(&ordering, &aug, &sizes, config);

        let mut order_of = vec![0usize; aug.ranks.len()];
        for layer in &ordering {
            for (order, &slot) in layer.iter().enumerate() {
                order_of[slot] = order;
            }
        }

        nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| {
                let (primary, secondary) = coords[slot];
                let position = match config.direction {
                    Direction::Horizontal => Position::new(primary, secondary),
                    Direction::Vertical => Position::new(secondary, primary),
                };
                let (width, height) = sizes[slot];
                LayoutNode {
                    id: node.id.clone(),
                    rank: aug.ranks[slot],
                    order: order_of[slot],
                    width,
                    height,
                    position,
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_sugiyama.rs"]
mod tests;
