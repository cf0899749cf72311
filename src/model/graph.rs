//! GraphModel — the node/edge collections plus a structural index.
//!
//! Built once per data load. The parent/child forest is validated with a
//! petgraph DiGraph (parent → child) and then flattened into slot-indexed
//! parent/children tables so reducers can walk subtrees without rescanning
//! the node list.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use super::types::{Edge, Node};
use crate::error::StructuralError;

// ─── Hierarchy ───────────────────────────────────────────────────────────────

/// Immutable parent/child index. Slot `i` is the `i`-th node of the load.
#[derive(Debug, Default)]
pub struct Hierarchy {
    slots: HashMap<String, usize>,
    ids: Vec<String>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
}

impl Hierarchy {
    fn build(nodes: &[Node]) -> Result<Self, StructuralError> {
        let mut slots: HashMap<String, usize> = HashMap::with_capacity(nodes.len());
        for (slot, node) in nodes.iter().enumerate() {
            if slots.insert(node.id.clone(), slot).is_some() {
                return Err(StructuralError::DuplicateNodeId(node.id.clone()));
            }
        }

        let mut parents: Vec<Option<usize>> = Vec::with_capacity(nodes.len());
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut tree: DiGraph<usize, ()> = DiGraph::with_capacity(nodes.len(), nodes.len());
        let tree_index: Vec<NodeIndex> = (0..nodes.len()).map(|slot| tree.add_node(slot)).collect();

        for (slot, node) in nodes.iter().enumerate() {
            let parent = match (&node.parent_id, node.level) {
                (None, 0) => None,
                (None, _) => return Err(StructuralError::OrphanNode(node.id.clone())),
                (Some(_), 0) => return Err(StructuralError::RootWithParent(node.id.clone())),
                (Some(parent_id), _) => match slots.get(parent_id) {
                    Some(&p) => Some(p),
                    None => {
                        return Err(StructuralError::MissingParent {
                            node: node.id.clone(),
                            parent: parent_id.clone(),
                        });
                    }
                },
            };
            if let Some(p) = parent {
                children[p].push(slot);
                tree.add_edge(tree_index[p], tree_index[slot], ());
            }
            parents.push(parent);
        }

        if let Err(cycle) = toposort(&tree, None) {
            let slot = tree[cycle.node_id()];
            return Err(StructuralError::CyclicParent(nodes[slot].id.clone()));
        }

        for (slot, node) in nodes.iter().enumerate() {
            if let Some(p) = parents[slot] {
                let parent_level = nodes[p].level;
                if node.level != parent_level + 1 {
                    return Err(StructuralError::LevelMismatch {
                        node: node.id.clone(),
                        level: node.level,
                        parent_level,
                    });
                }
            }
        }

        Ok(Self {
            slots,
            ids: nodes.iter().map(|n| n.id.clone()).collect(),
            parents,
            children,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Slot of `id`, if it is part of the load.
    pub fn slot(&self, id: &str) -> Option<usize> {
        self.slots.get(id).copied()
    }

    pub fn id(&self, slot: usize) -> &str {
        &self.ids[slot]
    }

    pub fn parent_slot(&self, slot: usize) -> Option<usize> {
        self.parents[slot]
    }

    pub fn child_slots(&self, slot: usize) -> &[usize] {
        &self.children[slot]
    }

    /// All transitive descendants of `slot`, pre-order, excluding `slot` itself.
    ///
    /// Uses an explicit stack, so cost is linear in the subtree size.
    pub fn descendant_slots(&self, slot: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.children[slot].iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children[current].iter().rev().copied());
        }
        out
    }

    /// True if `a` lies strictly below `b` in the forest.
    pub fn is_descendant_slot(&self, a: usize, b: usize) -> bool {
        let mut current = self.parents[a];
        while let Some(p) = current {
            if p == b {
                return true;
            }
            current = self.parents[p];
        }
        false
    }
}

// ─── GraphModel ──────────────────────────────────────────────────────────────

/// One immutable snapshot of the annotated node and edge sets.
///
/// Snapshots produced by commands share the same `Hierarchy`; only the node
/// and edge vectors are copied.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    hierarchy: Arc<Hierarchy>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GraphModel {
    /// An empty graph (nothing loaded yet).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate and index a freshly loaded node/edge list.
    ///
    /// `child_count` is recomputed from the parent pointers; every other
    /// node attribute is kept as given.
    pub fn build(mut nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, StructuralError> {
        let hierarchy = Hierarchy::build(&nodes)?;

        let mut edge_ids: HashSet<&str> = HashSet::with_capacity(edges.len());
        for edge in &edges {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(StructuralError::DuplicateEdgeId(edge.id.clone()));
            }
            for endpoint in [&edge.source_id, &edge.target_id] {
                if hierarchy.slot(endpoint).is_none() {
                    return Err(StructuralError::DanglingEdge {
                        edge: edge.id.clone(),
                        endpoint: endpoint.clone(),
                    });
                }
            }
        }

        for (slot, node) in nodes.iter_mut().enumerate() {
            node.child_count = hierarchy.child_slots(slot).len();
        }

        Ok(Self {
            hierarchy: Arc::new(hierarchy),
            nodes,
            edges,
        })
    }

    /// Next snapshot over the same structure.
    pub(crate) fn with_state(&self, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        debug_assert_eq!(nodes.len(), self.nodes.len());
        Self {
            hierarchy: Arc::clone(&self.hierarchy),
            nodes,
            edges,
        }
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.hierarchy.slot(id).map(|slot| &self.nodes[slot])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Direct children of `id`, in load order. Empty for leaves and unknown ids.
    pub fn children_of(&self, id: &str) -> Vec<&Node> {
        match self.hierarchy.slot(id) {
            None => Vec::new(),
            Some(slot) => self
                .hierarchy
                .child_slots(slot)
                .iter()
                .map(|&c| &self.nodes[c])
                .collect(),
        }
    }

    /// Owning node of `id`; `None` for roots and unknown ids.
    pub fn parent_of(&self, id: &str) -> Option<&Node> {
        let slot = self.hierarchy.slot(id)?;
        self.hierarchy.parent_slot(slot).map(|p| &self.nodes[p])
    }

    /// True if `a` lies strictly below `b`. Unknown ids are never descendants.
    pub fn is_descendant(&self, a: &str, b: &str) -> bool {
        match (self.hierarchy.slot(a), self.hierarchy.slot(b)) {
            (Some(a), Some(b)) => self.hierarchy.is_descendant_slot(a, b),
            _ => false,
        }
    }

    pub fn visible_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| !n.hidden)
    }

    pub fn visible_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| !e.hidden)
    }

    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_model_graph.rs"]
mod tests;
