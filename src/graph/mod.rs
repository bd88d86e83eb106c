//! # Concept Graph
//!
//! In-memory graph: dense node list, edge list, and a symmetric adjacency
//! map from node id to its ordered neighbour list.
//!
//! ## Invariants
//!
//! - `nodes[i].id == NodeId(i)` (insertion order is identifier order).
//! - Every id in `adjacency` refers to an existing node.
//! - Adjacency is symmetric: `b ∈ adjacency[a]` ⇔ `a ∈ adjacency[b]`,
//!   with multiplicity (parallel edges appear once per edge).
//!
//! ## Limitations
//!
//! - **Fixed topology**: edges are only added while building; there is no
//!   removal API.
//! - **Parallel edges**: the builder does not de-duplicate, so
//!   `edge_weight(a, b)` reports the first edge recorded between a pair.

pub mod builder;
pub mod layout;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::model::*;

pub use builder::{GraphBuilder, build_graph};
pub use layout::{layout, LayoutReport};

/// Neighbour list. Generated nodes have a handful of edges, so most lists
/// never leave the inline buffer.
pub type Neighbors = SmallVec<[NodeId; 8]>;

/// The concept graph.
#[derive(Debug, Clone, Default)]
pub struct ConceptGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    adjacency: HashMap<NodeId, Neighbors>,
    /// Unordered pair → weight of the first edge recorded for that pair.
    weights: HashMap<(NodeId, NodeId), f32>,
}

impl ConceptGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with `count` nodes at the origin and no edges.
    pub fn with_nodes(count: usize) -> Self {
        let nodes = (0..count).map(|i| Node::new(NodeId::from(i))).collect();
        Self { nodes, ..Self::default() }
    }

    // ========================================================================
    // Mutation (build phase only)
    // ========================================================================

    /// Append a node and return its id.
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId::from(self.nodes.len());
        self.nodes.push(Node::new(id));
        id
    }

    /// Record an undirected edge. Both endpoints must already exist.
    ///
    /// Returns `false` (and records nothing) for unknown endpoints.
    pub fn connect(&mut self, a: NodeId, b: NodeId, weight: f32) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        self.edges.push(Edge::new(a, b, weight));
        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
        self.weights.entry(pair_key(a, b)).or_insert(weight);
        true
    }

    /// Mutable access to node positions for the layout pass.
    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Neighbours of `id` in edge-creation order. Unknown or isolated nodes
    /// yield an empty slice.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(&id).map(|n| n.as_slice()).unwrap_or(&[])
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.neighbors(id).len()
    }

    /// Weight of the first edge joining `a` and `b` in either orientation,
    /// or [`DEFAULT_EDGE_WEIGHT`] when no edge record exists.
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> f32 {
        self.weights.get(&pair_key(a, b)).copied().unwrap_or(DEFAULT_EDGE_WEIGHT)
    }

    /// Current positions, parallel to `nodes()`.
    pub fn positions(&self) -> Vec<glam::Vec3> {
        self.nodes.iter().map(|n| n.position).collect()
    }
}

#[inline]
fn pair_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}
