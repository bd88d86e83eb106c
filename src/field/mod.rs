//! # Flow Field
//!
//! A direction vector and a set of scalar fields per node, derived once from
//! the laid-out graph and read-only afterwards.
//!
//! ## Per-node derivation
//!
//! | Quantity | Definition |
//! |----------|------------|
//! | direction | `normalize(Σ (neighbour − self) · weight)`, zero if the sum vanishes |
//! | flow strength | `clamp(|Σ| / max(degree, 1), 0, 1)` |
//! | coherence | mean over ordered pairs of distinct neighbours of `max(0, û·v̂)` |
//! | entropy | `1 − coherence` |
//!
//! Neighbour lists may contain repeats (parallel edges); each list entry is
//! its own term in both sums.
//!
//! ## Sampling
//!
//! - [`FlowField::sample`]: direction of the single nearest node.
//! - [`FlowField::sample_fields`]: inverse-square weighted blend of the three
//!   nearest nodes, each field averaged independently.
//! - [`FlowField::node_fields`]: direct lookup with a neutral fallback.
//!
//! All queries are linear scans over the node positions.

pub mod nearest;

use glam::Vec3;
use tracing::debug;

use crate::graph::ConceptGraph;
use crate::model::{NodeId, ScalarFields};
use crate::{Error, Result};

pub use nearest::{Neighbor, NeighborSet, k_nearest, nearest};

/// Number of nodes blended by [`FlowField::sample_fields`].
pub const SAMPLE_NEIGHBORS: usize = 3;

/// Added to squared distances before inversion so that sampling exactly on
/// a node stays finite.
pub const SAMPLE_EPSILON: f32 = 0.1;

/// Per-node flow directions and scalar fields.
#[derive(Debug, Clone)]
pub struct FlowField {
    positions: Vec<Vec3>,
    vectors: Vec<Vec3>,
    fields: Vec<ScalarFields>,
}

impl FlowField {
    /// Derive the field from a laid-out graph.
    ///
    /// Fails with [`Error::InvalidGraph`] for a graph without nodes: nearest
    /// node queries over zero candidates have no answer.
    pub fn new(graph: &ConceptGraph) -> Result<Self> {
        if graph.is_empty() {
            return Err(Error::InvalidGraph("flow field needs at least one node".into()));
        }

        let positions = graph.positions();
        let mut vectors = Vec::with_capacity(positions.len());
        let mut fields = Vec::with_capacity(positions.len());

        for node in graph.nodes() {
            let (direction, node_fields) = derive_node(graph, node.id, &positions);
            vectors.push(direction);
            fields.push(node_fields);
        }

        let mean_coherence = fields.iter().map(|f| f.coherence).sum::<f32>() / fields.len() as f32;
        debug!(nodes = positions.len(), mean_coherence, "flow field derived");

        Ok(Self { positions, vectors, fields })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false: construction rejects empty graphs.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Node positions the field was derived from.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-node unit (or zero) directions, parallel to the node list.
    pub fn vectors(&self) -> &[Vec3] {
        &self.vectors
    }

    /// Per-node scalar fields, parallel to the node list.
    pub fn fields(&self) -> &[ScalarFields] {
        &self.fields
    }

    /// Nearest node to `point`.
    pub fn nearest(&self, point: Vec3) -> Neighbor {
        // Non-empty by construction.
        nearest(&self.positions, point).unwrap_or(Neighbor { index: 0, distance_sq: f32::INFINITY })
    }

    /// Squared distance from `point` to the nearest node.
    pub fn nearest_distance_sq(&self, point: Vec3) -> f32 {
        self.nearest(point).distance_sq
    }

    /// Direction of the nearest node.
    pub fn sample(&self, point: Vec3) -> Vec3 {
        self.vectors[self.nearest(point).index]
    }

    /// Inverse-square weighted blend of the nearest nodes' fields.
    ///
    /// Entropy is averaged on its own and is not forced back to
    /// `1 − coherence`.
    pub fn sample_fields(&self, point: Vec3) -> ScalarFields {
        let neighbors = k_nearest(&self.positions, point, SAMPLE_NEIGHBORS);

        let mut total_weight = 0.0f32;
        let mut blended = ScalarFields { coherence: 0.0, entropy: 0.0, flow_strength: 0.0 };
        for n in &neighbors {
            let w = 1.0 / (n.distance_sq + SAMPLE_EPSILON);
            let f = &self.fields[n.index];
            blended.coherence += f.coherence * w;
            blended.entropy += f.entropy * w;
            blended.flow_strength += f.flow_strength * w;
            total_weight += w;
        }

        if total_weight <= 0.0 || !total_weight.is_finite() {
            return ScalarFields::NEUTRAL;
        }
        ScalarFields {
            coherence: blended.coherence / total_weight,
            entropy: blended.entropy / total_weight,
            flow_strength: blended.flow_strength / total_weight,
        }
    }

    /// Fields of node `index`, or [`ScalarFields::NEUTRAL`] when out of range.
    ///
    /// Hover indices can outlive the node they referred to, so a stale index
    /// is an expected input here, not a fault.
    pub fn node_fields(&self, index: usize) -> ScalarFields {
        self.fields.get(index).copied().unwrap_or(ScalarFields::NEUTRAL)
    }
}

/// Direction and fields for one node.
fn derive_node(graph: &ConceptGraph, id: NodeId, positions: &[Vec3]) -> (Vec3, ScalarFields) {
    let here = positions[id.index()];
    let neighbors = graph.neighbors(id);

    let mut flow = Vec3::ZERO;
    for &nb in neighbors {
        flow += (positions[nb.index()] - here) * graph.edge_weight(id, nb);
    }
    let direction = flow.normalize_or_zero();
    let flow_strength = flow.length() / neighbors.len().max(1) as f32;

    let coherence = coherence(here, neighbors, positions);
    (direction, ScalarFields::from_coherence(coherence, flow_strength))
}

/// Mean positive alignment over ordered pairs of distinct neighbour slots.
fn coherence(here: Vec3, neighbors: &[NodeId], positions: &[Vec3]) -> f32 {
    let n = neighbors.len();
    if n < 2 {
        return 0.0;
    }
    let dirs: Vec<Vec3> = neighbors
        .iter()
        .map(|nb| (positions[nb.index()] - here).normalize_or_zero())
        .collect();

    let mut sum = 0.0f32;
    for (i, u) in dirs.iter().enumerate() {
        for (j, v) in dirs.iter().enumerate() {
            if i != j {
                sum += u.dot(*v).max(0.0);
            }
        }
    }
    (sum / (n * (n - 1)) as f32).clamp(0.0, 1.0)
}
