//! Weighted edge in the concept graph.

use serde::{Deserialize, Serialize};
use super::NodeId;

/// Weight used when no edge record joins two adjacent nodes.
pub const DEFAULT_EDGE_WEIGHT: f32 = 0.3;

/// Inclusive lower bound of generated edge weights.
pub const MIN_EDGE_WEIGHT: f32 = 0.2;

/// Upper bound of generated edge weights.
pub const MAX_EDGE_WEIGHT: f32 = 1.0;

/// An edge between two nodes. Stored as an ordered pair but undirected in
/// effect: both endpoints list each other as neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f32,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId, weight: f32) -> Self {
        Self { source, target, weight }
    }

    pub fn touches(&self, id: NodeId) -> bool {
        self.source == id || self.target == id
    }
}
