//! Node in the concept graph.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Dense node identifier. Equal to the node's index in the graph's node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Indices beyond `u32::MAX` saturate, so they can never alias a real node.
impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        NodeId(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the concept graph.
///
/// `position` is zero until the force layout runs and is treated as
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Display label, irrelevant to the simulation.
    pub label: String,
    pub position: Vec3,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            label: format!("Concept {}", id.0 + 1),
            position: Vec3::ZERO,
        }
    }
}
