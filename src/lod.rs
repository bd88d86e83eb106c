//! Level-of-detail and hover-highlight decisions.
//!
//! Pure functions of the camera position, the hovered node, and the drift
//! alignment. The presentation layer applies the results to its own edge,
//! label and point objects.

use glam::Vec3;
use hashbrown::HashSet;

use crate::graph::ConceptGraph;
use crate::model::{Edge, NodeId};

/// Edges are hidden once the camera is this far from the origin.
pub const EDGE_VISIBILITY_DISTANCE: f32 = 120.0;

const LABEL_SCALE_MIN: f32 = 0.6;
const LABEL_SCALE_MAX: f32 = 1.4;
const LABEL_BASE_SIZE: f32 = 6.0;

const EDGE_OPACITY_BASE: f32 = 0.12;
const EDGE_OPACITY_RANGE: f32 = 0.35;

pub fn edges_visible(camera: Vec3) -> bool {
    camera.length() < EDGE_VISIBILITY_DISTANCE
}

/// World-space label size for the current camera distance.
pub fn label_scale(camera: Vec3) -> f32 {
    let distance = camera.length().max(f32::EPSILON);
    (EDGE_VISIBILITY_DISTANCE / distance).clamp(LABEL_SCALE_MIN, LABEL_SCALE_MAX) * LABEL_BASE_SIZE
}

/// Map drift alignment in `[-1, 1]` onto edge opacity.
pub fn edge_opacity(alignment: f32) -> f32 {
    let coherence = ((alignment + 1.0) * 0.5).clamp(0.0, 1.0);
    EDGE_OPACITY_BASE + coherence * EDGE_OPACITY_RANGE
}

/// The hovered node and its direct neighbours.
#[derive(Debug, Clone, Default)]
pub struct HoverHighlight {
    hovered: Option<NodeId>,
    neighbors: HashSet<NodeId>,
}

impl HoverHighlight {
    /// Stale indices (no such node) produce an empty neighbour set but still
    /// report the index as hovered.
    pub fn new(graph: &ConceptGraph, hovered: Option<usize>) -> Self {
        let hovered = hovered.map(NodeId::from);
        let neighbors = hovered
            .map(|id| graph.neighbors(id).iter().copied().collect())
            .unwrap_or_default();
        Self { hovered, neighbors }
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn neighbors(&self) -> &HashSet<NodeId> {
        &self.neighbors
    }

    pub fn is_neighbor(&self, id: NodeId) -> bool {
        self.neighbors.contains(&id)
    }

    /// Hovered node or one of its neighbours.
    pub fn is_highlighted_node(&self, id: NodeId) -> bool {
        self.hovered == Some(id) || self.is_neighbor(id)
    }

    /// Labels are shown exactly for highlighted nodes.
    pub fn label_visible(&self, id: NodeId) -> bool {
        self.is_highlighted_node(id)
    }

    /// Edges touching the hovered node or any neighbour light up.
    pub fn is_highlighted_edge(&self, edge: &Edge) -> bool {
        match self.hovered {
            None => false,
            Some(h) => {
                edge.touches(h) || self.is_neighbor(edge.source) || self.is_neighbor(edge.target)
            }
        }
    }
}
