//! Force-directed layout: seeded spiral placement followed by a fixed
//! number of pairwise-repulsion sweeps.
//!
//! O(n²) per iteration, which is fine for a few hundred nodes.
//! There is no convergence check and no attraction along edges; the result
//! is a cheap spread-out arrangement, not an equilibrium.

use glam::Vec3;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::rng::SequenceGenerator;
use super::ConceptGraph;

/// Summary of a layout run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutReport {
    pub iterations: usize,
    /// Σ |final − spiral|² over all nodes.
    pub total_displacement_sq: f32,
}

/// Place every node of `graph` in place.
///
/// Positions are updated node by node: within one sweep, node `i` sees the
/// already-moved positions of nodes `< i`.
pub fn layout(graph: &mut ConceptGraph, config: &LayoutConfig) -> LayoutReport {
    let mut rng = SequenceGenerator::new(config.seed);
    let nodes = graph.nodes_mut();

    for (index, node) in nodes.iter_mut().enumerate() {
        node.position = spiral_position(index, config, &mut rng);
    }
    let seeded: Vec<Vec3> = nodes.iter().map(|n| n.position).collect();

    let min_distance_sq = config.min_distance * config.min_distance;
    for _ in 0..config.iterations {
        for i in 0..nodes.len() {
            let here = nodes[i].position;
            let mut displacement = Vec3::ZERO;
            for (j, other) in nodes.iter().enumerate() {
                if i == j {
                    continue;
                }
                let delta = here - other.position;
                let distance_sq = delta.length_squared().max(min_distance_sq);
                displacement += delta * (config.repulsion / distance_sq);
            }
            nodes[i].position += displacement;
        }
    }

    let total_displacement_sq: f32 = nodes
        .iter()
        .zip(&seeded)
        .map(|(n, s)| n.position.distance_squared(*s))
        .sum();

    debug!(
        nodes = nodes.len(),
        iterations = config.iterations,
        total_displacement_sq,
        "layout finished"
    );

    LayoutReport { iterations: config.iterations, total_displacement_sq }
}

/// Spiral seed position with jitter. Draw order is x, y, z.
fn spiral_position(index: usize, config: &LayoutConfig, rng: &mut SequenceGenerator) -> Vec3 {
    let radius = config.radius_step * (index as f32).sqrt();
    let angle = index as f32 * config.angle_step;
    let x = angle.cos() * radius + rng.jitter(config.horizontal_jitter);
    let y = rng.jitter(config.vertical_jitter);
    let z = angle.sin() * radius + rng.jitter(config.horizontal_jitter);
    Vec3::new(x, y, z)
}
