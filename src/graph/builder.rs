//! Random concept-graph generation.

use tracing::debug;

use crate::model::{NodeId, MIN_EDGE_WEIGHT, MAX_EDGE_WEIGHT};
use crate::rng::SequenceGenerator;
use super::ConceptGraph;

/// Smallest number of connection attempts per node.
pub const MIN_CONNECTIONS: usize = 2;

/// Number of distinct connection-attempt counts (2..=6).
const CONNECTION_SPAN: f64 = 5.0;

/// Builder for a seeded random graph.
///
/// Each node draws a connection count in `2..=6`; each connection draws a
/// target uniformly over all nodes. Self targets are skipped rather than
/// redrawn, so realized degree may be lower than requested and parallel
/// edges are possible.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    node_count: usize,
    seed: u32,
}

impl GraphBuilder {
    pub fn new(node_count: usize) -> Self {
        Self { node_count, seed: 42 }
    }

    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(&self) -> ConceptGraph {
        let mut rng = SequenceGenerator::new(self.seed);
        let mut graph = ConceptGraph::with_nodes(self.node_count);
        let mut skipped = 0usize;

        for i in 0..self.node_count {
            let connections = MIN_CONNECTIONS + (rng.next_f64() * CONNECTION_SPAN).floor() as usize;
            for _ in 0..connections {
                let target = rng.index(self.node_count);
                if target == i {
                    skipped += 1;
                    continue;
                }
                let weight = rng.range(MIN_EDGE_WEIGHT, MAX_EDGE_WEIGHT);
                graph.connect(NodeId::from(i), NodeId::from(target), weight);
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            self_targets_skipped = skipped,
            seed = self.seed,
            "built concept graph"
        );
        graph
    }
}

/// Shorthand for `GraphBuilder::new(node_count).seed(seed).build()`.
pub fn build_graph(node_count: usize, seed: u32) -> ConceptGraph {
    GraphBuilder::new(node_count).seed(seed).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn builds_requested_node_count_with_labels() {
        let g = build_graph(25, 3);
        assert_eq!(g.node_count(), 25);
        for (i, node) in g.nodes().iter().enumerate() {
            assert_eq!(node.id, NodeId::from(i));
            assert_eq!(node.label, format!("Concept {}", i + 1));
            assert_eq!(node.position, Vec3::ZERO);
        }
    }

    #[test]
    fn adjacency_is_symmetric_with_multiplicity() {
        let g = build_graph(60, 11);
        for node in g.nodes() {
            for &nb in g.neighbors(node.id) {
                let forward = g.neighbors(node.id).iter().filter(|&&x| x == nb).count();
                let back = g.neighbors(nb).iter().filter(|&&x| x == node.id).count();
                assert_eq!(forward, back, "asymmetric adjacency between {} and {}", node.id, nb);
            }
        }
    }

    #[test]
    fn no_self_edges_and_weights_in_range() {
        let g = build_graph(80, 5);
        for e in g.edges() {
            assert_ne!(e.source, e.target);
            assert!(e.weight >= MIN_EDGE_WEIGHT && e.weight <= MAX_EDGE_WEIGHT, "weight {}", e.weight);
        }
    }

    #[test]
    fn edge_count_bounded_by_connection_attempts() {
        let n = 40;
        let g = build_graph(n, 9);
        assert!(g.edge_count() <= n * 6);
        let degree_sum: usize = g.nodes().iter().map(|node| g.degree(node.id)).sum();
        assert_eq!(degree_sum, 2 * g.edge_count());
    }

    #[test]
    fn same_seed_same_edges() {
        let a = build_graph(50, 77);
        let b = build_graph(50, 77);
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn single_node_graph_has_no_edges() {
        let g = build_graph(1, 42);
        assert_eq!(g.edge_count(), 0);
        assert!(g.neighbors(NodeId(0)).is_empty());
    }

    #[test]
    fn zero_nodes_builds_empty_graph() {
        let g = build_graph(0, 42);
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
    }
}
