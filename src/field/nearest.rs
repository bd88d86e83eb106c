//! Linear-scan nearest-neighbour queries over node positions.
//!
//! No spatial index: every query is O(n). Ties resolve to the lowest index
//! because candidates only replace an incumbent on a strictly smaller
//! distance.

use glam::Vec3;
use smallvec::SmallVec;

/// A candidate node and its squared distance to the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance_sq: f32,
}

/// Nearest position to `point`, or `None` for an empty slice.
pub fn nearest(positions: &[Vec3], point: Vec3) -> Option<Neighbor> {
    let mut best: Option<Neighbor> = None;
    for (index, p) in positions.iter().enumerate() {
        let distance_sq = p.distance_squared(point);
        match best {
            Some(b) if distance_sq >= b.distance_sq => {}
            _ => best = Some(Neighbor { index, distance_sq }),
        }
    }
    best
}

/// Buffer for small k-nearest result sets.
pub type NeighborSet = SmallVec<[Neighbor; 4]>;

/// The `k` nearest positions to `point`, closest first. Shorter than `k`
/// when fewer positions exist.
pub fn k_nearest(positions: &[Vec3], point: Vec3, k: usize) -> NeighborSet {
    let mut best = NeighborSet::new();
    if k == 0 {
        return best;
    }
    for (index, p) in positions.iter().enumerate() {
        let distance_sq = p.distance_squared(point);
        if best.len() == k && distance_sq >= best[k - 1].distance_sq {
            continue;
        }
        // Insert after every incumbent that is at least as close.
        let slot = best.iter().position(|b| distance_sq < b.distance_sq).unwrap_or(best.len());
        if best.len() == k {
            best.pop();
        }
        best.insert(slot, Neighbor { index, distance_sq });
    }
    best
}
