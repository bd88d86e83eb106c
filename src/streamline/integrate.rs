//! Euler integration of polylines through the flow field.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::field::FlowField;
use crate::model::ScalarFields;

/// A traced polyline with one baked field snapshot per segment.
///
/// `segment_fields[i]` belongs to the segment `points[i] → points[i + 1]`
/// and was sampled at its midpoint when the line was traced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Streamline {
    pub points: Vec<Vec3>,
    pub segment_fields: Vec<ScalarFields>,
}

impl Streamline {
    pub fn segment_count(&self) -> usize {
        self.segment_fields.len()
    }

    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }

    /// Iterate `(start, end, baked fields)` per segment.
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3, &ScalarFields)> + '_ {
        self.points
            .windows(2)
            .zip(&self.segment_fields)
            .map(|(w, f)| (w[0], w[1], f))
    }
}

/// Integration limits for one trace.
#[derive(Debug, Clone, Copy)]
pub struct TraceLimits {
    pub max_steps: usize,
    pub step_size: f32,
    /// Directions shorter than this (squared) end the trace.
    pub min_direction_sq: f32,
    /// The trace ends once its nearest node is farther than this (squared).
    pub max_distance_sq: f32,
}

/// Trace from `start` until the step budget runs out, the field stalls, or
/// the line leaves the graph's neighbourhood. The point that first exceeds
/// the distance limit is kept as the final vertex.
pub fn trace(field: &FlowField, start: Vec3, limits: &TraceLimits) -> Streamline {
    let mut points = vec![start];
    let mut current = start;

    for _ in 0..limits.max_steps {
        let direction = field.sample(current);
        if direction.length_squared() < limits.min_direction_sq {
            break;
        }
        current += direction * limits.step_size;
        points.push(current);
        if field.nearest_distance_sq(current) > limits.max_distance_sq {
            break;
        }
    }

    let segment_fields = points
        .windows(2)
        .map(|w| field.sample_fields((w[0] + w[1]) * 0.5))
        .collect();

    Streamline { points, segment_fields }
}

/// Step budget for a background line starting where `fields` were sampled.
pub fn step_budget(fields: &ScalarFields) -> usize {
    (10.0 + 25.0 * fields.coherence + 15.0 * fields.flow_strength).floor().max(0.0) as usize
}
