//! Scalar fields carried by every node and sample point.

use serde::{Deserialize, Serialize};

/// Coherence, entropy and flow strength at a node or sample point.
///
/// Each component lies in `[0, 1]`. For fields derived directly from a node,
/// `entropy == 1 - coherence`; interpolated fields average each component
/// independently and do not keep that relation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarFields {
    pub coherence: f32,
    pub entropy: f32,
    pub flow_strength: f32,
}

impl ScalarFields {
    /// Returned for lookups that have no node to answer for.
    pub const NEUTRAL: ScalarFields = ScalarFields {
        coherence: 0.0,
        entropy: 1.0,
        flow_strength: 0.0,
    };

    /// Per-node fields: entropy is derived as the complement of coherence.
    pub fn from_coherence(coherence: f32, flow_strength: f32) -> Self {
        let coherence = coherence.clamp(0.0, 1.0);
        Self {
            coherence,
            entropy: 1.0 - coherence,
            flow_strength: flow_strength.clamp(0.0, 1.0),
        }
    }

    /// Component-wise one-pole step towards `target`.
    pub fn lerp(&self, target: &ScalarFields, t: f32) -> ScalarFields {
        ScalarFields {
            coherence: lerp(self.coherence, target.coherence, t),
            entropy: lerp(self.entropy, target.entropy, t),
            flow_strength: lerp(self.flow_strength, target.flow_strength, t),
        }
    }
}

impl Default for ScalarFields {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_coherence_keeps_complement() {
        let f = ScalarFields::from_coherence(0.25, 0.5);
        assert_eq!(f.coherence + f.entropy, 1.0);
        assert_eq!(f.flow_strength, 0.5);
    }

    #[test]
    fn from_coherence_clamps() {
        let f = ScalarFields::from_coherence(1.7, -0.2);
        assert_eq!(f.coherence, 1.0);
        assert_eq!(f.entropy, 0.0);
        assert_eq!(f.flow_strength, 0.0);
    }

    #[test]
    fn lerp_moves_each_component_independently() {
        let a = ScalarFields::NEUTRAL;
        let b = ScalarFields { coherence: 1.0, entropy: 0.0, flow_strength: 1.0 };
        let m = a.lerp(&b, 0.1);
        assert!((m.coherence - 0.1).abs() < 1e-6);
        assert!((m.entropy - 0.9).abs() < 1e-6);
        assert!((m.flow_strength - 0.1).abs() < 1e-6);
    }
}
