//! Per-frame snapshots handed to the presentation layer.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use super::ScalarFields;

/// Visualization mode. Affects smoothing and downstream rendering only,
/// never the flow field itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Default,
    Internalized,
}

impl Mode {
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Default => Mode::Internalized,
            Mode::Internalized => Mode::Default,
        }
    }

    pub fn is_internalized(self) -> bool {
        matches!(self, Mode::Internalized)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Default => write!(f, "default"),
            Mode::Internalized => write!(f, "internalized"),
        }
    }
}

/// Camera-side parameters for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraParams {
    /// Smoothed in Internalized mode, raw in Default mode.
    pub fields: ScalarFields,
    /// Signed agreement between camera forward and the local flow, `[-1, 1]`.
    pub alignment: f32,
    pub drift_enabled: bool,
    pub position: Vec3,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fields: ScalarFields::NEUTRAL,
            alignment: 0.0,
            drift_enabled: false,
            position: Vec3::ZERO,
        }
    }
}

/// Hover-side parameters for one frame. Never smoothed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HoverParams {
    pub hovered_index: Option<usize>,
    pub hovered_fields: Option<ScalarFields>,
}

/// Output of the breathing oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreathState {
    /// Smoothly oscillating position in the cycle, `[0, 1]`.
    pub phase: f32,
    /// Positive while inhaling, negative while exhaling, `[-1, 1]`.
    pub derivative: f32,
    /// Breath depth. Constant 1.0 for now.
    pub intensity: f32,
}
