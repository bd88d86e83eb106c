//! # World Configuration
//!
//! Every tunable constant of the engine, grouped by subsystem. All sections
//! deserialize with `#[serde(default)]`, so a JSON document only needs the
//! keys it wants to override:
//!
//! ```json
//! { "graph": { "node_count": 120 }, "breath": { "period": 12.0 } }
//! ```
//!
//! The defaults reproduce the reference world (300 nodes, seed 42, layout
//! seed 7, streamline seed 123).

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

// ============================================================================
// Top-level
// ============================================================================

/// Configuration for building a [`ConceptWorld`](crate::ConceptWorld).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub graph: GraphConfig,
    pub layout: LayoutConfig,
    pub streamlines: StreamlineConfig,
    pub drift: DriftConfig,
    pub bus: BusConfig,
    pub breath: BreathConfig,
    pub camera: CameraConfig,
}

impl WorldConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values that would make the simulation meaningless.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.streamlines.validate()?;
        self.drift.validate()?;
        self.bus.validate()?;
        self.breath.validate()?;
        Ok(())
    }
}

fn require(cond: bool, message: impl Into<String>) -> Result<()> {
    if cond { Ok(()) } else { Err(Error::InvalidConfig(message.into())) }
}

fn positive(value: f32) -> bool {
    value > 0.0 && value.is_finite()
}

fn unit(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

// ============================================================================
// Graph + layout
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub node_count: usize,
    pub seed: u32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self { node_count: 300, seed: 42 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub seed: u32,
    pub iterations: usize,
    /// Spiral radius grows as `radius_step * sqrt(i)`.
    pub radius_step: f32,
    /// Spiral angle advances `angle_step` radians per node.
    pub angle_step: f32,
    /// Full width of the horizontal (x, z) jitter.
    pub horizontal_jitter: f32,
    /// Full width of the vertical (y) jitter.
    pub vertical_jitter: f32,
    pub repulsion: f32,
    /// Distance floor for the inverse-square repulsion.
    pub min_distance: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            iterations: 30,
            radius_step: 0.6,
            angle_step: 0.5,
            horizontal_jitter: 3.0,
            vertical_jitter: 10.0,
            repulsion: 0.02,
            min_distance: 0.6,
        }
    }
}

impl LayoutConfig {
    fn validate(&self) -> Result<()> {
        require(self.min_distance > 0.0, "layout.min_distance must be positive")?;
        require(self.repulsion >= 0.0, "layout.repulsion must not be negative")
    }
}

// ============================================================================
// Streamlines
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamlineConfig {
    /// Number of background streamlines baked at startup.
    pub count: usize,
    pub seed: u32,
    pub step_size: f32,
    /// Integration stops once the nearest node is farther than this (squared).
    pub max_distance_sq: f32,
    /// Sampled directions with squared length below this end a streamline.
    pub min_direction_sq: f32,
    /// Seconds between background recolor passes.
    pub recolor_interval: f32,
    /// Lerp factor applied to background opacity once per update.
    pub opacity_response: f32,
    pub hero_count: usize,
    pub hero_max_steps: usize,
    pub hero_step_size: f32,
    /// Distance ahead of the camera where the hero fan is centred.
    pub hero_lead: f32,
    /// Radius of the hero fan around the forward axis.
    pub hero_spread: f32,
    /// Camera travel that marks the hero set stale.
    pub hero_move_threshold: f32,
    /// Turn of the viewing direction, in radians, that marks a visible hero
    /// set stale.
    pub hero_turn_threshold: f32,
    /// Hero target visibility at or below which turns are ignored.
    pub hero_visibility_floor: f32,
    pub hero_response: f32,
}

impl Default for StreamlineConfig {
    fn default() -> Self {
        Self {
            count: 200,
            seed: 123,
            step_size: 1.2,
            max_distance_sq: 400.0,
            min_direction_sq: 0.001,
            recolor_interval: 0.1,
            opacity_response: 0.05,
            hero_count: 6,
            hero_max_steps: 24,
            hero_step_size: 0.8,
            hero_lead: 4.0,
            hero_spread: 2.5,
            hero_move_threshold: 4.0,
            hero_turn_threshold: 0.35,
            hero_visibility_floor: 0.02,
            hero_response: 0.08,
        }
    }
}

impl StreamlineConfig {
    fn validate(&self) -> Result<()> {
        require(positive(self.step_size), "streamlines.step_size must be positive and finite")?;
        require(positive(self.hero_step_size), "streamlines.hero_step_size must be positive and finite")?;
        require(positive(self.min_direction_sq), "streamlines.min_direction_sq must be positive and finite")?;
        require(self.max_distance_sq > 0.0, "streamlines.max_distance_sq must be positive")?;
        require(self.hero_turn_threshold >= 0.0, "streamlines.hero_turn_threshold must not be negative")?;
        require(self.recolor_interval >= 0.0, "streamlines.recolor_interval must not be negative")?;
        require(unit(self.opacity_response), "streamlines.opacity_response must lie in [0, 1]")?;
        require(unit(self.hero_response), "streamlines.hero_response must lie in [0, 1]")
    }
}

// ============================================================================
// Drift
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Target speed along the flow, world units per second.
    pub speed: f32,
    /// Per-update lerp of velocity towards the target velocity.
    pub response: f32,
    /// Per-update damping applied while following the flow.
    pub damping: f32,
    /// Per-update velocity decay while drift is disabled.
    pub idle_decay: f32,
    /// Per-update velocity decay while enabled but the flow is degenerate.
    pub stall_decay: f32,
    pub min_direction_sq: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            speed: 6.0,
            response: 0.1,
            damping: 0.98,
            idle_decay: 0.85,
            stall_decay: 0.92,
            min_direction_sq: 0.001,
        }
    }
}

impl DriftConfig {
    fn validate(&self) -> Result<()> {
        require(self.speed.is_finite(), "drift.speed must be finite")?;
        require(positive(self.min_direction_sq), "drift.min_direction_sq must be positive and finite")?;
        require(unit(self.response), "drift.response must lie in [0, 1]")?;
        require(unit(self.damping), "drift.damping must lie in [0, 1]")?;
        require(unit(self.idle_decay), "drift.idle_decay must lie in [0, 1]")?;
        require(unit(self.stall_decay), "drift.stall_decay must lie in [0, 1]")
    }
}

// ============================================================================
// Parameter bus + breath
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    pub default_smoothing: f32,
    pub internalized_smoothing: f32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self { default_smoothing: 0.1, internalized_smoothing: 0.02 }
    }
}

impl BusConfig {
    fn validate(&self) -> Result<()> {
        require(unit(self.default_smoothing), "bus.default_smoothing must lie in [0, 1]")?;
        require(unit(self.internalized_smoothing), "bus.internalized_smoothing must lie in [0, 1]")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathConfig {
    pub period: f32,
}

impl Default for BreathConfig {
    fn default() -> Self {
        Self { period: 16.0 }
    }
}

impl BreathConfig {
    fn validate(&self) -> Result<()> {
        require(self.period > 0.0, "breath.period must be positive")
    }
}

// ============================================================================
// Camera
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { position: [0.0, 20.0, 80.0], target: [0.0, 0.0, 0.0] }
    }
}
