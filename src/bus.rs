//! # Parameter Bus
//!
//! Collects drift, flow-field, hover and breath signals once per frame and
//! publishes the snapshots the presentation layer reads. It also owns the
//! visualization [`Mode`].
//!
//! ## Smoothing
//!
//! Coherence, entropy and flow strength each pass through a one-pole filter
//! every frame regardless of mode:
//!
//! | Mode | Factor | Published fields |
//! |------|--------|------------------|
//! | Default | 0.1 | raw samples |
//! | Internalized | 0.02 | smoothed values |
//!
//! The filter keeps running in Default mode so that switching to
//! Internalized starts from a warm state instead of jumping.

use std::sync::Arc;

use glam::Vec3;
use tracing::info;

use crate::breath::BreathOscillator;
use crate::config::{BreathConfig, BusConfig};
use crate::field::FlowField;
use crate::model::*;

/// Per-frame inputs to [`ParamBus::update`].
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs {
    pub delta: f32,
    pub camera_position: Vec3,
    pub alignment: f32,
    pub drift_enabled: bool,
    pub hovered_index: Option<usize>,
}

/// Aggregates and smooths per-frame signals.
pub struct ParamBus {
    field: Arc<FlowField>,
    config: BusConfig,
    mode: Mode,
    breath: BreathOscillator,
    smoothed: ScalarFields,
    camera: CameraParams,
    hover: HoverParams,
}

impl ParamBus {
    pub fn new(field: Arc<FlowField>, config: BusConfig, breath: &BreathConfig) -> Self {
        Self {
            field,
            config,
            mode: Mode::Default,
            breath: BreathOscillator::new(breath.period),
            smoothed: ScalarFields::NEUTRAL,
            camera: CameraParams::default(),
            hover: HoverParams::default(),
        }
    }

    /// Flip the mode. Entering Internalized restarts the breath cycle.
    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        if self.mode.is_internalized() {
            self.breath.reset();
        }
        info!(mode = %self.mode, "visualization mode changed");
        self.mode
    }

    pub fn update(&mut self, inputs: &FrameInputs) {
        let sampled = self.field.sample_fields(inputs.camera_position);

        // Advances in every mode; only Internalized consumers read it.
        self.breath.update(inputs.delta);

        self.smoothed = self.smoothed.lerp(&sampled, self.smoothing());

        self.camera = CameraParams {
            fields: match self.mode {
                Mode::Default => sampled,
                Mode::Internalized => self.smoothed,
            },
            alignment: inputs.alignment,
            drift_enabled: inputs.drift_enabled,
            position: inputs.camera_position,
        };

        self.hover = HoverParams {
            hovered_index: inputs.hovered_index,
            hovered_fields: inputs.hovered_index.map(|i| self.field.node_fields(i)),
        };
    }

    fn smoothing(&self) -> f32 {
        match self.mode {
            Mode::Default => self.config.default_smoothing,
            Mode::Internalized => self.config.internalized_smoothing,
        }
    }

    pub fn camera_params(&self) -> &CameraParams {
        &self.camera
    }

    pub fn hover_params(&self) -> &HoverParams {
        &self.hover
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn breath(&self) -> BreathState {
        self.breath.state()
    }

    /// Filter state, independent of which fields are currently published.
    pub fn smoothed_fields(&self) -> &ScalarFields {
        &self.smoothed
    }
}
