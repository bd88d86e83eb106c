//! Drift controller: an on/off autopilot that steers the camera along the
//! flow field.
//!
//! Velocity persists across frames. All decay and damping factors apply once
//! per `update` call and are not scaled by `delta`, so the coasting distance
//! depends on the caller's frame rate.

use std::sync::Arc;

use glam::Vec3;

use crate::config::DriftConfig;
use crate::field::FlowField;
use crate::model::Camera;

/// Flow-following camera autopilot.
pub struct DriftController {
    field: Arc<FlowField>,
    config: DriftConfig,
    enabled: bool,
    velocity: Vec3,
}

impl DriftController {
    pub fn new(field: Arc<FlowField>, config: DriftConfig) -> Self {
        Self { field, config, enabled: false, velocity: Vec3::ZERO }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Replace the current velocity (e.g. an impulse from user input).
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Advance the camera by one frame and return the alignment between the
    /// camera's viewing direction and the local flow, in `[-1, 1]`.
    ///
    /// Returns 0 while disabled or when the local flow is degenerate.
    pub fn update(&mut self, camera: &mut Camera, delta: f32) -> f32 {
        if !self.enabled {
            self.coast(camera, self.config.idle_decay, delta);
            return 0.0;
        }

        let sampled = self.field.sample(camera.position);
        let direction = match sampled.try_normalize() {
            Some(d) if sampled.length_squared() >= self.config.min_direction_sq => d,
            _ => {
                self.coast(camera, self.config.stall_decay, delta);
                return 0.0;
            }
        };

        let target = direction * self.config.speed;
        self.velocity = self.velocity.lerp(target, self.config.response);
        self.velocity *= self.config.damping;
        camera.position += self.velocity * delta;

        camera.direction().dot(direction).clamp(-1.0, 1.0)
    }

    fn coast(&mut self, camera: &mut Camera, decay: f32, delta: f32) {
        self.velocity *= decay;
        camera.position += self.velocity * delta;
    }
}
