//! Camera pose shared between the presentation layer and the drift controller.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// World-space camera pose.
///
/// The presentation layer owns orbit/zoom input and writes `position` and
/// `forward`; the drift controller advances `position` while enabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Viewing direction. Not required to be unit length.
    pub forward: Vec3,
}

impl Camera {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }

    /// Camera at `position` looking at `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self { position, forward: target - position }
    }

    /// Unit viewing direction, or zero if `forward` is degenerate.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.forward.normalize_or_zero()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::looking_at(Vec3::new(0.0, 20.0, 80.0), Vec3::ZERO)
    }
}
