//! Camera-relative "hero" streamlines.

use glam::Vec3;
use tracing::warn;

/// Orthonormal frame around the camera's viewing direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl ViewBasis {
    /// Build a basis from a (possibly unnormalized) forward vector.
    ///
    /// A zero forward falls back to `-Z`; a forward parallel to `+Y` falls
    /// back to `+X` for the right axis.
    pub fn from_forward(forward: Vec3) -> Self {
        let forward = match forward.try_normalize() {
            Some(f) => f,
            None => {
                warn!("degenerate camera direction, using -Z");
                Vec3::NEG_Z
            }
        };
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        Self { forward, right, up }
    }
}

/// Start points of a ring of `count` rays centred `lead` ahead of the
/// camera, `spread` away from the viewing axis.
pub fn fan_starts(camera: Vec3, basis: &ViewBasis, count: usize, lead: f32, spread: f32) -> Vec<Vec3> {
    let centre = camera + basis.forward * lead;
    (0..count)
        .map(|k| {
            let theta = std::f32::consts::TAU * k as f32 / count as f32;
            centre + (basis.right * theta.cos() + basis.up * theta.sin()) * spread
        })
        .collect()
}
