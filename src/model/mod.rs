//! # Concept Graph Model
//!
//! Plain data that crosses every boundary: builder ↔ layout ↔ field ↔
//! tracer ↔ bus ↔ presentation layer.
//!
//! Design rule: this module is pure data. No sampling, smoothing or
//! per-frame state.

pub mod node;
pub mod edge;
pub mod fields;
pub mod camera;
pub mod params;

pub use node::{Node, NodeId};
pub use edge::{Edge, DEFAULT_EDGE_WEIGHT, MIN_EDGE_WEIGHT, MAX_EDGE_WEIGHT};
pub use fields::ScalarFields;
pub use camera::Camera;
pub use params::{Mode, CameraParams, HoverParams, BreathState};
