//! Scene export: serialize the current world state as JSON.
//!
//! Produces a self-contained snapshot that an offline renderer or a test
//! harness can load without rebuilding the world.
//!
//! ```text
//! ConceptWorld → scene_snapshot() → SceneSnapshot → serde_json
//!   → write_scene_json() → file / stdout
//! ```

use std::io::Write;

use chrono::{DateTime, Utc};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::model::*;
use crate::streamline::{SegmentShade, Streamline};
use crate::{ConceptWorld, Result};

/// Snapshot metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub frames: u64,
    pub node_count: usize,
    pub edge_count: usize,
    pub streamline_count: usize,
    pub segment_count: usize,
}

/// One laid-out node with its derived flow data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub label: String,
    pub position: Vec3,
    pub vector: Vec3,
    pub fields: ScalarFields,
}

/// Full world state at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub header: SnapshotHeader,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<Edge>,
    pub background: Vec<Streamline>,
    /// Flat, one entry per background segment in trace order.
    pub shades: Vec<SegmentShade>,
    pub background_opacity: f32,
    pub hero: Vec<Streamline>,
    pub hero_visibility: f32,
    pub camera: Camera,
    pub params: CameraParams,
    pub mode: Mode,
    pub breath: BreathState,
}

/// Capture the world as it stands after the last frame.
pub fn scene_snapshot(world: &ConceptWorld) -> SceneSnapshot {
    let graph = world.graph();
    let field = world.field();
    let tracer = world.streamlines();

    let nodes = graph
        .nodes()
        .iter()
        .map(|node| {
            let i = node.id.index();
            NodeSnapshot {
                id: node.id,
                label: node.label.clone(),
                position: node.position,
                vector: field.vectors().get(i).copied().unwrap_or(Vec3::ZERO),
                fields: field.node_fields(i),
            }
        })
        .collect();

    SceneSnapshot {
        header: SnapshotHeader {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            frames: world.frames(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            streamline_count: tracer.background().len(),
            segment_count: tracer.segment_count(),
        },
        nodes,
        edges: graph.edges().to_vec(),
        background: tracer.background().to_vec(),
        shades: tracer.shades().to_vec(),
        background_opacity: tracer.opacity(),
        hero: tracer.hero().to_vec(),
        hero_visibility: tracer.hero_visibility(),
        camera: *world.camera(),
        params: *world.bus().camera_params(),
        mode: world.bus().mode(),
        breath: world.bus().breath(),
    }
}

/// Write the current snapshot as pretty-printed JSON.
pub fn write_scene_json(world: &ConceptWorld, writer: &mut dyn Write) -> Result<()> {
    let snapshot = scene_snapshot(world);
    serde_json::to_writer_pretty(&mut *writer, &snapshot)?;
    writeln!(writer)?;
    Ok(())
}
