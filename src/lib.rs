//! # concept-field: Concept Graph Flow-Field Engine
//!
//! Simulation core for a procedurally generated "concept graph": a seeded
//! random graph is laid out in 3D, a flow field is derived from its
//! topology, and a camera drifts through that field while a parameter bus
//! smooths everything into one snapshot per frame.
//!
//! ## Design Principles
//!
//! 1. **Seeded, never global**: every random stream is an owned
//!    `SequenceGenerator`; a fixed config reproduces a fixed world.
//! 2. **Build once, sample every frame**: graph, layout, flow field and
//!    background streamlines are immutable after `ConceptWorld::build`.
//! 3. **Plain data out**: the presentation layer only ever sees
//!    `CameraParams`, `HoverParams`, positions and shading scalars.
//! 4. **Throttled per-frame work**: hero re-tracing and recoloring are gated
//!    by distance and time.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use concept_field::{ConceptWorld, FrameInput, WorldConfig};
//!
//! # fn example() -> concept_field::Result<()> {
//! let mut world = ConceptWorld::build(WorldConfig::default())?;
//! world.toggle_drift();
//!
//! for _ in 0..600 {
//!     let out = world.frame(FrameInput::new(1.0 / 60.0));
//!     println!("coherence {:.3}", out.camera.fields.coherence);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Frame Order
//!
//! | Step | Component | Consumes |
//! |------|-----------|----------|
//! | 1 | `DriftController` | camera, flow field |
//! | 2 | `ParamBus` | alignment from step 1 |
//! | 3 | `StreamlineTracer` | mode + breath from step 2 |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod config;
pub mod rng;
pub mod graph;
pub mod field;
pub mod streamline;
pub mod drift;
pub mod breath;
pub mod bus;
pub mod lod;
pub mod export;

use std::sync::Arc;

use tracing::info;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Node, NodeId, Edge, ScalarFields, Camera,
    Mode, CameraParams, HoverParams, BreathState,
};

// ============================================================================
// Re-exports: Engine
// ============================================================================

pub use config::WorldConfig;
pub use rng::SequenceGenerator;
pub use graph::{ConceptGraph, GraphBuilder, LayoutReport};
pub use field::FlowField;
pub use streamline::{StreamlineTracer, Streamline, SegmentShade, FrameContext, TracerUpdate};
pub use drift::DriftController;
pub use breath::BreathOscillator;
pub use bus::{ParamBus, FrameInputs};

// ============================================================================
// Top-level world handle
// ============================================================================

/// The primary entry point. Owns every subsystem and runs them in frame
/// order.
pub struct ConceptWorld {
    config: WorldConfig,
    graph: ConceptGraph,
    layout: LayoutReport,
    field: Arc<FlowField>,
    tracer: StreamlineTracer,
    drift: DriftController,
    bus: ParamBus,
    camera: Camera,
    frames: u64,
}

/// Per-frame inputs from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub delta: f32,
    /// Node under the pointer, if any. May be stale.
    pub hovered: Option<usize>,
    /// Gain on coherence-driven streamline visibility.
    pub coherence_factor: f32,
}

impl FrameInput {
    pub fn new(delta: f32) -> Self {
        Self { delta, hovered: None, coherence_factor: 1.0 }
    }

    pub fn with_hover(mut self, hovered: Option<usize>) -> Self {
        self.hovered = hovered;
        self
    }

    pub fn with_coherence_factor(mut self, factor: f32) -> Self {
        self.coherence_factor = factor;
        self
    }
}

/// Everything one frame produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub camera: CameraParams,
    pub hover: HoverParams,
    pub mode: Mode,
    pub breath: BreathState,
    pub edge_opacity: f32,
    pub edges_visible: bool,
    pub label_scale: f32,
    pub streamlines: TracerUpdate,
}

impl ConceptWorld {
    /// Build graph, layout, flow field and background streamlines.
    #[tracing::instrument(skip(config), fields(nodes = config.graph.node_count, seed = config.graph.seed))]
    pub fn build(config: WorldConfig) -> Result<Self> {
        config.validate()?;

        let mut graph = GraphBuilder::new(config.graph.node_count)
            .seed(config.graph.seed)
            .build();
        let layout = crate::graph::layout(&mut graph, &config.layout);
        let field = Arc::new(FlowField::new(&graph)?);
        let tracer = StreamlineTracer::new(field.clone(), config.streamlines.clone())?;
        let drift = DriftController::new(field.clone(), config.drift.clone());
        let bus = ParamBus::new(field.clone(), config.bus.clone(), &config.breath);
        let camera = Camera::looking_at(config.camera.position.into(), config.camera.target.into());

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            streamlines = tracer.background().len(),
            segments = tracer.segment_count(),
            "concept world built"
        );

        Ok(Self { config, graph, layout, field, tracer, drift, bus, camera, frames: 0 })
    }

    /// Run one frame: drift, then bus, then streamlines.
    pub fn frame(&mut self, input: FrameInput) -> FrameOutput {
        let alignment = self.drift.update(&mut self.camera, input.delta);

        self.bus.update(&FrameInputs {
            delta: input.delta,
            camera_position: self.camera.position,
            alignment,
            drift_enabled: self.drift.is_enabled(),
            hovered_index: input.hovered,
        });

        let streamlines = self.tracer.update(&FrameContext {
            camera_position: self.camera.position,
            camera_direction: self.camera.forward,
            coherence_factor: input.coherence_factor,
            delta: input.delta,
            mode: self.bus.mode(),
            breath: self.bus.breath(),
        });

        self.frames += 1;

        FrameOutput {
            camera: *self.bus.camera_params(),
            hover: *self.bus.hover_params(),
            mode: self.bus.mode(),
            breath: self.bus.breath(),
            edge_opacity: lod::edge_opacity(alignment),
            edges_visible: lod::edges_visible(self.camera.position),
            label_scale: lod::label_scale(self.camera.position),
            streamlines,
        }
    }

    pub fn toggle_drift(&mut self) -> bool {
        self.drift.toggle();
        info!(enabled = self.drift.is_enabled(), "drift toggled");
        self.drift.is_enabled()
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.bus.toggle_mode()
    }

    /// Highlight set for the node hovered in the last frame.
    pub fn hover_highlight(&self) -> lod::HoverHighlight {
        lod::HoverHighlight::new(&self.graph, self.bus.hover_params().hovered_index)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn graph(&self) -> &ConceptGraph {
        &self.graph
    }

    pub fn layout_report(&self) -> &LayoutReport {
        &self.layout
    }

    pub fn field(&self) -> &Arc<FlowField> {
        &self.field
    }

    pub fn streamlines(&self) -> &StreamlineTracer {
        &self.tracer
    }

    pub fn drift(&self) -> &DriftController {
        &self.drift
    }

    pub fn drift_mut(&mut self) -> &mut DriftController {
        &mut self.drift
    }

    pub fn bus(&self) -> &ParamBus {
        &self.bus
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Orbit/zoom input from the presentation layer lands here.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
