//! # Streamline Tracer
//!
//! Two sets of polylines traced through the flow field:
//!
//! - **Background**: `count` lines seeded at random nodes, baked once at
//!   construction. Each segment keeps the fields sampled at its midpoint, so
//!   per-frame shading never repeats the nearest-neighbour queries.
//! - **Hero**: a small fan of lines started just ahead of the camera,
//!   re-traced only when the camera has moved far enough while the set is
//!   visible.
//!
//! ## Per-frame cost
//!
//! `update` performs one `sample_fields` call, plus:
//!
//! | Work | Gate |
//! |------|------|
//! | background shade refresh | every `recolor_interval` seconds of accumulated delta |
//! | hero re-trace | first call, camera travel > `hero_move_threshold`, or a turn > `hero_turn_threshold` while visible |
//!
//! Between gates the presentation layer keeps drawing the previous shades and
//! hero geometry.

pub mod integrate;
pub mod hero;

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::StreamlineConfig;
use crate::field::FlowField;
use crate::model::{BreathState, Mode, ScalarFields};
use crate::model::fields::lerp;
use crate::rng::SequenceGenerator;
use crate::{Error, Result};

pub use integrate::{Streamline, TraceLimits, step_budget, trace as trace_streamline};
pub use hero::{ViewBasis, fan_starts};

/// Background opacity before the first update.
const INITIAL_OPACITY: f32 = 0.15;

/// Share of the camera's global coherence mixed into each baked segment
/// coherence when shading.
const GLOBAL_COHERENCE_MIX: f32 = 0.3;

/// Inputs for one tracer update.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub camera_position: Vec3,
    pub camera_direction: Vec3,
    /// External gain on coherence-driven visibility, typically in `[0, 1]`.
    pub coherence_factor: f32,
    pub delta: f32,
    pub mode: Mode,
    pub breath: BreathState,
}

/// Shading scalars for one background segment. The presentation layer maps
/// these onto its own palette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentShade {
    /// Multiplier on the segment color, `[0.3, 1.0]`.
    pub brightness: f32,
    /// How far the color is pushed towards the dim tone, `[0, 0.6]`.
    pub dim_mix: f32,
}

impl SegmentShade {
    fn from_fields(baked: &ScalarFields, global_coherence: f32) -> Self {
        let coherence = lerp(baked.coherence, global_coherence, GLOBAL_COHERENCE_MIX);
        Self {
            brightness: 0.3 + coherence * 0.7,
            dim_mix: baked.entropy * 0.6,
        }
    }
}

/// What changed during an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TracerUpdate {
    pub recolored: bool,
    pub hero_rebuilt: bool,
}

/// Background + hero streamlines and their per-frame visual state.
pub struct StreamlineTracer {
    field: Arc<FlowField>,
    config: StreamlineConfig,
    background: Vec<Streamline>,
    /// One entry per background segment, in line-then-segment order.
    shades: Vec<SegmentShade>,
    opacity: f32,
    target_opacity: f32,
    recolor_clock: f32,
    hero: Vec<Streamline>,
    hero_visibility: f32,
    hero_target: f32,
    /// Camera pose at the last hero re-trace.
    hero_anchor: Option<HeroAnchor>,
}

/// Camera position and unit viewing direction the hero fan was traced from.
#[derive(Debug, Clone, Copy)]
struct HeroAnchor {
    position: Vec3,
    forward: Vec3,
}

impl StreamlineTracer {
    /// Bake the background set.
    pub fn new(field: Arc<FlowField>, config: StreamlineConfig) -> Result<Self> {
        if field.is_empty() {
            return Err(Error::InvalidGraph("streamline tracer needs at least one node".into()));
        }

        let mut rng = SequenceGenerator::new(config.seed);
        let mut background = Vec::with_capacity(config.count);
        for _ in 0..config.count {
            let start = field.positions()[rng.index(field.len())];
            let fields = field.sample_fields(start);
            let limits = TraceLimits {
                max_steps: step_budget(&fields),
                step_size: config.step_size,
                min_direction_sq: config.min_direction_sq,
                max_distance_sq: config.max_distance_sq,
            };
            background.push(integrate::trace(&field, start, &limits));
        }

        let shades = background
            .iter()
            .flat_map(|line| line.segment_fields.iter())
            .map(|baked| SegmentShade::from_fields(baked, baked.coherence))
            .collect::<Vec<_>>();

        debug!(
            lines = background.len(),
            segments = shades.len(),
            seed = config.seed,
            "background streamlines baked"
        );

        Ok(Self {
            field,
            config,
            background,
            shades,
            opacity: INITIAL_OPACITY,
            target_opacity: INITIAL_OPACITY,
            recolor_clock: 0.0,
            hero: Vec::new(),
            hero_visibility: 0.0,
            hero_target: 0.0,
            hero_anchor: None,
        })
    }

    // ========================================================================
    // Per-frame
    // ========================================================================

    pub fn update(&mut self, ctx: &FrameContext) -> TracerUpdate {
        let global = self.field.sample_fields(ctx.camera_position);
        let mut outcome = TracerUpdate::default();

        self.target_opacity = background_opacity(&global, ctx);
        self.opacity = lerp(self.opacity, self.target_opacity, self.config.opacity_response);

        self.recolor_clock += ctx.delta;
        if self.recolor_clock >= self.config.recolor_interval {
            // Keep the overshoot so refreshes stay on a fixed cadence.
            self.recolor_clock = if self.config.recolor_interval > 0.0 {
                self.recolor_clock % self.config.recolor_interval
            } else {
                0.0
            };
            self.refresh_shades(global.coherence);
            outcome.recolored = true;
        }

        self.hero_target = hero_visibility(&global, ctx);
        self.hero_visibility = lerp(self.hero_visibility, self.hero_target, self.config.hero_response);
        if self.hero_is_stale(ctx.camera_position, ctx.camera_direction) {
            self.rebuild_hero(ctx.camera_position, ctx.camera_direction);
            outcome.hero_rebuilt = true;
        }

        outcome
    }

    fn refresh_shades(&mut self, global_coherence: f32) {
        let baked = self.background.iter().flat_map(|line| line.segment_fields.iter());
        for (shade, fields) in self.shades.iter_mut().zip(baked) {
            *shade = SegmentShade::from_fields(fields, global_coherence);
        }
    }

    /// Stale when never traced, when the camera travelled past the move
    /// threshold, or when a visible set is looking the wrong way.
    fn hero_is_stale(&self, camera: Vec3, direction: Vec3) -> bool {
        let Some(anchor) = self.hero_anchor else {
            return true;
        };
        if anchor.position.distance(camera) > self.config.hero_move_threshold {
            return true;
        }
        if self.hero_target <= self.config.hero_visibility_floor {
            return false;
        }
        let forward = direction.try_normalize().unwrap_or(Vec3::NEG_Z);
        let turn = anchor.forward.dot(forward).clamp(-1.0, 1.0).acos();
        turn > self.config.hero_turn_threshold
    }

    fn rebuild_hero(&mut self, camera: Vec3, direction: Vec3) {
        let basis = ViewBasis::from_forward(direction);
        let limits = TraceLimits {
            max_steps: self.config.hero_max_steps,
            step_size: self.config.hero_step_size,
            min_direction_sq: self.config.min_direction_sq,
            max_distance_sq: self.config.max_distance_sq,
        };
        self.hero = fan_starts(camera, &basis, self.config.hero_count, self.config.hero_lead, self.config.hero_spread)
            .into_iter()
            .map(|start| integrate::trace(&self.field, start, &limits))
            .collect();
        self.hero_anchor = Some(HeroAnchor { position: camera, forward: basis.forward });
        trace!(rays = self.hero.len(), ?camera, "hero streamlines re-traced");
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn background(&self) -> &[Streamline] {
        &self.background
    }

    pub fn hero(&self) -> &[Streamline] {
        &self.hero
    }

    /// Per-segment shades, flattened in background line order.
    pub fn shades(&self) -> &[SegmentShade] {
        &self.shades
    }

    pub fn segment_count(&self) -> usize {
        self.shades.len()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn target_opacity(&self) -> f32 {
        self.target_opacity
    }

    pub fn hero_visibility(&self) -> f32 {
        self.hero_visibility
    }

    pub fn hero_target_visibility(&self) -> f32 {
        self.hero_target
    }
}

/// Coherent regions make the background brighter; Internalized mode lets
/// it rise and fall with the breath.
fn background_opacity(global: &ScalarFields, ctx: &FrameContext) -> f32 {
    let base = 0.08 + global.coherence * ctx.coherence_factor * 0.4;
    match ctx.mode {
        Mode::Default => base,
        Mode::Internalized => base * (0.6 + 0.4 * ctx.breath.phase),
    }
}

fn hero_visibility(global: &ScalarFields, ctx: &FrameContext) -> f32 {
    match ctx.mode {
        Mode::Default => global.coherence * ctx.coherence_factor * 0.5,
        Mode::Internalized => (0.4 + 0.3 * global.coherence) * (0.7 + 0.3 * ctx.breath.phase),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::graph::{build_graph, layout};

    fn field(n: usize) -> Arc<FlowField> {
        let mut g = build_graph(n, 42);
        layout(&mut g, &LayoutConfig::default());
        Arc::new(FlowField::new(&g).unwrap())
    }

    fn breath(phase: f32) -> BreathState {
        BreathState { phase, derivative: 0.0, intensity: 1.0 }
    }

    fn ctx(camera: Vec3, mode: Mode, delta: f32) -> FrameContext {
        FrameContext {
            camera_position: camera,
            camera_direction: Vec3::NEG_Z,
            coherence_factor: 1.0,
            delta,
            mode,
            breath: breath(0.5),
        }
    }

    fn small_config() -> StreamlineConfig {
        StreamlineConfig { count: 40, ..StreamlineConfig::default() }
    }

    #[test]
    fn bakes_requested_line_count_with_one_shade_per_segment() {
        let tracer = StreamlineTracer::new(field(80), small_config()).unwrap();
        assert_eq!(tracer.background().len(), 40);
        let segments: usize = tracer.background().iter().map(Streamline::segment_count).sum();
        assert_eq!(tracer.shades().len(), segments);
        assert_eq!(tracer.segment_count(), segments);
        for line in tracer.background() {
            assert_eq!(line.points.len(), line.segment_count() + 1);
        }
    }

    #[test]
    fn background_lines_respect_step_budget() {
        let f = field(80);
        let tracer = StreamlineTracer::new(f.clone(), small_config()).unwrap();
        for line in tracer.background() {
            let budget = step_budget(&f.sample_fields(line.points[0]));
            assert!(line.segment_count() <= budget);
            assert!(budget <= 50);
        }
    }

    #[test]
    fn same_seed_same_background() {
        let f = field(60);
        let a = StreamlineTracer::new(f.clone(), small_config()).unwrap();
        let b = StreamlineTracer::new(f, small_config()).unwrap();
        assert_eq!(a.background(), b.background());
    }

    #[test]
    fn background_starts_on_nodes() {
        let f = field(60);
        let tracer = StreamlineTracer::new(f.clone(), small_config()).unwrap();
        for line in tracer.background() {
            assert!(f.positions().contains(&line.points[0]));
        }
    }

    #[test]
    fn opacity_eases_towards_target() {
        let mut tracer = StreamlineTracer::new(field(60), small_config()).unwrap();
        let before = tracer.opacity();
        tracer.update(&ctx(Vec3::ZERO, Mode::Default, 0.016));
        let target = tracer.target_opacity();
        let expected = before + (target - before) * 0.05;
        assert!((tracer.opacity() - expected).abs() < 1e-6);
    }

    #[test]
    fn recolor_is_throttled_by_accumulated_delta() {
        let mut tracer = StreamlineTracer::new(field(60), small_config()).unwrap();
        let frame = ctx(Vec3::ZERO, Mode::Default, 0.04);
        assert!(!tracer.update(&frame).recolored);
        assert!(!tracer.update(&frame).recolored);
        assert!(tracer.update(&frame).recolored);
        assert!(!tracer.update(&frame).recolored);
    }

    #[test]
    fn shades_stay_in_documented_ranges() {
        let mut tracer = StreamlineTracer::new(field(60), small_config()).unwrap();
        tracer.update(&ctx(Vec3::ZERO, Mode::Default, 1.0));
        for s in tracer.shades() {
            assert!((0.3..=1.0 + 1e-6).contains(&s.brightness));
            assert!((0.0..=0.6 + 1e-6).contains(&s.dim_mix));
        }
    }

    #[test]
    fn hero_built_on_first_update_then_debounced() {
        let mut tracer = StreamlineTracer::new(field(60), small_config()).unwrap();
        let first = tracer.update(&ctx(Vec3::ZERO, Mode::Internalized, 0.016));
        assert!(first.hero_rebuilt);
        assert_eq!(tracer.hero().len(), 6);

        // Small move: stays cached.
        let second = tracer.update(&ctx(Vec3::new(1.0, 0.0, 0.0), Mode::Internalized, 0.016));
        assert!(!second.hero_rebuilt);

        // Large move while visible: re-traced.
        let third = tracer.update(&ctx(Vec3::new(10.0, 0.0, 0.0), Mode::Internalized, 0.016));
        assert!(third.hero_rebuilt);
    }

    #[test]
    fn invisible_hero_set_ignores_turns() {
        let mut tracer = StreamlineTracer::new(field(60), small_config()).unwrap();
        let mut frame = ctx(Vec3::ZERO, Mode::Default, 0.016);
        frame.coherence_factor = 0.0;
        assert!(tracer.update(&frame).hero_rebuilt);

        frame.camera_direction = Vec3::X;
        let turned = tracer.update(&frame);
        assert_eq!(tracer.hero_target_visibility(), 0.0);
        assert!(!turned.hero_rebuilt);
    }

    #[test]
    fn large_move_retraces_even_when_invisible() {
        let mut tracer = StreamlineTracer::new(field(60), small_config()).unwrap();
        let mut frame = ctx(Vec3::ZERO, Mode::Default, 0.016);
        frame.coherence_factor = 0.0;
        tracer.update(&frame);

        frame.camera_position = Vec3::splat(30.0);
        let moved = tracer.update(&frame);
        assert_eq!(tracer.hero_target_visibility(), 0.0);
        assert!(moved.hero_rebuilt);
    }

    #[test]
    fn turning_in_place_retraces_visible_hero_set() {
        let mut tracer = StreamlineTracer::new(field(60), small_config()).unwrap();
        let mut frame = ctx(Vec3::ZERO, Mode::Internalized, 0.016);
        tracer.update(&frame);
        let before = tracer.hero().to_vec();

        // A slight turn stays cached.
        frame.camera_direction = Vec3::new(0.05, 0.0, -1.0);
        assert!(!tracer.update(&frame).hero_rebuilt);

        frame.camera_direction = Vec3::X;
        let turned = tracer.update(&frame);
        assert!(tracer.hero_target_visibility() > 0.02);
        assert!(turned.hero_rebuilt);
        assert_ne!(tracer.hero(), before.as_slice());
        let starts: Vec<Vec3> = tracer.hero().iter().map(|line| line.points[0]).collect();
        for start in starts {
            assert!((start.x - 4.0).abs() < 1e-4, "fan not centred ahead along +X: {start}");
        }
    }

    #[test]
    fn recolor_keeps_clock_overshoot() {
        let mut tracer = StreamlineTracer::new(field(60), small_config()).unwrap();
        let frame = ctx(Vec3::ZERO, Mode::Default, 0.07);
        assert!(!tracer.update(&frame).recolored);
        // 0.14 refreshes and carries 0.04 forward.
        assert!(tracer.update(&frame).recolored);
        // 0.04 + 0.07 crosses the interval again.
        assert!(tracer.update(&frame).recolored);
    }

    #[test]
    fn internalized_hero_target_follows_breath() {
        let global = ScalarFields { coherence: 1.0, entropy: 0.0, flow_strength: 0.0 };
        let mut c = ctx(Vec3::ZERO, Mode::Internalized, 0.0);
        c.breath = breath(0.0);
        let low = hero_visibility(&global, &c);
        c.breath = breath(1.0);
        let high = hero_visibility(&global, &c);
        assert!((low - 0.49).abs() < 1e-6);
        assert!((high - 0.7).abs() < 1e-6);
    }
}
