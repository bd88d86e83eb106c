//! End-to-end tests for the world handle.
//!
//! Each test builds a full world (graph -> layout -> flow field ->
//! streamlines) and drives it frame by frame the way a render loop would.

use concept_field::{ConceptWorld, FrameInput, Mode, ScalarFields, WorldConfig};
use glam::Vec3;
use pretty_assertions::assert_eq;

// ============================================================================
// Helper: a world small enough to build quickly.
// ============================================================================

fn small_config() -> WorldConfig {
    let mut config = WorldConfig::default();
    config.graph.node_count = 80;
    config.streamlines.count = 24;
    config
}

fn small_world() -> ConceptWorld {
    ConceptWorld::build(small_config()).unwrap()
}

// ============================================================================
// 1. Build
// ============================================================================

#[test]
fn test_default_world_builds() {
    let world = ConceptWorld::build(WorldConfig::default()).unwrap();
    assert_eq!(world.graph().node_count(), 300);
    assert_eq!(world.streamlines().background().len(), 200);
    assert_eq!(world.layout_report().iterations, 30);
    assert_eq!(world.frames(), 0);
    assert_eq!(world.camera().position, Vec3::new(0.0, 20.0, 80.0));
}

#[test]
fn test_empty_world_is_rejected() {
    let mut config = WorldConfig::default();
    config.graph.node_count = 0;
    let err = ConceptWorld::build(config).err().unwrap();
    assert!(matches!(err, concept_field::Error::InvalidGraph(_)));
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = small_config();
    config.breath.period = 0.0;
    let err = ConceptWorld::build(config).err().unwrap();
    assert!(matches!(err, concept_field::Error::InvalidConfig(_)));
}

#[test]
fn test_partial_json_config() {
    let config = WorldConfig::from_json_str(r#"{ "graph": { "node_count": 50 } }"#).unwrap();
    let world = ConceptWorld::build(config).unwrap();
    assert_eq!(world.graph().node_count(), 50);
    assert_eq!(world.config().graph.seed, 42);
}

// ============================================================================
// 2. Frames
// ============================================================================

#[test]
fn test_first_frame_traces_hero_lines() {
    let mut world = small_world();
    let out = world.frame(FrameInput::new(0.016));
    assert!(out.streamlines.hero_rebuilt);
    assert_eq!(world.streamlines().hero().len(), 6);
    assert_eq!(world.frames(), 1);
}

#[test]
fn test_static_camera_does_not_retrace_hero() {
    let mut world = small_world();
    world.frame(FrameInput::new(0.016));
    for _ in 0..30 {
        let out = world.frame(FrameInput::new(0.016));
        assert!(!out.streamlines.hero_rebuilt);
    }
}

#[test]
fn test_recolor_is_throttled() {
    let mut world = small_world();
    let recolors = (0..60)
        .filter(|_| world.frame(FrameInput::new(0.02)).streamlines.recolored)
        .count();
    // 1.2 time units at one recolor per 0.1.
    assert!((10..=12).contains(&recolors), "recolored {recolors} times");
}

#[test]
fn test_output_reflects_bus_state() {
    let mut world = small_world();
    let out = world.frame(FrameInput::new(0.016));
    assert_eq!(out.camera, *world.bus().camera_params());
    assert_eq!(out.mode, Mode::Default);
    assert_eq!(out.camera.position, world.camera().position);
    assert!(out.edges_visible);
}

// ============================================================================
// 3. Drift
// ============================================================================

#[test]
fn test_drift_moves_camera() {
    let mut world = small_world();
    let start = world.camera().position;
    assert!(world.toggle_drift());
    for _ in 0..120 {
        world.frame(FrameInput::new(1.0 / 60.0));
    }
    assert!(world.camera().position.distance(start) > 0.1);
    assert!(world.bus().camera_params().drift_enabled);
}

#[test]
fn test_drift_off_camera_coasts_to_rest() {
    let mut world = small_world();
    world.toggle_drift();
    for _ in 0..60 {
        world.frame(FrameInput::new(1.0 / 60.0));
    }
    assert!(!world.toggle_drift());
    for _ in 0..200 {
        let out = world.frame(FrameInput::new(1.0 / 60.0));
        assert_eq!(out.camera.alignment, 0.0);
    }
    assert!(world.drift().velocity().length() < 1e-6);
}

#[test]
fn test_impulse_pushes_camera_then_fades() {
    let mut world = small_world();
    let start = world.camera().position;
    world.drift_mut().set_velocity(Vec3::new(6.0, 0.0, 0.0));

    world.frame(FrameInput::new(0.5));
    let pushed = world.camera().position;
    assert!(pushed.x > start.x);
    assert_eq!(pushed.y, start.y);
    assert_eq!(pushed.z, start.z);
    assert!((world.drift().velocity().x - 6.0 * 0.85).abs() < 1e-4);

    for _ in 0..120 {
        world.frame(FrameInput::new(1.0 / 60.0));
    }
    assert!(world.drift().velocity().length() < 1e-6);
    assert!(world.camera().position.x > pushed.x);
}

#[test]
fn test_alignment_is_bounded() {
    let mut world = small_world();
    world.toggle_drift();
    for _ in 0..300 {
        let out = world.frame(FrameInput::new(1.0 / 30.0));
        assert!((-1.0..=1.0).contains(&out.camera.alignment));
        assert!(out.edge_opacity >= 0.12 - 1e-6 && out.edge_opacity <= 0.47 + 1e-6);
    }
}

// ============================================================================
// 4. Mode
// ============================================================================

#[test]
fn test_internalized_mode_smooths_fields() {
    let mut world = small_world();
    world.toggle_mode();
    let out = world.frame(FrameInput::new(0.016));
    assert_eq!(out.mode, Mode::Internalized);
    let raw = world.field().sample_fields(world.camera().position);
    let expected = ScalarFields::NEUTRAL.lerp(&raw, 0.02);
    assert_eq!(out.camera.fields, expected);
}

#[test]
fn test_mode_toggle_restarts_breath() {
    let mut world = small_world();
    for _ in 0..10 {
        world.frame(FrameInput::new(1.0));
    }
    assert_eq!(world.toggle_mode(), Mode::Internalized);
    let breath = world.bus().breath();
    assert!((breath.phase - 0.5).abs() < 1e-6);
    assert!((breath.derivative - 1.0).abs() < 1e-6);
}

#[test]
fn test_internalized_hero_stays_visible() {
    let mut world = small_world();
    world.toggle_mode();
    world.frame(FrameInput::new(0.016));
    // Internalized floor is (0.4 + 0.3c)(0.7 + 0.3 phase) >= 0.28.
    assert!(world.streamlines().hero_target_visibility() >= 0.28 - 1e-6);
}

// ============================================================================
// 5. Hover
// ============================================================================

#[test]
fn test_hover_reports_node_fields() {
    let mut world = small_world();
    let out = world.frame(FrameInput::new(0.016).with_hover(Some(3)));
    assert_eq!(out.hover.hovered_index, Some(3));
    assert_eq!(out.hover.hovered_fields, Some(world.field().node_fields(3)));
}

#[test]
fn test_hover_highlight_follows_last_frame() {
    let mut world = small_world();
    world.frame(FrameInput::new(0.016).with_hover(Some(3)));
    let highlight = world.hover_highlight();
    let id = concept_field::NodeId(3);
    assert_eq!(highlight.hovered(), Some(id));
    for &nb in world.graph().neighbors(id) {
        assert!(highlight.is_highlighted_node(nb));
        assert!(highlight.label_visible(nb));
    }

    world.frame(FrameInput::new(0.016));
    assert_eq!(world.hover_highlight().hovered(), None);
}

#[test]
fn test_stale_hover_is_neutral() {
    let mut world = small_world();
    let out = world.frame(FrameInput::new(0.016).with_hover(Some(500)));
    assert_eq!(out.hover.hovered_fields, Some(ScalarFields::NEUTRAL));
}

#[test]
fn test_far_camera_hides_edges() {
    let mut world = small_world();
    world.camera_mut().position = Vec3::new(0.0, 0.0, 300.0);
    let out = world.frame(FrameInput::new(0.016));
    assert!(!out.edges_visible);
}

// ============================================================================
// 6. Export
// ============================================================================

#[test]
fn test_export_after_frames() {
    let mut world = small_world();
    world.toggle_drift();
    for _ in 0..10 {
        world.frame(FrameInput::new(0.05));
    }
    let mut buf = Vec::new();
    concept_field::export::write_scene_json(&world, &mut buf).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(value["header"]["frames"], 10);
    assert_eq!(value["params"]["drift_enabled"], true);
    assert_eq!(value["nodes"].as_array().unwrap().len(), 80);
}
