//! concept-field binary
//!
//! Builds a concept world, runs it headless for a number of frames and
//! writes the final scene as JSON.
//!
//! ## Usage
//!
//! ```bash
//! # Default world, 600 frames at 60 fps, snapshot to stdout
//! concept-field
//!
//! # Custom config, drifting in Internalized mode, snapshot to a file
//! concept-field --config world.json --drift --internalized --out scene.json
//! ```
//!
//! Logging goes to stderr and honours `RUST_LOG`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use concept_field::{ConceptWorld, FrameInput, WorldConfig, export};

/// Headless runner for the concept-graph flow field.
#[derive(Parser, Debug)]
#[command(name = "concept-field")]
#[command(about = "Simulate a concept-graph flow field and export the scene")]
struct Args {
    /// JSON config file; missing keys fall back to defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Seconds per frame
    #[arg(short, long, default_value_t = 1.0 / 60.0)]
    delta: f32,

    /// Enable drift before the first frame
    #[arg(long)]
    drift: bool,

    /// Start in Internalized mode
    #[arg(long)]
    internalized: bool,

    /// Write the snapshot here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "concept-field failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> concept_field::Result<()> {
    let config = match &args.config {
        Some(path) => WorldConfig::from_path(path)?,
        None => WorldConfig::default(),
    };

    let mut world = ConceptWorld::build(config)?;
    if args.drift {
        world.toggle_drift();
    }
    if args.internalized {
        world.toggle_mode();
    }

    let mut rebuilds = 0u32;
    for _ in 0..args.frames {
        let out = world.frame(FrameInput::new(args.delta));
        if out.streamlines.hero_rebuilt {
            rebuilds += 1;
        }
    }

    let params = world.bus().camera_params();
    info!(
        frames = world.frames(),
        hero_rebuilds = rebuilds,
        coherence = params.fields.coherence,
        alignment = params.alignment,
        position = ?world.camera().position,
        "simulation finished"
    );

    match &args.out {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            export::write_scene_json(&world, &mut writer)?;
            writer.flush()?;
            info!(path = %path.display(), "scene written");
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            export::write_scene_json(&world, &mut lock)?;
        }
    }

    Ok(())
}
