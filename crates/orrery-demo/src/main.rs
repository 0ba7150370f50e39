//! Headless terrain LOD demo.
//!
//! Drops a viewer from orbital altitude down to near the surface and runs
//! the full update/render loop against the recording device, logging the
//! per-frame reports. Configuration is loaded from `orrery.ron` when present
//! and can be overridden via CLI flags:
//!
//! `cargo run -p orrery-demo -- --frames 240 --detail-levels 12`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::DVec3;
use orrery_config::{CliArgs, Config};
use orrery_render::{Frustum, RecordingDevice};
use orrery_terrain::PlanetTerrain;
use tracing::{error, info};

/// Altitude at the end of the descent, meters above the surface.
const FINAL_ALTITUDE: f64 = 100.0;

#[derive(Parser, Debug)]
#[command(name = "orrery-demo", about = "Headless planet-surface LOD demo")]
struct Args {
    #[command(flatten)]
    config: CliArgs,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u32,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config_path = args
        .config
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("orrery.ron"));
    let mut config = match Config::load_or_default(&config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load {}: {err}", config_path.display());
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args.config);

    orrery_log::init_logging(Some(&config));

    let mut device = RecordingDevice::new();
    let mut terrain = match PlanetTerrain::new(&mut device, &config) {
        Ok(terrain) => terrain,
        Err(err) => {
            error!("terrain setup failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        radius = config.planet.radius,
        detail_levels = config.lod.detail_levels,
        frames = args.frames,
        "starting descent"
    );

    let start_altitude = 2.0 * config.planet.radius;
    let frustum = Frustum::accept_all();
    let mut total_draws = 0usize;
    let mut max_level = 0u32;

    for frame in 0..args.frames {
        // Exponential descent: equal altitude ratios per frame, so every
        // LOD band gets a similar share of the run.
        let t = f64::from(frame) / f64::from(args.frames.max(2) - 1);
        let altitude = start_altitude * (FINAL_ALTITUDE / start_altitude).powf(t);

        device.clear_draws();
        terrain.set_viewer(DVec3::new(0.0, altitude, 0.0));
        terrain.update();
        let report = terrain.render(&mut device, &frustum);

        total_draws += report.nodes_rendered;
        max_level = max_level.max(report.lod_level);

        if config.debug.log_every_frame || frame % 10 == 0 {
            info!(
                frame,
                altitude,
                level = report.lod_level,
                rendered = report.nodes_rendered,
                culled = report.nodes_culled,
                map_x = report.map_x,
                map_y = report.map_y,
                "frame"
            );
        }
    }

    info!(
        frames = args.frames,
        total_draws, max_level, "descent complete"
    );

    ExitCode::SUCCESS
}
