//! Command-line overrides for the terrain engine.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Terrain engine command-line arguments.
///
/// CLI values override settings loaded from the RON config file.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Planet-surface LOD terrain engine")]
pub struct CliArgs {
    /// Planet radius in meters.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Maximum quadtree refinement depth.
    #[arg(long)]
    pub detail_levels: Option<u32>,

    /// Vertices per side of the shared grid mesh.
    #[arg(long)]
    pub grid_dimension: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to the config file (overrides the default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(radius) = args.radius {
            // Keep the surface through the origin unless the file moved it.
            if self.planet.center == [0.0, -self.planet.radius, 0.0] {
                self.planet.center = [0.0, -radius, 0.0];
            }
            self.planet.radius = radius;
        }
        if let Some(levels) = args.detail_levels {
            self.lod.detail_levels = levels;
        }
        if let Some(dim) = args.grid_dimension {
            self.lod.grid_dimension = dim;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            radius: Some(1_737_400.0),
            detail_levels: Some(10),
            grid_dimension: None,
            log_level: Some("debug".to_owned()),
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.planet.radius, 1_737_400.0);
        assert_eq!(config.planet.center, [0.0, -1_737_400.0, 0.0]);
        assert_eq!(config.lod.detail_levels, 10);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults.
        assert_eq!(config.lod.grid_dimension, 129);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }
}
