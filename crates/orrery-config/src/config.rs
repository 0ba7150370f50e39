//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Planet geometry.
    pub planet: PlanetConfig,
    /// Level-of-detail tuning.
    pub lod: LodConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Planet geometry configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Planet radius in meters.
    pub radius: f64,
    /// Planet center in world space, meters.
    pub center: [f64; 3],
}

impl Default for PlanetConfig {
    fn default() -> Self {
        // Earth-sized planet with the surface passing through the origin.
        let radius = 6_360_000.0;
        Self {
            radius,
            center: [0.0, -radius, 0.0],
        }
    }
}

/// Level-of-detail tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LodConfig {
    /// Maximum quadtree refinement below the root.
    pub detail_levels: u32,
    /// Vertices per side of the shared grid mesh.
    pub grid_dimension: u32,
}

impl LodConfig {
    /// Grid cells of overlap between adjacent patches, used to hide seams
    /// across LOD transitions. Measured in cells so it scales with patch
    /// size.
    #[must_use]
    pub fn overlap_cells(&self) -> u32 {
        self.grid_dimension / 16
    }
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            detail_levels: 16,
            grid_dimension: 129,
        }
    }
}

/// Debug/development settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g. "debug", "info", "warn").
    pub log_level: String,
    /// Log every frame's report instead of sampling.
    pub log_every_frame: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: String::new(),
            log_every_frame: false,
        }
    }
}

impl Config {
    /// Load a config from a RON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a config, falling back to defaults when the file is missing.
    /// A malformed file is still an error; silently replacing a config the
    /// user edited would hide the mistake.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the config as pretty-printed RON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_planet() {
        let config = Config::default();
        assert_eq!(config.planet.radius, 6_360_000.0);
        assert_eq!(config.planet.center, [0.0, -6_360_000.0, 0.0]);
        assert_eq!(config.lod.detail_levels, 16);
        assert_eq!(config.lod.grid_dimension, 129);
        assert_eq!(config.lod.overlap_cells(), 8);
    }

    #[test]
    fn test_ron_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orrery.ron");

        let mut config = Config::default();
        config.planet.radius = 1_737_400.0; // the Moon
        config.lod.detail_levels = 12;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.ron");
        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        std::fs::write(&path, "(planet: oops").unwrap();
        let err = Config::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.ron"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.ron");
        std::fs::write(&path, "(lod: (detail_levels: 8))").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.lod.detail_levels, 8);
        assert_eq!(config.lod.grid_dimension, 129);
        assert_eq!(config.planet, PlanetConfig::default());
    }
}
