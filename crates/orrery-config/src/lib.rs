//! Configuration for the terrain engine.
//!
//! Runtime-configurable settings persisted as RON files, with serde-default
//! forward compatibility and CLI overrides via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, LodConfig, PlanetConfig};
pub use error::ConfigError;
