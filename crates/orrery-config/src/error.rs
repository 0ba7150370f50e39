//! Errors surfaced by the config layer.

use std::path::PathBuf;

/// Failure while loading, parsing, or persisting a config file.
///
/// Read and parse failures carry the offending path so the message is
/// actionable without caller-side context.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write config file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {} is not valid RON", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("could not serialize config")]
    Serialize(#[from] ron::Error),
}
