//! Structured error types for condy-core.
//!
//! The selector itself never fails; errors only come from the edges that
//! touch the filesystem (candidate directories, config). Binary crates wrap
//! these in `anyhow` at the top level.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for condy-core operations.
#[derive(Error, Debug)]
pub enum CondyError {
    /// Reading a file failed.
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A candidate directory was not valid JSON.
    #[error("JSON error in {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The JSON parsed but is not an array of candidate objects.
    #[error("invalid candidate directory {path:?}: {reason}")]
    InvalidDirectory { path: PathBuf, reason: String },

    /// Loading or deserialising the config file failed.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, CondyError>;
