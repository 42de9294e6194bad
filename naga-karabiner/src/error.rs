//! Error types for rule generation and karabiner.json splicing

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading, editing or writing karabiner.json
#[derive(Error, Debug)]
pub enum SpliceError {
    /// The config file could not be read
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid JSON
    #[error("Could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Compiled rules or the edited document failed to serialize
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The edited document could not be written back
    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Error type for parsing an [`Action`](crate::Action) from combo syntax.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseActionError {
    #[error("empty key combo")]
    Empty,

    #[error("empty segment in key combo: \"{0}\"")]
    EmptySegment(String),
}
