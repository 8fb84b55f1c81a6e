//! Error types for Armature kernel operations.
//!
//! These are input-level failures: they stop a single document before any
//! pass runs. Findings produced by the passes are never errors in this sense;
//! they live in [`crate::report::ValidationReport`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArmatureError {
    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json at {path}: {source}")]
    ParseJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The value parsed as JSON but cannot be read as a skeleton.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid {name} pattern {pattern:?}: {source}")]
    InvalidPattern {
        name: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseConfig {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl From<serde_json::Error> for ArmatureError {
    fn from(source: serde_json::Error) -> Self {
        Self::InvalidInput(source.to_string())
    }
}
