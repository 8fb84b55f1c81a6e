//! Validator thresholds and patterns.

use crate::error::ArmatureError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MIN_HOOK_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_MAX_UNRESOLVED_TENSION: f64 = 3.0;
pub const DEFAULT_VERSION_PATTERN: &str = r"^[0-9]+\.[0-9]+\.[0-9]+$";
pub const DEFAULT_BLOCK_TYPE_EXEMPT: &str = "custom";

/// Tunable parameters, loadable from TOML. Missing keys keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Hooks below this confidence get a warning.
    pub min_hook_confidence: f64,
    /// Unresolved tension above this total gets a warning.
    pub max_unresolved_tension: f64,
    /// Pattern both version fields must match.
    pub version_pattern: String,
    /// Block type exempt from the per-segment duplicate check.
    pub block_type_exempt: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_hook_confidence: DEFAULT_MIN_HOOK_CONFIDENCE,
            max_unresolved_tension: DEFAULT_MAX_UNRESOLVED_TENSION,
            version_pattern: DEFAULT_VERSION_PATTERN.to_string(),
            block_type_exempt: DEFAULT_BLOCK_TYPE_EXEMPT.to_string(),
        }
    }
}

impl ValidatorConfig {
    pub fn from_toml_str(text: &str, path: &str) -> Result<Self, ArmatureError> {
        toml::from_str(text).map_err(|source| ArmatureError::ParseConfig {
            path: path.to_string(),
            source,
        })
    }

    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self, ArmatureError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ArmatureError::ReadFile {
            path: display.clone(),
            source,
        })?;
        Self::from_toml_str(&text, &display)
    }

    pub(crate) fn compile_version_pattern(&self) -> Result<Regex, ArmatureError> {
        Regex::new(&self.version_pattern).map_err(|source| ArmatureError::InvalidPattern {
            name: "version",
            pattern: self.version_pattern.clone(),
            source,
        })
    }
}
