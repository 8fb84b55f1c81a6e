//! JSON-Schema adapter.
//!
//! This crate is intentionally thin: it compiles one Draft 7 schema up front
//! and reports every mismatch as a [`SchemaViolation`]. The compiled schema
//! is immutable and reused across validations.

use armature_kernel::{SchemaEngine, SchemaViolation};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_SCHEMA_PATH: &str = "schemas/skeleton-schema.json";

/// Errors from loading or compiling a schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read schema: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schema json at {path}: {source}")]
    ParseJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("schema does not compile: {0}")]
    Compile(String),
}

/// Draft 7 JSON-Schema engine.
pub struct JsonSchemaEngine {
    name: String,
    compiled: JSONSchema,
}

impl JsonSchemaEngine {
    pub fn from_value(name: impl Into<String>, schema: &Value) -> Result<Self, SchemaError> {
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema)
            .map_err(|e| SchemaError::Compile(e.to_string()))?;
        let name = name.into();
        debug!(schema = %name, "schema compiled");
        Ok(Self { name, compiled })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let bytes = fs::read(path).map_err(|source| SchemaError::ReadFile {
            path: display.clone(),
            source,
        })?;
        let schema: Value =
            serde_json::from_slice(&bytes).map_err(|source| SchemaError::ParseJson {
                path: display.clone(),
                source,
            })?;
        Self::from_value(display, &schema)
    }
}

impl SchemaEngine for JsonSchemaEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, instance: &Value) -> Vec<SchemaViolation> {
        let Err(errors) = self.compiled.validate(instance) else {
            return Vec::new();
        };
        let violations: Vec<SchemaViolation> = errors
            .map(|error| SchemaViolation {
                message: error.to_string(),
                path: error.instance_path.clone().into_vec(),
            })
            .collect();
        debug!(schema = %self.name, violations = violations.len(), "schema checked");
        violations
    }
}
