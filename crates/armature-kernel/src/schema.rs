//! Schema-engine seam.
//!
//! The kernel does not ship a JSON-Schema implementation. A validator built
//! with a [`SchemaEngine`] runs it over the raw document before the
//! structural pass; every violation becomes an error.

use crate::report::{Findings, failure_class};
use serde_json::Value;

/// One schema mismatch: where it is and what is wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Path components from the document root to the offending value.
    pub path: Vec<String>,
    pub message: String,
}

impl SchemaViolation {
    /// Dotted path, or `<root>` for the document itself.
    pub fn dotted_path(&self) -> String {
        if self.path.is_empty() {
            "<root>".to_string()
        } else {
            self.path.join(".")
        }
    }
}

pub trait SchemaEngine {
    /// Name of the engine (for diagnostics).
    fn name(&self) -> &str;

    /// Check `instance` against the preloaded schema. Empty means valid.
    fn check(&self, instance: &Value) -> Vec<SchemaViolation>;
}

pub fn check(engine: &dyn SchemaEngine, instance: &Value, findings: &mut Findings) {
    for violation in engine.check(instance) {
        let path = violation.dotted_path();
        findings.error(
            failure_class::SCHEMA_VIOLATION,
            path.clone(),
            format!("schema validation failed: {path} -> {}", violation.message),
        );
    }
}
