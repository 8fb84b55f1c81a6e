//! Findings and the validation report.
//!
//! Passes push [`ValidationIssue`] rows into a shared [`Findings`]
//! accumulator. Emission order is preserved: pass order first, then document
//! traversal order within each pass.

use crate::stats::SkeletonStats;
use serde::{Deserialize, Serialize};

pub mod failure_class {
    pub const SCHEMA_VIOLATION: &str = "schema_violation";
    pub const MISSING_FIELD: &str = "missing_field";
    pub const DUPLICATE_SEGMENT_ID: &str = "duplicate_segment_id";
    pub const DUPLICATE_BLOCK_TYPE: &str = "duplicate_block_type";
    pub const DUPLICATE_HOOK_ID: &str = "duplicate_hook_id";
    pub const INCOMPLETE_HOOK: &str = "incomplete_hook";
    pub const LOW_HOOK_CONFIDENCE: &str = "low_hook_confidence";
    pub const DANGLING_TENSION_SOURCE: &str = "dangling_tension_source";
    pub const UNRESOLVED_DIRECTION_REF: &str = "unresolved_direction_ref";
    pub const TENSION_OVERLOAD: &str = "tension_overload";
    pub const MALFORMED_VERSION: &str = "malformed_version";
    pub const TIMESTAMP_ORDER: &str = "timestamp_order";
    pub const UNPARSEABLE_TIMESTAMP: &str = "unparseable_timestamp";
    pub const CHANGELOG_MISSING_VERSION: &str = "changelog_missing_version";
}

/// Errors fail the document; warnings never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub severity: Severity,
    pub failure_class: String,
    pub path: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Findings {
    issues: Vec<ValidationIssue>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, failure_class: &str, path: impl Into<String>, message: String) {
        self.push(Severity::Error, failure_class, path.into(), message);
    }

    pub fn warning(&mut self, failure_class: &str, path: impl Into<String>, message: String) {
        self.push(Severity::Warning, failure_class, path.into(), message);
    }

    fn push(&mut self, severity: Severity, failure_class: &str, path: String, message: String) {
        self.issues.push(ValidationIssue {
            severity,
            failure_class: failure_class.to_string(),
            path,
            message,
        });
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    pub passed: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: SkeletonStats,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn from_findings(findings: Findings, stats: SkeletonStats) -> Self {
        let issues = findings.into_issues();
        let messages = |severity: Severity| -> Vec<String> {
            issues
                .iter()
                .filter(|issue| issue.severity == severity)
                .map(|issue| issue.message.clone())
                .collect()
        };
        let errors = messages(Severity::Error);
        let warnings = messages(Severity::Warning);
        Self {
            passed: errors.is_empty(),
            errors,
            warnings,
            stats,
            issues,
        }
    }

    pub fn failure_classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = self
            .issues
            .iter()
            .map(|issue| issue.failure_class.as_str())
            .collect();
        classes.sort_unstable();
        classes.dedup();
        classes
    }
}
