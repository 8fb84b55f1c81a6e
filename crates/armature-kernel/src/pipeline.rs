//! Validator: runs every pass over one document and assembles the report.
//!
//! Pass order is fixed: schema (when configured), structural, hooks,
//! tension field, versioning, then statistics. The validator holds only
//! immutable configuration, so one instance can validate any number of
//! documents in sequence.

use crate::config::ValidatorConfig;
use crate::error::ArmatureError;
use crate::model::Skeleton;
use crate::report::{Findings, Severity, ValidationReport};
use crate::schema::{self, SchemaEngine};
use crate::{hooks, stats, structure, tension, versioning};
use regex::Regex;
use serde_json::Value;
use tracing::{debug, info};

pub struct Validator {
    config: ValidatorConfig,
    version_re: Regex,
    schema: Option<Box<dyn SchemaEngine>>,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Result<Self, ArmatureError> {
        let version_re = config.compile_version_pattern()?;
        Ok(Self {
            config,
            version_re,
            schema: None,
        })
    }

    /// Run `engine` over the raw document before the custom passes.
    pub fn with_schema(mut self, engine: Box<dyn SchemaEngine>) -> Self {
        self.schema = Some(engine);
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn has_schema(&self) -> bool {
        self.schema.is_some()
    }

    /// Validate a parsed JSON document.
    ///
    /// Fails only when the value cannot be read as a skeleton at all.
    pub fn validate_value(&self, raw: &Value) -> Result<ValidationReport, ArmatureError> {
        let skeleton = Skeleton::from_value(raw)?;
        Ok(self.run(raw, &skeleton))
    }

    /// Validate an already-typed skeleton.
    pub fn validate(&self, skeleton: &Skeleton) -> Result<ValidationReport, ArmatureError> {
        let raw = serde_json::to_value(skeleton)?;
        Ok(self.run(&raw, skeleton))
    }

    fn run(&self, raw: &Value, skeleton: &Skeleton) -> ValidationReport {
        let mut findings = Findings::new();

        if let Some(engine) = self.schema.as_deref() {
            run_pass("schema", &mut findings, |f| schema::check(engine, raw, f));
        }
        run_pass("structure", &mut findings, |f| {
            structure::check(skeleton, &self.config.block_type_exempt, f)
        });
        run_pass("hooks", &mut findings, |f| {
            hooks::check(skeleton, self.config.min_hook_confidence, f)
        });
        run_pass("tension", &mut findings, |f| {
            tension::check(skeleton, self.config.max_unresolved_tension, f)
        });
        run_pass("versioning", &mut findings, |f| {
            versioning::check(skeleton, &self.version_re, f)
        });

        let stats = stats::compute(skeleton);
        let report = ValidationReport::from_findings(findings, stats);
        info!(
            passed = report.passed,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            segments = report.stats.total_segments,
            "skeleton validated"
        );
        report
    }
}

fn run_pass(name: &str, findings: &mut Findings, pass: impl FnOnce(&mut Findings)) {
    let errors_before = findings.count(Severity::Error);
    let warnings_before = findings.count(Severity::Warning);
    pass(findings);
    debug!(
        pass = name,
        errors = findings.count(Severity::Error) - errors_before,
        warnings = findings.count(Severity::Warning) - warnings_before,
        "pass complete"
    );
}
