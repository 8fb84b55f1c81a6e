use crate::cli::ValidatorArgs;
use crate::render::print_report;
use crate::support::{build_validator_or_exit, file_label, print_json_or_exit};
use armature_kernel::{ArmatureError, ValidationReport, Validator, list_documents, load_json};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub fn run(
    file: Option<String>,
    all: bool,
    dir: String,
    validator_args: ValidatorArgs,
    json_output: bool,
) {
    let validator = build_validator_or_exit(&validator_args);
    match (file, all) {
        (_, true) => run_batch(&validator, Path::new(&dir), json_output),
        (Some(file), false) => run_single(&validator, Path::new(&file), json_output),
        (None, false) => {
            eprintln!("error: a skeleton file or --all must be provided");
            std::process::exit(1);
        }
    }
}

#[derive(Debug, Serialize)]
struct FileOutcome {
    file: String,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<ValidationReport>,
}

/// Load and validate one file. Input failures never run a pass.
fn check_file(
    validator: &Validator,
    path: &Path,
) -> Result<(serde_json::Value, ValidationReport), ArmatureError> {
    let raw = load_json(path)?;
    let report = validator.validate_value(&raw)?;
    Ok((raw, report))
}

fn validate_one(validator: &Validator, path: &Path, json_output: bool) -> FileOutcome {
    let file = path.display().to_string();
    match check_file(validator, path) {
        Ok((raw, report)) => {
            if !json_output {
                print_report(&raw, &report, &file);
            }
            FileOutcome {
                file,
                passed: report.passed,
                error: None,
                report: Some(report),
            }
        }
        Err(e) => {
            if !json_output {
                eprintln!("error: {e}");
            }
            FileOutcome {
                file,
                passed: false,
                error: Some(e.to_string()),
                report: None,
            }
        }
    }
}

fn run_single(validator: &Validator, path: &Path, json_output: bool) {
    let outcome = validate_one(validator, path, json_output);
    if json_output {
        print_json_or_exit(&outcome);
    }
    std::process::exit(if outcome.passed { 0 } else { 1 });
}

fn run_batch(validator: &Validator, dir: &Path, json_output: bool) {
    if !dir.is_dir() {
        eprintln!("error: skeleton directory not found: {}", dir.display());
        std::process::exit(1);
    }
    let paths: Vec<PathBuf> = list_documents(dir).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    if paths.is_empty() {
        eprintln!("error: no JSON files in {}", dir.display());
        std::process::exit(1);
    }
    info!(dir = %dir.display(), files = paths.len(), "validating skeleton directory");

    let mut outcomes = Vec::with_capacity(paths.len());
    for path in &paths {
        let outcome = validate_one(validator, path, json_output);
        debug!(file = %outcome.file, passed = outcome.passed, "file validated");
        outcomes.push(outcome);
    }
    let passed_count = outcomes.iter().filter(|outcome| outcome.passed).count();
    let all_passed = passed_count == outcomes.len();

    if json_output {
        print_json_or_exit(&serde_json::json!({
            "dir": dir.display().to_string(),
            "passed": passed_count,
            "total": outcomes.len(),
            "files": outcomes,
        }));
    } else {
        let rule = "=".repeat(60);
        println!();
        println!("{rule}");
        println!("Summary");
        println!("{rule}");
        println!("passed: {passed_count}/{}", outcomes.len());
        for (path, outcome) in paths.iter().zip(&outcomes) {
            let status = if outcome.passed { "PASS" } else { "FAIL" };
            println!("  {status} {}", file_label(path));
        }
    }

    std::process::exit(if all_passed { 0 } else { 1 });
}
