//! Human-readable report output.

use crate::support::group_thousands;
use armature_kernel::{SkeletonStats, ValidationReport};
use serde_json::Value;

const RULE_WIDTH: usize = 60;

pub fn print_report(raw: &Value, report: &ValidationReport, filename: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!();
    println!("{rule}");
    println!("Semantic skeleton validation report");
    if !filename.is_empty() {
        println!("File: {filename}");
    }
    println!("{rule}");

    println!();
    println!("Basic information:");
    println!("  Title: {}", field_or_na(raw, "title"));
    println!("  Schema version: {}", field_or_na(raw, "schema_version"));
    println!("  Skeleton version: {}", field_or_na(raw, "skeleton_version"));
    println!("  Created: {}", field_or_na(raw, "created_at"));
    println!("  Updated: {}", field_or_na(raw, "updated_at"));

    println!();
    print_stats(&report.stats);

    println!();
    println!(
        "Result: {}",
        if report.passed { "PASSED" } else { "FAILED" }
    );
    print_list("Errors", &report.errors);
    print_list("Warnings", &report.warnings);
    if report.errors.is_empty() && report.warnings.is_empty() {
        println!();
        println!("  No errors, no warnings");
    }
    println!();
    println!("{rule}");
}

pub fn print_stats(stats: &SkeletonStats) {
    println!("Statistics:");
    println!("  Divisions: {}", stats.total_divisions);
    println!("  Segments: {}", stats.total_segments);
    println!("  Blocks: {}", stats.total_blocks);
    println!("  Words: {}", group_thousands(stats.total_words));
    println!("  Completion: {}%", stats.completion_percentage);
    println!("    complete: {}", stats.complete_segments);
    println!("    in progress: {}", stats.in_progress_segments);
    println!("    pending: {}", stats.pending_segments);
    println!("  Hooks: {}", stats.total_hooks);
    println!(
        "  Tension sources: {} (unresolved: {})",
        stats.tension_sources, stats.unresolved_tensions
    );
    println!("  Resultant magnitude: {:.2}", stats.resultant_magnitude);
}

fn print_list(header: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{header} ({}):", items.len());
    for item in items {
        println!("  - {item}");
    }
}

fn field_or_na(raw: &Value, key: &str) -> String {
    match raw.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => "N/A".to_string(),
        Some(other) => other.to_string(),
    }
}
