//! Tension field pass.

use crate::model::Skeleton;
use crate::report::{Findings, failure_class};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn segment_reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)segment[_\s]*([0-9]+)").expect("segment reference regex must compile")
    })
}

/// The first `segment <n>` style reference embedded in free text.
///
/// Returns the digits as written; `"Segment_007"` yields `"007"`.
pub fn extract_segment_reference(text: &str) -> Option<&str> {
    segment_reference_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Sum of intensities over sources not explicitly resolved.
pub fn unresolved_intensity(skeleton: &Skeleton) -> f64 {
    skeleton
        .tension_sources()
        .iter()
        .filter(|source| !source.is_resolved())
        .map(|source| source.intensity())
        .sum()
}

pub fn check(skeleton: &Skeleton, max_unresolved: f64, findings: &mut Findings) {
    let segment_ids: BTreeSet<&str> = skeleton.segments().filter_map(|s| s.known_id()).collect();

    for (idx, source) in skeleton.tension_sources().iter().enumerate() {
        if let Some(reference) = source.source_segment.as_deref()
            && !reference.is_empty()
            && !segment_ids.contains(reference)
        {
            findings.error(
                failure_class::DANGLING_TENSION_SOURCE,
                format!("tension_field.sources[{idx}].source_segment"),
                format!("Tension source references missing segment: {reference}"),
            );
        }
    }

    if let Some(direction) = skeleton
        .resultant()
        .and_then(|resultant| resultant.primary_direction.as_deref())
        && let Some(digits) = extract_segment_reference(direction)
        && !references_known_segment(digits, &segment_ids)
    {
        findings.warning(
            failure_class::UNRESOLVED_DIRECTION_REF,
            "tension_field.resultant.primary_direction",
            format!("Tension field primary_direction may reference a missing segment: {direction}"),
        );
    }

    let total = unresolved_intensity(skeleton);
    if total > max_unresolved {
        findings.warning(
            failure_class::TENSION_OVERLOAD,
            "tension_field.sources",
            format!(
                "Unresolved tension total too high ({total:.2}); consider decomposing the task"
            ),
        );
    }
}

/// Digits match either literally or as a normalized integer (`"03"` ~ `"3"`).
fn references_known_segment(digits: &str, segment_ids: &BTreeSet<&str>) -> bool {
    let trimmed = digits.trim_start_matches('0');
    let normalized = if trimmed.is_empty() { "0" } else { trimmed };
    segment_ids.contains(digits) || segment_ids.contains(normalized)
}
