//! Version pass: version-string format, timestamp order, changelog coverage.

use crate::model::Skeleton;
use crate::report::{Findings, failure_class};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp.
///
/// Offsets are honored in extended (`+02:00`) and basic (`+0200`) form, with
/// or without seconds, and a trailing `Z` means UTC. Naive date-times and
/// bare dates are read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, String> {
    let normalized = match raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        Some(stem) => format!("{stem}+00:00"),
        None => raw.to_string(),
    };
    let rfc3339_err = match DateTime::parse_from_rfc3339(&normalized) {
        Ok(parsed) => return Ok(parsed),
        Err(err) => err,
    };
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(&normalized, format) {
            return Ok(parsed);
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
    }
    Err(format!("invalid isoformat string {raw:?}: {rfc3339_err}"))
}

pub fn check(skeleton: &Skeleton, version_re: &Regex, findings: &mut Findings) {
    let schema_version = skeleton.schema_version.as_deref().unwrap_or_default();
    let skeleton_version = skeleton.skeleton_version.as_deref().unwrap_or_default();

    for (field, value) in [
        ("schema_version", schema_version),
        ("skeleton_version", skeleton_version),
    ] {
        if !version_re.is_match(value) {
            findings.error(
                failure_class::MALFORMED_VERSION,
                field,
                format!("{field} has invalid format: {value}"),
            );
        }
    }

    check_timestamps(skeleton, findings);

    let changelog = skeleton.changelog();
    if !changelog.is_empty()
        && !changelog
            .iter()
            .any(|entry| entry.version.as_deref() == Some(skeleton_version))
    {
        findings.warning(
            failure_class::CHANGELOG_MISSING_VERSION,
            "changelog",
            format!("Current version {skeleton_version} is not recorded in changelog"),
        );
    }
}

fn check_timestamps(skeleton: &Skeleton, findings: &mut Findings) {
    let created = skeleton.created_at.as_deref().unwrap_or_default();
    let updated = skeleton.updated_at.as_deref().unwrap_or_default();
    if created.is_empty() || updated.is_empty() {
        return;
    }
    let parsed = parse_timestamp(created)
        .map_err(|err| ("created_at", err))
        .and_then(|c| {
            parse_timestamp(updated)
                .map(|u| (c, u))
                .map_err(|err| ("updated_at", err))
        });
    match parsed {
        Ok((created_at, updated_at)) if updated_at < created_at => findings.error(
            failure_class::TIMESTAMP_ORDER,
            "updated_at",
            "updated_at is earlier than created_at".to_string(),
        ),
        Ok(_) => {}
        Err((field, err)) => findings.warning(
            failure_class::UNPARSEABLE_TIMESTAMP,
            field,
            format!("Timestamp parse warning: {err}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_VERSION_PATTERN;
    use crate::fixtures::minimal_skeleton;
    use crate::model::ChangelogEntry;
    use crate::report::{Severity, ValidationIssue};

    fn run(skeleton: &Skeleton) -> Vec<ValidationIssue> {
        let re = Regex::new(DEFAULT_VERSION_PATTERN).unwrap();
        let mut findings = Findings::new();
        check(skeleton, &re, &mut findings);
        findings.into_issues()
    }

    fn entry(version: &str) -> ChangelogEntry {
        ChangelogEntry {
            version: Some(version.to_string()),
            ..ChangelogEntry::default()
        }
    }

    #[test]
    fn two_part_version_is_one_error() {
        let mut skeleton = minimal_skeleton();
        skeleton.skeleton_version = Some("1.0".to_string());
        let issues = run(&skeleton);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "skeleton_version");
        assert_eq!(issues[0].message, "skeleton_version has invalid format: 1.0");
    }

    #[test]
    fn version_pattern_is_anchored() {
        let mut skeleton = minimal_skeleton();
        skeleton.schema_version = Some("v1.0.0".to_string());
        skeleton.skeleton_version = Some("1.0.0-beta".to_string());
        let fields: Vec<String> = run(&skeleton).into_iter().map(|i| i.path).collect();
        assert_eq!(fields, vec!["schema_version", "skeleton_version"]);
    }

    #[test]
    fn inverted_timestamps_are_an_error() {
        let mut skeleton = minimal_skeleton();
        skeleton.created_at = Some("2024-03-01T12:00:00Z".to_string());
        skeleton.updated_at = Some("2024-03-01T11:59:59Z".to_string());
        let issues = run(&skeleton);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].message, "updated_at is earlier than created_at");
    }

    #[test]
    fn offsets_compare_as_instants() {
        let mut skeleton = minimal_skeleton();
        skeleton.created_at = Some("2024-03-01T12:00:00+02:00".to_string());
        skeleton.updated_at = Some("2024-03-01T10:30:00Z".to_string());
        assert!(run(&skeleton).is_empty());
    }

    #[test]
    fn naive_and_date_only_timestamps_parse() {
        assert!(parse_timestamp("2024-03-01").is_ok());
        assert!(parse_timestamp("2024-03-01T08:15:00").is_ok());
        assert!(parse_timestamp("2024-03-01 08:15:00.250").is_ok());
        assert!(parse_timestamp("March 1st").is_err());
    }

    #[test]
    fn unparseable_timestamp_is_only_a_warning() {
        let mut skeleton = minimal_skeleton();
        skeleton.updated_at = Some("yesterday".to_string());
        let issues = run(&skeleton);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(issues[0].message.contains("yesterday"));
        assert_eq!(issues[0].path, "updated_at");

        skeleton.created_at = Some("last week".to_string());
        assert_eq!(run(&skeleton)[0].path, "created_at");
    }

    #[test]
    fn minute_precision_offsets_are_ordered() {
        let mut skeleton = minimal_skeleton();
        skeleton.created_at = Some("2024-03-01T12:00Z".to_string());
        skeleton.updated_at = Some("2024-03-01T11:00Z".to_string());
        let issues = run(&skeleton);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].message, "updated_at is earlier than created_at");

        skeleton.created_at = Some("2024-03-01T12:00+02:00".to_string());
        skeleton.updated_at = Some("2024-03-01T10:30Z".to_string());
        assert!(run(&skeleton).is_empty());
    }

    #[test]
    fn basic_format_offsets_are_ordered() {
        let mut skeleton = minimal_skeleton();
        skeleton.created_at = Some("2024-03-01T12:00:00+0200".to_string());
        skeleton.updated_at = Some("2024-03-01T09:30:00+0000".to_string());
        let issues = run(&skeleton);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "updated_at is earlier than created_at");
    }

    #[test]
    fn offset_forms_parse_to_the_same_instant() {
        let expected = parse_timestamp("2024-03-01T10:00:00Z").unwrap();
        for raw in [
            "2024-03-01T12:00+02:00",
            "2024-03-01T12:00:00+0200",
            "2024-03-01 12:00:00.000+02:00",
            "2024-03-01T10:00z",
        ] {
            assert_eq!(parse_timestamp(raw), Ok(expected), "{raw}");
        }
    }

    #[test]
    fn changelog_must_record_current_version() {
        let mut skeleton = minimal_skeleton();
        skeleton.changelog = Some(vec![entry("0.9.0")]);
        let issues = run(&skeleton);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "Current version 1.0.0 is not recorded in changelog"
        );

        skeleton.changelog = Some(vec![entry("0.9.0"), entry("1.0.0")]);
        assert!(run(&skeleton).is_empty());

        skeleton.changelog = Some(Vec::new());
        assert!(run(&skeleton).is_empty());
    }
}
