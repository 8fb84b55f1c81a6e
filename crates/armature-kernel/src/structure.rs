//! Structural pass: required fields, segment-id uniqueness, block types.

use crate::model::{REQUIRED_ROOT_FIELDS, Segment, Skeleton};
use crate::report::{Findings, failure_class};
use std::collections::BTreeSet;

pub fn check(skeleton: &Skeleton, block_type_exempt: &str, findings: &mut Findings) {
    for field in REQUIRED_ROOT_FIELDS {
        if !skeleton.has_root_field(field) {
            findings.error(
                failure_class::MISSING_FIELD,
                *field,
                format!("missing required field: {field}"),
            );
        }
    }

    let Some(divisions) = skeleton.divisions.as_deref() else {
        return;
    };

    let mut seen_ids: BTreeSet<&str> = BTreeSet::new();
    let mut reported_ids: BTreeSet<&str> = BTreeSet::new();
    for (div_idx, division) in divisions.iter().enumerate() {
        let path = format!("divisions[{div_idx}]");
        if division.id.is_none() {
            findings.error(
                failure_class::MISSING_FIELD,
                format!("{path}.id"),
                format!("division [{div_idx}] is missing id"),
            );
        }
        let Some(segments) = division.segments.as_deref() else {
            findings.error(
                failure_class::MISSING_FIELD,
                format!("{path}.segments"),
                format!("division [{div_idx}] is missing segments"),
            );
            continue;
        };

        for (seg_idx, segment) in segments.iter().enumerate() {
            let seg_path = format!("{path}.segments[{seg_idx}]");
            if let Some(id) = segment.known_id()
                && !seen_ids.insert(id)
                && reported_ids.insert(id)
            {
                findings.error(
                    failure_class::DUPLICATE_SEGMENT_ID,
                    format!("{seg_path}.id"),
                    format!("Segment ID {id} duplicated"),
                );
            }
            check_block_types(segment, &seg_path, block_type_exempt, findings);
        }
    }
}

fn check_block_types(segment: &Segment, path: &str, exempt: &str, findings: &mut Findings) {
    let Some(blocks) = segment.blocks.as_deref() else {
        return;
    };
    let mut seen = BTreeSet::new();
    // Untyped blocks share one tag, so two of them count as a repeat.
    let duplicated = blocks
        .iter()
        .map(|block| block.kind.as_deref())
        .filter(|kind| *kind != Some(exempt))
        .any(|kind| !seen.insert(kind));
    if duplicated {
        findings.warning(
            failure_class::DUPLICATE_BLOCK_TYPE,
            format!("{path}.blocks"),
            format!(
                "Segment {} has duplicate block types",
                segment.id.as_deref().unwrap_or("<unnamed>")
            ),
        );
    }
}
