use crate::model::{Division, Segment, Skeleton, TensionField};
use serde_json::Map;

/// One division, one complete 100-word segment, matching versions and
/// timestamps, empty tension field, no hooks.
pub(crate) fn minimal_skeleton() -> Skeleton {
    Skeleton {
        title: Some("Minimal".to_string()),
        schema_version: Some("1.0.0".to_string()),
        skeleton_version: Some("1.0.0".to_string()),
        parent_version: None,
        created_at: Some("2024-01-01T00:00:00Z".to_string()),
        updated_at: Some("2024-01-01T00:00:00Z".to_string()),
        divisions: Some(vec![Division {
            id: Some("d1".to_string()),
            title: None,
            segments: Some(vec![segment("s1", "complete", 100)]),
            division_hooks: Vec::new(),
        }]),
        tension_field: Some(TensionField::default()),
        metadata: Some(Map::new()),
        global_hooks: None,
        changelog: None,
    }
}

pub(crate) fn segment(id: &str, status: &str, word_count: u64) -> Segment {
    Segment {
        id: Some(id.to_string()),
        status: Some(status.to_string()),
        word_count,
        blocks: Some(Vec::new()),
        ..Segment::default()
    }
}
