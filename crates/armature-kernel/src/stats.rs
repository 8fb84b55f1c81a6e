//! Statistics pass. Runs on every document and never produces findings.

use crate::hooks;
use crate::model::{SegmentStatus, Skeleton};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SkeletonStats {
    pub total_divisions: usize,
    pub total_segments: usize,
    pub total_blocks: usize,
    pub total_words: u64,
    pub complete_segments: usize,
    pub in_progress_segments: usize,
    pub pending_segments: usize,
    pub completion_percentage: f64,
    pub total_hooks: usize,
    pub tension_sources: usize,
    pub unresolved_tensions: usize,
    pub resultant_magnitude: f64,
}

pub fn compute(skeleton: &Skeleton) -> SkeletonStats {
    let mut stats = SkeletonStats {
        total_divisions: skeleton.divisions().len(),
        total_hooks: hooks::collect(skeleton).len(),
        tension_sources: skeleton.tension_sources().len(),
        unresolved_tensions: skeleton
            .tension_sources()
            .iter()
            .filter(|source| !source.is_resolved())
            .count(),
        resultant_magnitude: skeleton
            .resultant()
            .and_then(|resultant| resultant.magnitude)
            .unwrap_or(0.0),
        ..SkeletonStats::default()
    };

    for segment in skeleton.segments() {
        stats.total_segments += 1;
        stats.total_blocks += segment.blocks().len();
        stats.total_words += segment.word_count;
        match segment.status() {
            SegmentStatus::Complete => stats.complete_segments += 1,
            SegmentStatus::InProgress => stats.in_progress_segments += 1,
            SegmentStatus::Pending => stats.pending_segments += 1,
        }
    }

    stats.completion_percentage =
        completion_percentage(stats.complete_segments, stats.total_segments);
    stats
}

/// `complete / total * 100`, rounded to two decimals; 0 when there is nothing to complete.
fn completion_percentage(complete: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let ratio = complete as f64 / total as f64 * 100.0;
    (ratio * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{minimal_skeleton, segment};
    use crate::model::{Block, Division, Hook, Resultant, TensionField, TensionSource};

    fn hook(id: &str) -> Hook {
        Hook {
            hook_id: Some(id.to_string()),
            ..Hook::default()
        }
    }

    #[test]
    fn minimal_skeleton_is_fully_complete() {
        let stats = compute(&minimal_skeleton());
        assert_eq!(stats.total_divisions, 1);
        assert_eq!(stats.total_segments, 1);
        assert_eq!(stats.total_words, 100);
        assert_eq!(stats.completion_percentage, 100.0);
        assert_eq!(stats.total_hooks, 0);
    }

    #[test]
    fn empty_document_has_zero_completion() {
        let stats = compute(&Skeleton::default());
        assert_eq!(stats, SkeletonStats::default());
    }

    #[test]
    fn counts_every_level() {
        let mut first = segment("s1", "complete", 1200);
        first.blocks = Some(vec![Block::default(), Block::default()]);
        first.segment_hooks = vec![hook("h1"), hook("h2")];
        first.entry_hook = Some(hook("h3"));
        let mut second = segment("s2", "in_progress", 300);
        second.exit_hook = Some(hook("h4"));
        second.entry_hook = Some(Hook::default());
        let third = segment("s3", "outlined", 0);

        let mut skeleton = minimal_skeleton();
        skeleton.divisions = Some(vec![
            Division {
                id: Some("d1".to_string()),
                segments: Some(vec![first, second]),
                division_hooks: vec![hook("h5")],
                ..Division::default()
            },
            Division {
                id: Some("d2".to_string()),
                segments: Some(vec![third]),
                ..Division::default()
            },
        ]);
        skeleton.global_hooks = Some(vec![hook("h6")]);
        skeleton.tension_field = Some(TensionField {
            sources: vec![
                TensionSource {
                    source_segment: Some("s1".to_string()),
                    intensity: Some(0.4),
                    resolved: Some(true),
                },
                TensionSource::default(),
            ],
            resultant: Some(Resultant {
                primary_direction: None,
                magnitude: Some(0.75),
            }),
        });

        let stats = compute(&skeleton);
        assert_eq!(stats.total_divisions, 2);
        assert_eq!(stats.total_segments, 3);
        assert_eq!(stats.total_blocks, 2);
        assert_eq!(stats.total_words, 1500);
        assert_eq!(stats.complete_segments, 1);
        assert_eq!(stats.in_progress_segments, 1);
        assert_eq!(stats.pending_segments, 1);
        assert_eq!(stats.completion_percentage, 33.33);
        assert_eq!(stats.total_hooks, 6);
        assert_eq!(stats.tension_sources, 2);
        assert_eq!(stats.unresolved_tensions, 1);
        assert_eq!(stats.resultant_magnitude, 0.75);
    }

    #[test]
    fn stats_serialize_with_stable_keys() {
        let rendered = serde_json::to_string_pretty(&compute(&minimal_skeleton())).unwrap();
        insta::assert_snapshot!(rendered, @r###"
        {
          "total_divisions": 1,
          "total_segments": 1,
          "total_blocks": 0,
          "total_words": 100,
          "complete_segments": 1,
          "in_progress_segments": 0,
          "pending_segments": 0,
          "completion_percentage": 100.0,
          "total_hooks": 0,
          "tension_sources": 0,
          "unresolved_tensions": 0,
          "resultant_magnitude": 0.0
        }
        "###);
    }
}
