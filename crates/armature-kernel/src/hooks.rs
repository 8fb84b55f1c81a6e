//! Hook consistency pass.
//!
//! Hooks are visited division by division: the division's own hooks, then
//! for each segment its segment hooks, entry hook and exit hook. Global hooks
//! come last. Every finding here is a warning.

use crate::model::{Hook, Skeleton};
use crate::report::{Findings, failure_class};
use std::collections::BTreeSet;

/// A hook together with the document path it was found at.
pub struct HookSite<'a> {
    pub path: String,
    pub hook: &'a Hook,
}

/// Every reachable hook in traversal order.
pub fn collect(skeleton: &Skeleton) -> Vec<HookSite<'_>> {
    let mut sites = Vec::new();
    for (div_idx, division) in skeleton.divisions().iter().enumerate() {
        let div_path = format!("divisions[{div_idx}]");
        for (idx, hook) in division.division_hooks.iter().enumerate() {
            sites.push(HookSite {
                path: format!("{div_path}.division_hooks[{idx}]"),
                hook,
            });
        }
        for (seg_idx, segment) in division.segments().iter().enumerate() {
            let seg_path = format!("{div_path}.segments[{seg_idx}]");
            for (idx, hook) in segment.segment_hooks.iter().enumerate() {
                sites.push(HookSite {
                    path: format!("{seg_path}.segment_hooks[{idx}]"),
                    hook,
                });
            }
            if let Some(hook) = segment.entry_hook() {
                sites.push(HookSite {
                    path: format!("{seg_path}.entry_hook"),
                    hook,
                });
            }
            if let Some(hook) = segment.exit_hook() {
                sites.push(HookSite {
                    path: format!("{seg_path}.exit_hook"),
                    hook,
                });
            }
        }
    }
    for (idx, hook) in skeleton.global_hooks().iter().enumerate() {
        sites.push(HookSite {
            path: format!("global_hooks[{idx}]"),
            hook,
        });
    }
    sites
}

pub fn check(skeleton: &Skeleton, min_confidence: f64, findings: &mut Findings) {
    let mut seen_ids: BTreeSet<&str> = BTreeSet::new();
    for HookSite { path, hook } in collect(skeleton) {
        if let Some(id) = hook.hook_id.as_deref()
            && !seen_ids.insert(id)
        {
            findings.warning(
                failure_class::DUPLICATE_HOOK_ID,
                format!("{path}.hook_id"),
                format!("Hook ID {id} reused (possibly an intentional cross-segment reference)"),
            );
        }

        if hook.has_structural() && !(hook.has_semantic() || hook.has_tonal()) {
            findings.warning(
                failure_class::INCOMPLETE_HOOK,
                path.clone(),
                format!(
                    "Hook {} has only a structural anchor, missing semantic and tonal",
                    hook.label()
                ),
            );
        }

        let confidence = hook.confidence();
        if confidence < min_confidence {
            findings.warning(
                failure_class::LOW_HOOK_CONFIDENCE,
                format!("{path}.confidence"),
                format!("Hook {} confidence too low ({confidence})", hook.label()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{minimal_skeleton, segment};
    use crate::model::Division;
    use serde_json::json;

    fn hook(id: &str) -> Hook {
        Hook {
            hook_id: Some(id.to_string()),
            semantic: Some(json!("recurring motif")),
            ..Hook::default()
        }
    }

    fn run(skeleton: &Skeleton) -> Vec<String> {
        let mut findings = Findings::new();
        check(skeleton, 0.5, &mut findings);
        findings
            .into_issues()
            .into_iter()
            .map(|issue| issue.message)
            .collect()
    }

    fn hooked_skeleton() -> Skeleton {
        let mut first = segment("s1", "complete", 100);
        first.segment_hooks = vec![hook("h-seg")];
        first.entry_hook = Some(hook("h-entry"));
        first.exit_hook = Some(hook("h-exit"));
        let mut skeleton = minimal_skeleton();
        skeleton.divisions = Some(vec![Division {
            id: Some("d1".to_string()),
            segments: Some(vec![first]),
            division_hooks: vec![hook("h-div")],
            ..Division::default()
        }]);
        skeleton.global_hooks = Some(vec![hook("h-global")]);
        skeleton
    }

    #[test]
    fn collects_in_traversal_order() {
        let skeleton = hooked_skeleton();
        let ids: Vec<&str> = collect(&skeleton)
            .iter()
            .map(|site| site.hook.label())
            .collect();
        assert_eq!(ids, vec!["h-div", "h-seg", "h-entry", "h-exit", "h-global"]);
        assert!(run(&skeleton).is_empty());
    }

    #[test]
    fn reused_hook_id_is_a_warning_per_repeat() {
        let mut skeleton = hooked_skeleton();
        skeleton.global_hooks = Some(vec![hook("h-div"), hook("h-div")]);
        let messages = run(&skeleton);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("Hook ID h-div reused"));
    }

    #[test]
    fn structural_only_hook_is_incomplete() {
        let mut skeleton = minimal_skeleton();
        skeleton.global_hooks = Some(vec![
            Hook {
                hook_id: Some("h-bare".to_string()),
                structural: Some(json!("chapter break")),
                ..Hook::default()
            },
            Hook {
                hook_id: Some("h-toned".to_string()),
                structural: Some(json!("chapter break")),
                tonal: Some(json!("somber")),
                ..Hook::default()
            },
        ]);
        assert_eq!(
            run(&skeleton),
            vec!["Hook h-bare has only a structural anchor, missing semantic and tonal"]
        );
    }

    #[test]
    fn low_confidence_names_the_value() {
        let mut skeleton = minimal_skeleton();
        skeleton.global_hooks = Some(vec![
            Hook {
                confidence: Some(0.3),
                ..hook("h-weak")
            },
            Hook {
                confidence: Some(0.5),
                ..hook("h-edge")
            },
        ]);
        assert_eq!(run(&skeleton), vec!["Hook h-weak confidence too low (0.3)"]);
    }
}
