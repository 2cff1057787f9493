//! First-match candidate selection.

use shared::{Candidate, HttpRequest, Redirect};

use crate::conditions::evaluate_condition;
use crate::metrics_defs::{PIPELINE_MATCHED, PIPELINE_NO_MATCH};
use crate::target_resolver::resolve_target;
use crate::url_pattern::evaluate_url_pattern;

/// The winning rule together with its fully resolved target.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineMatch<'a> {
    pub redirect: &'a Redirect,
    pub target: String,
}

/// Scans `candidates` in order and returns the first rule whose URL pattern
/// matches **and** whose target resolves.
///
/// Callers must supply the list sorted by (`group_position` asc,
/// `position` asc); that ordering is the priority contract and is only
/// asserted in debug builds, never validated at runtime.
///
/// A candidate whose pattern matches but whose target resolves to nothing
/// (e.g. a conditional rule with no alternate configured) is skipped and
/// the scan continues.
pub fn find_redirect<'a>(
    candidates: &'a [Candidate],
    request: &HttpRequest,
) -> Option<PipelineMatch<'a>> {
    debug_assert!(
        candidates.windows(2).all(|w| {
            (w[0].group_position, w[0].redirect.position)
                <= (w[1].group_position, w[1].redirect.position)
        }),
        "candidate list must be sorted by (group_position, position)"
    );

    for candidate in candidates {
        let redirect = &candidate.redirect;

        let url_result = evaluate_url_pattern(redirect, &request.url);
        if !url_result.matched {
            continue;
        }

        let condition = evaluate_condition(redirect, request);
        let Some(target) = resolve_target(redirect, &request.url, &url_result, &condition) else {
            tracing::debug!(
                redirect_id = %redirect.id,
                "pattern matched but no target resolved, skipping"
            );
            continue;
        };

        tracing::debug!(redirect_id = %redirect.id, target = %target, "matched redirect");
        PIPELINE_MATCHED.increment(1);
        return Some(PipelineMatch { redirect, target });
    }

    PIPELINE_NO_MATCH.increment(1);
    None
}
