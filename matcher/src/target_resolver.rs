//! Target selection, capture substitution and query composition.

use shared::{ConditionEvaluation, MatchType, QueryHandling, Redirect, UrlMatchResult};

use crate::helpers::regex::regex_substitute;
use crate::url_pattern::extract_query;

/// Applies the rule's query policy to a substituted target, against the
/// query of the **incoming** request URL (never the rule's declared source
/// query).
pub fn apply_query_handling(
    target_url: &str,
    request_url: &str,
    query_handling: QueryHandling,
) -> String {
    match query_handling {
        QueryHandling::Ignore => match target_url.find('?') {
            Some(idx) => target_url[..idx].to_string(),
            None => target_url.to_string(),
        },
        QueryHandling::Pass => {
            let Some(request_query) = extract_query(request_url).filter(|q| !q.is_empty()) else {
                return target_url.to_string();
            };
            let separator = if target_url.contains('?') { '&' } else { '?' };
            format!("{target_url}{separator}{request_query}")
        }
        // The target's own literal query, if any, is kept verbatim.
        QueryHandling::Exact | QueryHandling::ExactOrder => target_url.to_string(),
    }
}

/// Picks the raw destination before substitution.
///
/// Rules without an auxiliary condition always use `target_url`. Conditional
/// rules fall back to `alternate_target_url` when the condition was checked
/// and failed. `None` means this rule cannot resolve and must be skipped.
fn select_raw_target<'a>(
    redirect: &'a Redirect,
    condition: &ConditionEvaluation,
) -> Option<&'a str> {
    if redirect.match_type == MatchType::Url || condition.matched {
        return redirect.target_url.as_deref();
    }
    redirect.alternate_target_url.as_deref()
}

/// Produces the final target for a rule whose URL pattern matched, or
/// `None` when no applicable destination is configured.
pub fn resolve_target(
    redirect: &Redirect,
    request_url: &str,
    url_result: &UrlMatchResult,
    condition: &ConditionEvaluation,
) -> Option<String> {
    let raw_target = select_raw_target(redirect, condition)?;

    let substituted = if redirect.source_flags.is_regex {
        regex_substitute(raw_target, &url_result.captured_groups)
    } else {
        raw_target.to_string()
    };

    Some(apply_query_handling(
        &substituted,
        request_url,
        redirect.source_flags.query_handling,
    ))
}
