//! Source-pattern matching against the request URL.
//!
//! Two strategies, selected by `source_flags.is_regex`:
//!
//! - **Regex** rules run against the entire raw URL, path and query
//!   together. This lets pattern authors capture query fragments, and it
//!   means `query_handling` does not gate regex *matching* (it still shapes
//!   the resolved target). Deliberate asymmetry, do not "fix".
//! - **Literal** rules split path and query at the first `?`, normalize the
//!   paths, and only consult the query once the paths are byte-equal.

use shared::{QueryHandling, Redirect, UrlMatchResult};

use crate::helpers::regex::regex_match;

/// Everything before the first `?`.
pub fn extract_path(url: &str) -> &str {
    match url.find('?') {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Everything after the first `?`, or `None` when there is no `?` at all.
/// A trailing bare `?` yields `Some("")`.
pub fn extract_query(url: &str) -> Option<&str> {
    url.find('?').map(|idx| &url[idx + 1..])
}

/// Lowercases iff `case_insensitive`; strips exactly one trailing `/` iff
/// `ignore_trailing_slash`, never reducing the lone root `/` to an empty
/// path.
pub fn normalize_path(path: &str, case_insensitive: bool, ignore_trailing_slash: bool) -> String {
    let mut normalized = if case_insensitive {
        path.to_lowercase()
    } else {
        path.to_string()
    };

    if ignore_trailing_slash && normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}

fn sorted_params<'a>(query: &'a str) -> Vec<&'a str> {
    let mut params: Vec<&str> = query.split('&').collect();
    params.sort_unstable();
    params
}

fn query_matches(
    source_query: Option<&str>,
    request_query: Option<&str>,
    query_handling: QueryHandling,
) -> bool {
    match query_handling {
        QueryHandling::Ignore | QueryHandling::Pass => true,
        QueryHandling::Exact => {
            // An empty query and an absent query are equivalent here.
            let source = source_query.unwrap_or("");
            let request = request_query.unwrap_or("");
            if source.is_empty() && request.is_empty() {
                return true;
            }
            if source.is_empty() || request.is_empty() {
                return false;
            }
            // Order-insensitive, duplicate-sensitive token comparison.
            sorted_params(source) == sorted_params(request)
        }
        QueryHandling::ExactOrder => source_query.unwrap_or("") == request_query.unwrap_or(""),
    }
}

/// Decides whether `redirect`'s source pattern matches `request_url`,
/// extracting capture groups for regex rules. Literal rules never populate
/// captured groups.
pub fn evaluate_url_pattern(redirect: &Redirect, request_url: &str) -> UrlMatchResult {
    if redirect.source_flags.is_regex {
        return regex_match(
            &redirect.source_url,
            request_url,
            redirect.source_flags.case_insensitive,
        );
    }

    let flags = &redirect.source_flags;
    let norm_source = normalize_path(
        extract_path(&redirect.source_url),
        flags.case_insensitive,
        flags.ignore_trailing_slash,
    );
    let norm_request = normalize_path(
        extract_path(request_url),
        flags.case_insensitive,
        flags.ignore_trailing_slash,
    );

    if norm_source != norm_request {
        return UrlMatchResult::no_match();
    }

    let source_query = extract_query(&redirect.source_url);
    let request_query = extract_query(request_url);

    if !query_matches(source_query, request_query, flags.query_handling) {
        return UrlMatchResult::no_match();
    }

    UrlMatchResult {
        matched: true,
        captured_groups: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ActionType, MatchType, RedirectStatus, SourceFlags};

    fn make_redirect(source_url: &str, flags: SourceFlags) -> Redirect {
        Redirect {
            id: "1".to_string(),
            group_id: "g1".to_string(),
            position: 0,
            title: None,
            status: RedirectStatus::Enabled,
            source_url: source_url.to_string(),
            source_flags: flags,
            match_type: MatchType::Url,
            match_value: None,
            match_is_regex: false,
            target_url: Some("/new".to_string()),
            alternate_target_url: None,
            action_type: ActionType::Redirect,
            action_code: 301,
            random_targets: Vec::new(),
            hit_count: 0,
            last_hit_at: None,
            log_excluded: false,
        }
    }

    fn flags() -> SourceFlags {
        SourceFlags::default()
    }

    #[test]
    fn test_extract_path_and_query() {
        assert_eq!(extract_path("/foo?bar=1"), "/foo");
        assert_eq!(extract_path("/foo"), "/foo");
        assert_eq!(extract_query("/foo?bar=1"), Some("bar=1"));
        assert_eq!(extract_query("/foo"), None);
        assert_eq!(extract_query("/foo?"), Some(""));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/Foo", true, false), "/foo");
        assert_eq!(normalize_path("/foo/", false, true), "/foo");
        // the lone root slash survives
        assert_eq!(normalize_path("/", false, true), "/");
        // only one trailing slash is stripped
        assert_eq!(normalize_path("/foo//", false, true), "/foo/");
    }

    #[test]
    fn test_matches_exact_path() {
        let r = make_redirect("/old", flags());
        assert!(evaluate_url_pattern(&r, "/old").matched);
        assert!(!evaluate_url_pattern(&r, "/new").matched);
    }

    #[test]
    fn test_case_sensitivity_follows_flag() {
        let r = make_redirect("/Old", flags());
        assert!(!evaluate_url_pattern(&r, "/old").matched);

        let r = make_redirect(
            "/Old",
            SourceFlags {
                case_insensitive: true,
                ..flags()
            },
        );
        assert!(evaluate_url_pattern(&r, "/old").matched);
    }

    #[test]
    fn test_ignore_trailing_slash() {
        let r = make_redirect(
            "/old/",
            SourceFlags {
                ignore_trailing_slash: true,
                ..flags()
            },
        );
        assert!(evaluate_url_pattern(&r, "/old").matched);
    }

    #[test]
    fn test_query_ignored_when_handling_is_ignore() {
        let r = make_redirect(
            "/old",
            SourceFlags {
                query_handling: QueryHandling::Ignore,
                ..flags()
            },
        );
        assert!(evaluate_url_pattern(&r, "/old?foo=bar").matched);
    }

    #[test]
    fn test_exact_query_is_order_insensitive() {
        let r = make_redirect("/old?b=2&a=1", flags());
        assert!(evaluate_url_pattern(&r, "/old?a=1&b=2").matched);
        assert!(!evaluate_url_pattern(&r, "/old?a=1&c=3").matched);
    }

    #[test]
    fn test_exact_query_absent_vs_present() {
        let r = make_redirect("/old?a=1", flags());
        assert!(!evaluate_url_pattern(&r, "/old").matched);

        // empty and absent queries are equivalent
        let r = make_redirect("/old?", flags());
        assert!(evaluate_url_pattern(&r, "/old").matched);
    }

    #[test]
    fn test_exact_order_requires_same_order() {
        let r = make_redirect(
            "/old?a=1&b=2",
            SourceFlags {
                query_handling: QueryHandling::ExactOrder,
                ..flags()
            },
        );
        assert!(evaluate_url_pattern(&r, "/old?a=1&b=2").matched);
        assert!(!evaluate_url_pattern(&r, "/old?b=2&a=1").matched);
    }

    #[test]
    fn test_path_mismatch_short_circuits_before_query() {
        let r = make_redirect("/old?a=1", flags());
        let result = evaluate_url_pattern(&r, "/other?a=1");
        assert!(!result.matched);
    }

    #[test]
    fn test_regex_matches_with_captures() {
        let r = make_redirect(
            r"^/posts/(\d+)$",
            SourceFlags {
                is_regex: true,
                ..flags()
            },
        );
        let result = evaluate_url_pattern(&r, "/posts/42");
        assert!(result.matched);
        assert_eq!(result.captured_groups, vec!["42"]);
    }

    #[test]
    fn test_regex_sees_the_query_string() {
        // Regex rules run against path+query as one string.
        let r = make_redirect(
            r"^/old\?id=(\d+)$",
            SourceFlags {
                is_regex: true,
                ..flags()
            },
        );
        let result = evaluate_url_pattern(&r, "/old?id=7");
        assert!(result.matched);
        assert_eq!(result.captured_groups, vec!["7"]);
    }

    #[test]
    fn test_literal_match_never_captures() {
        let r = make_redirect("/old", flags());
        let result = evaluate_url_pattern(&r, "/old");
        assert!(result.matched);
        assert!(result.captured_groups.is_empty());
    }
}
