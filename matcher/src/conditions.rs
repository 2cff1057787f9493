//! Auxiliary-condition evaluation.
//!
//! Runs after the URL pattern has matched and is independent of it. Each
//! `MatchType` variant selects one strategy; the dispatch is exhaustive, so
//! a new variant cannot be added without deciding its evaluation here.

use shared::{ConditionEvaluation, HttpRequest, MatchType, Redirect};

use crate::helpers::header_spec::parse_header_spec;
use crate::helpers::ip::{ip_in_list, parse_ip_list};
use crate::helpers::locale::locale_matches;
use crate::helpers::regex::regex_test;

fn contains_insensitive(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn evaluate_ip(redirect: &Redirect, request: &HttpRequest) -> bool {
    let list = parse_ip_list(redirect.match_value.as_deref());
    match request.client_ip.as_deref() {
        Some(ip) => ip_in_list(ip, &list),
        None => false,
    }
}

/// Shared by `user_agent` and `referrer`: case-insensitive substring
/// containment, or a case-insensitive regex test in regex mode.
fn evaluate_text_field(redirect: &Redirect, field: Option<&str>) -> bool {
    let subject = field.unwrap_or("");
    let pattern = redirect.match_value.as_deref().unwrap_or("");

    if redirect.match_is_regex {
        regex_test(pattern, subject)
    } else {
        contains_insensitive(subject, pattern)
    }
}

fn evaluate_header(redirect: &Redirect, request: &HttpRequest) -> bool {
    let spec = parse_header_spec(redirect.match_value.as_deref());
    // Lowercased name first, then the exact spelling.
    let actual = request
        .headers
        .get(&spec.name.to_lowercase())
        .or_else(|| request.headers.get(&spec.name));

    if redirect.match_is_regex {
        regex_test(&spec.value, actual.map_or("", String::as_str))
    } else {
        actual.is_some_and(|v| *v == spec.value)
    }
}

fn evaluate_cookie(redirect: &Redirect, request: &HttpRequest) -> bool {
    let spec = parse_header_spec(redirect.match_value.as_deref());
    let actual = request.cookies.get(&spec.name);

    if redirect.match_is_regex {
        regex_test(&spec.value, actual.map_or("", String::as_str))
    } else {
        actual.is_some_and(|v| *v == spec.value)
    }
}

fn evaluate_role(redirect: &Redirect, request: &HttpRequest) -> bool {
    request.is_authenticated && request.user_role == redirect.match_value
}

// Equality only; server variables have no regex mode even when
// `match_is_regex` is set.
fn evaluate_server_variable(redirect: &Redirect, request: &HttpRequest) -> bool {
    let spec = parse_header_spec(redirect.match_value.as_deref());
    request
        .server_variables
        .get(&spec.name)
        .is_some_and(|v| *v == spec.value)
}

fn evaluate_language(redirect: &Redirect, request: &HttpRequest) -> bool {
    locale_matches(
        request.accept_language.as_deref(),
        redirect.match_value.as_deref().unwrap_or(""),
    )
}

/// Evaluates `redirect`'s auxiliary condition against the request.
///
/// `Url` rules have no condition and report `checked: false`; everything
/// else reports `checked: true` plus the strategy's verdict.
pub fn evaluate_condition(redirect: &Redirect, request: &HttpRequest) -> ConditionEvaluation {
    match redirect.match_type {
        MatchType::Url => ConditionEvaluation::UNCHECKED,
        MatchType::Ip => ConditionEvaluation::checked(evaluate_ip(redirect, request)),
        MatchType::UserAgent => {
            ConditionEvaluation::checked(evaluate_text_field(redirect, request.user_agent.as_deref()))
        }
        MatchType::Referrer => {
            ConditionEvaluation::checked(evaluate_text_field(redirect, request.referrer.as_deref()))
        }
        MatchType::LoginStatus => ConditionEvaluation::checked(request.is_authenticated),
        MatchType::Header => ConditionEvaluation::checked(evaluate_header(redirect, request)),
        MatchType::Cookie => ConditionEvaluation::checked(evaluate_cookie(redirect, request)),
        MatchType::Role => ConditionEvaluation::checked(evaluate_role(redirect, request)),
        MatchType::ServerVariable => {
            ConditionEvaluation::checked(evaluate_server_variable(redirect, request))
        }
        MatchType::Language => ConditionEvaluation::checked(evaluate_language(redirect, request)),
    }
}
