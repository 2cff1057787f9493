//! Compile-or-None regex helpers.
//!
//! Rule patterns come from tenant configuration and may be malformed; a bad
//! pattern must never abort request processing. Every helper here treats a
//! failed compile as "never matches" and nothing in this module panics on
//! rule input.

use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};
use shared::UrlMatchResult;

/// Compiles `pattern`, returning `None` for malformed input. Callers must
/// treat `None` as a pattern that never matches.
pub fn safe_regex(pattern: &str, case_insensitive: bool) -> Option<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .ok()
}

/// Runs `pattern` against `subject`, collecting explicit capture groups.
///
/// The whole-match group is excluded; an unmatched optional group yields an
/// empty string, keeping group indices stable for target substitution.
pub fn regex_match(pattern: &str, subject: &str, case_insensitive: bool) -> UrlMatchResult {
    let Some(re) = safe_regex(pattern, case_insensitive) else {
        return UrlMatchResult::no_match();
    };

    match re.captures(subject) {
        Some(caps) => UrlMatchResult {
            matched: true,
            captured_groups: caps
                .iter()
                .skip(1)
                .map(|g| g.map_or_else(String::new, |m| m.as_str().to_string()))
                .collect(),
        },
        None => UrlMatchResult::no_match(),
    }
}

/// Case-insensitive boolean regex test used by condition evaluation.
pub fn regex_test(pattern: &str, subject: &str) -> bool {
    safe_regex(pattern, true).is_some_and(|re| re.is_match(subject))
}

static GROUP_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(\d+)").unwrap());

/// Replaces `$1`, `$2`, … in `template` with captured groups.
///
/// Indices past the captured groups substitute an empty string. Only
/// `$<digits>` sequences are special; any other `$` is left verbatim.
pub fn regex_substitute(template: &str, captured_groups: &[String]) -> String {
    GROUP_REF
        .replace_all(template, |caps: &Captures| {
            match caps[1].parse::<usize>() {
                Ok(idx) if idx >= 1 && idx <= captured_groups.len() => {
                    captured_groups[idx - 1].clone()
                }
                _ => String::new(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_regex() {
        assert!(safe_regex("^/foo$", false).is_some());
        assert!(safe_regex("[invalid", false).is_none());
    }

    #[test]
    fn test_regex_match_captures_groups() {
        let result = regex_match(r"^/posts/(\d+)$", "/posts/123", false);
        assert!(result.matched);
        assert_eq!(result.captured_groups, vec!["123"]);
    }

    #[test]
    fn test_regex_match_non_matching() {
        let result = regex_match(r"^/posts/(\d+)$", "/other/path", false);
        assert!(!result.matched);
        assert!(result.captured_groups.is_empty());
    }

    #[test]
    fn test_regex_match_case_insensitive_flag() {
        assert!(!regex_match("^/Foo$", "/foo", false).matched);
        assert!(regex_match("^/Foo$", "/foo", true).matched);
    }

    #[test]
    fn test_regex_match_invalid_pattern_is_no_match() {
        let result = regex_match("[bad", "/anything", false);
        assert!(!result.matched);
    }

    #[test]
    fn test_unmatched_optional_group_is_empty_string() {
        let result = regex_match(r"^/a(?:/(\d+))?$", "/a", false);
        assert!(result.matched);
        assert_eq!(result.captured_groups, vec![""]);
    }

    #[test]
    fn test_regex_test() {
        assert!(regex_test("chrome", "Mozilla/5.0 Chrome/91"));
        assert!(!regex_test("firefox", "Mozilla/5.0 Chrome/91"));
        assert!(!regex_test("[bad", "anything"));
    }

    #[test]
    fn test_substitute_replaces_groups() {
        let groups = vec!["foo".to_string(), "bar".to_string()];
        assert_eq!(regex_substitute("/new/$1/$2", &groups), "/new/foo/bar");
    }

    #[test]
    fn test_substitute_missing_group_is_empty() {
        let groups = vec!["foo".to_string()];
        assert_eq!(regex_substitute("/new/$1/$3", &groups), "/new/foo/");
    }

    #[test]
    fn test_substitute_leaves_plain_text_alone() {
        let groups = vec!["foo".to_string()];
        assert_eq!(regex_substitute("/static/path", &groups), "/static/path");
        // Non-numeric $ sequences are not placeholders
        assert_eq!(regex_substitute("/p?a=$b", &groups), "/p?a=$b");
    }
}
