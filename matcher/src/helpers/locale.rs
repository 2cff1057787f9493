//! Accept-Language parsing and locale matching.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq)]
struct LanguageTag {
    tag: String,
    quality: f64,
}

static Q_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^q=(\d+(?:\.\d+)?)$").unwrap());

/// Parses an RFC-2616-style `tag;q=weight` list. Default weight is 1,
/// entries with weight ≤ 0 are dropped, and the result is sorted by weight
/// descending (stable, so header order breaks ties).
fn parse_accept_language(header: Option<&str>) -> Vec<LanguageTag> {
    let Some(header) = header else {
        return Vec::new();
    };

    let mut tags: Vec<LanguageTag> = header
        .split(',')
        .map(|part| {
            let mut pieces = part.trim().split(';');
            let tag = pieces.next().unwrap_or("").trim().to_lowercase();

            let mut quality = 1.0;
            for param in pieces {
                if let Some(caps) = Q_PARAM.captures(param.trim())
                    && let Ok(q) = caps[1].parse::<f64>()
                {
                    quality = q;
                }
            }

            LanguageTag { tag, quality }
        })
        .filter(|l| l.quality > 0.0)
        .collect();

    tags.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
    tags
}

/// True when any accepted tag equals `target_locale` case-insensitively, or
/// either side is a dash-delimited prefix of the other ("en" matches
/// "en-US" and vice versa).
pub fn locale_matches(accept_language: Option<&str>, target_locale: &str) -> bool {
    let target = target_locale.to_lowercase();

    parse_accept_language(accept_language).iter().any(|l| {
        l.tag == target
            || l.tag.starts_with(&format!("{target}-"))
            || target.starts_with(&format!("{}-", l.tag))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(locale_matches(Some("en-US,en;q=0.9"), "en-us"));
    }

    #[test]
    fn test_prefix_match_both_directions() {
        // target "en" accepts tag "en-us"
        assert!(locale_matches(Some("en-US"), "en"));
        // tag "en" accepts target "en-us"
        assert!(locale_matches(Some("en"), "en-US"));
        // unrelated language does not
        assert!(!locale_matches(Some("de-DE,de;q=0.8"), "en"));
    }

    #[test]
    fn test_zero_quality_is_dropped() {
        assert!(!locale_matches(Some("fr;q=0"), "fr"));
        assert!(locale_matches(Some("fr;q=0.1"), "fr"));
    }

    #[test]
    fn test_absent_header_never_matches() {
        assert!(!locale_matches(None, "en"));
    }

    #[test]
    fn test_parse_sorts_by_quality_descending() {
        let tags = parse_accept_language(Some("de;q=0.5,en;q=0.9,fr"));
        let order: Vec<&str> = tags.iter().map(|l| l.tag.as_str()).collect();
        assert_eq!(order, vec!["fr", "en", "de"]);
    }

    #[test]
    fn test_malformed_quality_defaults_to_one() {
        let tags = parse_accept_language(Some("en;q=abc"));
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].quality, 1.0);
    }
}
