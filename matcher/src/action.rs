//! Maps a resolved target and rule action type to an outbound decision.

use rand::Rng;
use shared::{ActionResult, ActionType, HttpRequest, Redirect};

/// Executes a rule's action against its resolved target.
///
/// Pure and deterministic except for `Random`, whose selection comes from
/// the injected `rng` so tests can seed it. `Random` over an empty target
/// list degrades to `Nothing`.
pub fn execute_action<R: Rng>(
    redirect: &Redirect,
    target: &str,
    request: &HttpRequest,
    rng: &mut R,
) -> ActionResult {
    match redirect.action_type {
        ActionType::Redirect => ActionResult::Redirect {
            url: target.to_string(),
            code: redirect.action_code,
        },

        ActionType::Error => ActionResult::Error {
            code: redirect.action_code,
        },

        ActionType::Rewrite => ActionResult::Rewrite {
            original_url: request.url.clone(),
            target_url: target.to_string(),
        },

        ActionType::Random => {
            if redirect.random_targets.is_empty() {
                return ActionResult::Nothing;
            }
            let idx = rng.gen_range(0..redirect.random_targets.len());
            ActionResult::RandomRedirect {
                url: redirect.random_targets[idx].clone(),
                code: redirect.action_code,
            }
        }

        ActionType::Nothing => ActionResult::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use shared::{MatchType, RedirectStatus, SourceFlags};
    use std::collections::HashSet;

    fn make_redirect(action_type: ActionType) -> Redirect {
        Redirect {
            id: "1".to_string(),
            group_id: "g1".to_string(),
            position: 0,
            title: None,
            status: RedirectStatus::Enabled,
            source_url: "/old".to_string(),
            source_flags: SourceFlags::default(),
            match_type: MatchType::Url,
            match_value: None,
            match_is_regex: false,
            target_url: Some("/new".to_string()),
            alternate_target_url: None,
            action_type,
            action_code: 301,
            random_targets: Vec::new(),
            hit_count: 0,
            last_hit_at: None,
            log_excluded: false,
        }
    }

    fn request() -> HttpRequest {
        HttpRequest::get("/old", "example.com")
    }

    #[test]
    fn test_redirect_action() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = execute_action(&make_redirect(ActionType::Redirect), "/new", &request(), &mut rng);
        assert_eq!(
            result,
            ActionResult::Redirect {
                url: "/new".to_string(),
                code: 301
            }
        );
    }

    #[test]
    fn test_error_action_ignores_target() {
        let mut redirect = make_redirect(ActionType::Error);
        redirect.action_code = 410;
        let mut rng = StdRng::seed_from_u64(0);
        let result = execute_action(&redirect, "/ignored", &request(), &mut rng);
        assert_eq!(result, ActionResult::Error { code: 410 });
    }

    #[test]
    fn test_rewrite_action_keeps_original_url() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = execute_action(&make_redirect(ActionType::Rewrite), "/new", &request(), &mut rng);
        assert_eq!(
            result,
            ActionResult::Rewrite {
                original_url: "/old".to_string(),
                target_url: "/new".to_string()
            }
        );
    }

    #[test]
    fn test_nothing_action() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = execute_action(&make_redirect(ActionType::Nothing), "/new", &request(), &mut rng);
        assert_eq!(result, ActionResult::Nothing);
    }

    #[test]
    fn test_random_with_empty_targets_degrades_to_nothing() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = execute_action(&make_redirect(ActionType::Random), "/new", &request(), &mut rng);
        assert_eq!(result, ActionResult::Nothing);
    }

    #[test]
    fn test_random_picks_from_targets() {
        let mut redirect = make_redirect(ActionType::Random);
        redirect.random_targets = vec!["/a".to_string(), "/b".to_string(), "/c".to_string()];
        redirect.action_code = 302;

        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            match execute_action(&redirect, "/new", &request(), &mut rng) {
                ActionResult::RandomRedirect { url, code } => {
                    assert_eq!(code, 302);
                    assert!(redirect.random_targets.contains(&url));
                    seen.insert(url);
                }
                other => panic!("expected random redirect, got {other:?}"),
            }
        }
        // every target is reachable
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_random_is_deterministic_under_a_seed() {
        let mut redirect = make_redirect(ActionType::Random);
        redirect.random_targets = vec!["/a".to_string(), "/b".to_string()];

        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(
                execute_action(&redirect, "/new", &request(), &mut rng1),
                execute_action(&redirect, "/new", &request(), &mut rng2)
            );
        }
    }
}
