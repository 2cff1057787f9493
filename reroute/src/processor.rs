//! Request orchestration: tenant resolution, matching, side effects.

use rand::Rng;

use matcher::{execute_action, find_redirect};
use shared::{HttpRequest, ProcessResult, RedirectStatus, Result, RerouteConfig, TenantStatus};
use storage::StorageAdapter;

use crate::hit_tracker::track_hit;
use crate::logger::{log_not_found, log_redirect};
use crate::metrics_defs::REQUESTS_PROCESSED;

/// Processes one request end to end.
///
/// Resolution order: hostname → enabled host → active tenant → sorted
/// candidates → first fully resolved match. Every early-out is a `Pass`
/// decision, never an error; side effects (hit count, log rows) run only
/// after a match, and a not-found row is written only when the upstream
/// already answered 404.
pub async fn process_request<R: Rng>(
    storage: &dyn StorageAdapter,
    config: &RerouteConfig,
    request: &HttpRequest,
    rng: &mut R,
) -> Result<ProcessResult> {
    let Some(host) = storage
        .tenant_hosts()
        .find_by_hostname(&request.domain)
        .await?
    else {
        tracing::debug!(domain = %request.domain, "unknown hostname, passing through");
        return Ok(ProcessResult::pass());
    };
    if host.status != RedirectStatus::Enabled {
        return Ok(ProcessResult::pass());
    }

    let Some(tenant) = storage.tenants().find_by_id(&host.tenant_id).await? else {
        return Ok(ProcessResult::pass());
    };
    if tenant.status != TenantStatus::Active {
        tracing::debug!(tenant_id = %tenant.id, "tenant suspended, passing through");
        return Ok(ProcessResult::pass());
    }

    let candidates = storage
        .redirects()
        .find_active_by_tenant_id(&tenant.id)
        .await?;

    let Some(found) = find_redirect(&candidates, request) else {
        if request.response_code == Some(404) {
            log_not_found(storage, config, request, &tenant.id).await?;
        }
        REQUESTS_PROCESSED.increment_tagged(("outcome", "pass"), 1);
        return Ok(ProcessResult::pass());
    };

    let action = execute_action(found.redirect, &found.target, request, rng);

    track_hit(storage, config, found.redirect).await?;
    log_redirect(storage, config, request, found.redirect, &found.target, &tenant.id).await?;

    REQUESTS_PROCESSED.increment_tagged(("outcome", "matched"), 1);
    Ok(ProcessResult {
        action,
        redirect_id: Some(found.redirect.id.clone()),
        tenant_id: Some(tenant.id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use shared::{ActionResult, ActionType, Group, MatchType, SourceFlags, Tenant};
    use storage::{LogQuery, MemoryStorage, NewGroup, NewRedirect, NewTenantHost};

    fn make_request(url: &str) -> HttpRequest {
        HttpRequest {
            client_ip: Some("1.2.3.4".to_string()),
            ..HttpRequest::get(url, "example.com")
        }
    }

    fn new_redirect(group_id: &str, source_url: &str, target_url: &str) -> NewRedirect {
        NewRedirect {
            group_id: group_id.to_string(),
            position: 0,
            title: None,
            status: RedirectStatus::Enabled,
            source_url: source_url.to_string(),
            source_flags: SourceFlags::default(),
            match_type: MatchType::Url,
            match_value: None,
            match_is_regex: false,
            target_url: Some(target_url.to_string()),
            alternate_target_url: None,
            action_type: ActionType::Redirect,
            action_code: 301,
            random_targets: Vec::new(),
            hit_count: 0,
            last_hit_at: None,
            log_excluded: false,
        }
    }

    async fn seed_tenant(storage: &MemoryStorage) -> (Tenant, Group) {
        let tenant = storage
            .tenants()
            .create("Test".to_string(), TenantStatus::Active)
            .await
            .unwrap();
        storage
            .tenant_hosts()
            .create(NewTenantHost {
                tenant_id: tenant.id.clone(),
                hostname: "example.com".to_string(),
                environment: None,
                status: RedirectStatus::Enabled,
            })
            .await
            .unwrap();
        let group = storage
            .groups()
            .create(NewGroup {
                tenant_id: tenant.id.clone(),
                name: "Default".to_string(),
                status: RedirectStatus::Enabled,
                position: 0,
            })
            .await
            .unwrap();
        (tenant, group)
    }

    async fn process(storage: &MemoryStorage, config: &RerouteConfig, request: &HttpRequest) -> ProcessResult {
        let mut rng = StdRng::seed_from_u64(0);
        process_request(storage, config, request, &mut rng)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_pass_for_unknown_hostname() {
        let storage = MemoryStorage::new();
        let config = RerouteConfig::default();
        let result = process(&storage, &config, &make_request("/old")).await;
        assert_eq!(result, ProcessResult::pass());
    }

    #[tokio::test]
    async fn test_pass_for_disabled_host() {
        let storage = MemoryStorage::new();
        let config = RerouteConfig::default();
        let tenant = storage
            .tenants()
            .create("T".to_string(), TenantStatus::Active)
            .await
            .unwrap();
        storage
            .tenant_hosts()
            .create(NewTenantHost {
                tenant_id: tenant.id,
                hostname: "example.com".to_string(),
                environment: None,
                status: RedirectStatus::Disabled,
            })
            .await
            .unwrap();

        let result = process(&storage, &config, &make_request("/old")).await;
        assert_eq!(result.action, ActionResult::Pass);
    }

    #[tokio::test]
    async fn test_pass_for_suspended_tenant() {
        let storage = MemoryStorage::new();
        let config = RerouteConfig::default();
        let tenant = storage
            .tenants()
            .create("T".to_string(), TenantStatus::Suspended)
            .await
            .unwrap();
        storage
            .tenant_hosts()
            .create(NewTenantHost {
                tenant_id: tenant.id,
                hostname: "example.com".to_string(),
                environment: None,
                status: RedirectStatus::Enabled,
            })
            .await
            .unwrap();

        let result = process(&storage, &config, &make_request("/old")).await;
        assert_eq!(result.action, ActionResult::Pass);
    }

    #[tokio::test]
    async fn test_redirect_when_match_found() {
        let storage = MemoryStorage::new();
        let config = RerouteConfig::default();
        let (tenant, group) = seed_tenant(&storage).await;
        storage
            .redirects()
            .create(new_redirect(&group.id, "/old", "/new"))
            .await
            .unwrap();

        let result = process(&storage, &config, &make_request("/old")).await;
        assert_eq!(
            result.action,
            ActionResult::Redirect {
                url: "/new".to_string(),
                code: 301
            }
        );
        assert!(result.redirect_id.is_some());
        assert_eq!(result.tenant_id, Some(tenant.id));
    }

    #[tokio::test]
    async fn test_hit_tracking_respects_config() {
        let storage = MemoryStorage::new();
        let (_, group) = seed_tenant(&storage).await;
        let redirect = storage
            .redirects()
            .create(new_redirect(&group.id, "/old", "/new"))
            .await
            .unwrap();

        let config = RerouteConfig::default();
        process(&storage, &config, &make_request("/old")).await;
        let stored = storage
            .redirects()
            .find_by_id(&redirect.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.hit_count, 1);
        assert!(stored.last_hit_at.is_some());

        let config = RerouteConfig {
            track_hits: false,
            ..RerouteConfig::default()
        };
        process(&storage, &config, &make_request("/old")).await;
        let stored = storage
            .redirects()
            .find_by_id(&redirect.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.hit_count, 1);
    }

    #[tokio::test]
    async fn test_redirect_log_entry_created() {
        let storage = MemoryStorage::new();
        let config = RerouteConfig::default();
        let (tenant, group) = seed_tenant(&storage).await;
        storage
            .redirects()
            .create(new_redirect(&group.id, "/old", "/new"))
            .await
            .unwrap();

        process(&storage, &config, &make_request("/old")).await;

        let logs = storage
            .redirect_logs()
            .query(&LogQuery::for_tenant(&tenant.id))
            .await
            .unwrap();
        assert_eq!(logs.total, 1);
        assert_eq!(logs.items[0].source_url, "/old");
        assert_eq!(logs.items[0].target_url.as_deref(), Some("/new"));
        assert_eq!(logs.items[0].ip.as_deref(), Some("1.2.3.4"));
    }

    #[tokio::test]
    async fn test_log_excluded_rule_writes_no_log() {
        let storage = MemoryStorage::new();
        let config = RerouteConfig::default();
        let (tenant, group) = seed_tenant(&storage).await;
        let mut redirect = new_redirect(&group.id, "/old", "/new");
        redirect.log_excluded = true;
        storage.redirects().create(redirect).await.unwrap();

        process(&storage, &config, &make_request("/old")).await;

        let logs = storage
            .redirect_logs()
            .query(&LogQuery::for_tenant(&tenant.id))
            .await
            .unwrap();
        assert_eq!(logs.total, 0);
    }

    #[tokio::test]
    async fn test_not_found_logged_only_for_404() {
        let storage = MemoryStorage::new();
        let config = RerouteConfig::default();
        let (tenant, _) = seed_tenant(&storage).await;

        let mut request = make_request("/missing");
        request.response_code = Some(404);
        process(&storage, &config, &request).await;

        let mut request = make_request("/missing");
        request.response_code = Some(200);
        process(&storage, &config, &request).await;

        let logs = storage
            .not_found_logs()
            .query(&LogQuery::for_tenant(&tenant.id))
            .await
            .unwrap();
        assert_eq!(logs.total, 1);
        assert_eq!(logs.items[0].url, "/missing");
    }

    #[tokio::test]
    async fn test_ip_anonymized_when_configured() {
        let storage = MemoryStorage::new();
        let config = RerouteConfig {
            ip_logging: shared::IpLogging::Anonymized,
            ..RerouteConfig::default()
        };
        let (tenant, group) = seed_tenant(&storage).await;
        storage
            .redirects()
            .create(new_redirect(&group.id, "/old", "/new"))
            .await
            .unwrap();

        let mut request = make_request("/old");
        request.client_ip = Some("192.168.1.123".to_string());
        process(&storage, &config, &request).await;

        let logs = storage
            .redirect_logs()
            .query(&LogQuery::for_tenant(&tenant.id))
            .await
            .unwrap();
        assert_eq!(logs.items[0].ip.as_deref(), Some("192.168.1.0"));
    }

    #[tokio::test]
    async fn test_error_action() {
        let storage = MemoryStorage::new();
        let config = RerouteConfig::default();
        let (_, group) = seed_tenant(&storage).await;
        let mut redirect = new_redirect(&group.id, "/old", "/new");
        redirect.action_type = ActionType::Error;
        redirect.action_code = 410;
        storage.redirects().create(redirect).await.unwrap();

        let result = process(&storage, &config, &make_request("/old")).await;
        assert_eq!(result.action, ActionResult::Error { code: 410 });
    }

    #[tokio::test]
    async fn test_conditional_ip_rule_takes_alternate_target() {
        let storage = MemoryStorage::new();
        let config = RerouteConfig::default();
        let (_, group) = seed_tenant(&storage).await;
        let mut redirect = new_redirect(&group.id, "/old", "/matched");
        redirect.match_type = MatchType::Ip;
        redirect.match_value = Some("9.9.9.9".to_string());
        redirect.alternate_target_url = Some("/not-matched".to_string());
        redirect.action_code = 302;
        storage.redirects().create(redirect).await.unwrap();

        let result = process(&storage, &config, &make_request("/old")).await;
        assert_eq!(
            result.action,
            ActionResult::Redirect {
                url: "/not-matched".to_string(),
                code: 302
            }
        );
    }

    #[tokio::test]
    async fn test_regex_rule_end_to_end() {
        let storage = MemoryStorage::new();
        let config = RerouteConfig::default();
        let (_, group) = seed_tenant(&storage).await;
        let mut redirect = new_redirect(&group.id, r"^/blog/(\d{4})/(\d{2})/(.+)$", "");
        redirect.source_flags.is_regex = true;
        redirect.target_url = Some("/posts/$3?year=$1&month=$2".to_string());
        storage.redirects().create(redirect).await.unwrap();

        let result = process(&storage, &config, &make_request("/blog/2024/06/hello-world")).await;
        assert_eq!(
            result.action,
            ActionResult::Redirect {
                url: "/posts/hello-world?year=2024&month=06".to_string(),
                code: 301
            }
        );
    }

    #[tokio::test]
    async fn test_pass_query_handling_end_to_end() {
        let storage = MemoryStorage::new();
        let config = RerouteConfig::default();
        let (_, group) = seed_tenant(&storage).await;
        let mut redirect = new_redirect(&group.id, "/old", "/new");
        redirect.source_flags.query_handling = shared::QueryHandling::Pass;
        storage.redirects().create(redirect).await.unwrap();

        let result = process(&storage, &config, &make_request("/old?ref=abc&utm=test")).await;
        assert_eq!(
            result.action,
            ActionResult::Redirect {
                url: "/new?ref=abc&utm=test".to_string(),
                code: 301
            }
        );
    }
}
