//! Redirect and not-found log rows.
//!
//! Writing a row is a side effect that happens *after* the pure pipeline
//! decided; nothing here influences matching.

use chrono::Utc;

use matcher::helpers::ip::anonymize_ip;
use shared::{HttpRequest, IpLogging, Redirect, RerouteConfig, Result};
use storage::{NewNotFoundLog, NewRedirectLog, StorageAdapter};

/// Applies the configured IP capture mode.
pub fn capture_ip(client_ip: Option<&str>, mode: IpLogging) -> Option<String> {
    let ip = client_ip?;
    match mode {
        IpLogging::Full => Some(ip.to_string()),
        IpLogging::Anonymized => Some(anonymize_ip(ip)),
        IpLogging::None => None,
    }
}

fn serialize_headers(request: &HttpRequest, config: &RerouteConfig) -> Option<String> {
    if !config.log_request_headers || request.headers.is_empty() {
        return None;
    }
    serde_json::to_string(&request.headers).ok()
}

pub async fn log_redirect(
    storage: &dyn StorageAdapter,
    config: &RerouteConfig,
    request: &HttpRequest,
    redirect: &Redirect,
    target: &str,
    tenant_id: &str,
) -> Result<()> {
    if redirect.log_excluded {
        return Ok(());
    }

    storage
        .redirect_logs()
        .create(NewRedirectLog {
            tenant_id: tenant_id.to_string(),
            redirect_id: Some(redirect.id.clone()),
            created_at: Utc::now(),
            source_url: request.url.clone(),
            target_url: Some(target.to_string()),
            domain: Some(request.domain.clone()),
            ip: capture_ip(request.client_ip.as_deref(), config.ip_logging),
            http_code: redirect.action_code,
            user_agent: request.user_agent.clone(),
            referrer: request.referrer.clone(),
            request_method: Some(request.method.clone()),
            request_headers: serialize_headers(request, config),
            redirect_source: Some("redirection".to_string()),
        })
        .await?;
    Ok(())
}

pub async fn log_not_found(
    storage: &dyn StorageAdapter,
    config: &RerouteConfig,
    request: &HttpRequest,
    tenant_id: &str,
) -> Result<()> {
    storage
        .not_found_logs()
        .create(NewNotFoundLog {
            tenant_id: tenant_id.to_string(),
            created_at: Utc::now(),
            url: request.url.clone(),
            domain: Some(request.domain.clone()),
            ip: capture_ip(request.client_ip.as_deref(), config.ip_logging),
            user_agent: request.user_agent.clone(),
            referrer: request.referrer.clone(),
            request_method: Some(request.method.clone()),
            request_headers: serialize_headers(request, config),
        })
        .await?;
    Ok(())
}
