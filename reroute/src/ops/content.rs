//! Content-change monitor.
//!
//! When a CMS moves a piece of content, the old URL should keep working.
//! For monitored content types this creates a permanent literal redirect
//! from the previous URL to the current one.

use shared::{
    ActionType, ContentItem, MatchType, Redirect, RedirectStatus, Result, RerouteConfig,
    SourceFlags,
};
use storage::{NewRedirect, StorageAdapter};

/// Returns the created redirect, or `None` when nothing needed to happen:
/// no previous URL, URL unchanged, or an unmonitored content type.
pub async fn handle_content_url_change(
    storage: &dyn StorageAdapter,
    config: &RerouteConfig,
    tenant_id: &str,
    target_group_id: &str,
    item: &ContentItem,
) -> Result<Option<Redirect>> {
    let Some(previous_url) = item.previous_url.as_deref() else {
        return Ok(None);
    };
    if previous_url == item.current_url {
        return Ok(None);
    }
    if !config.monitor_content_types.contains(&item.content_type) {
        return Ok(None);
    }

    tracing::debug!(
        tenant_id = %tenant_id,
        content_type = %item.content_type,
        previous_url = %previous_url,
        current_url = %item.current_url,
        "content moved, creating redirect"
    );

    let position = storage
        .redirects()
        .count_by_group_id(target_group_id)
        .await?;
    let redirect = storage
        .redirects()
        .create(NewRedirect {
            group_id: target_group_id.to_string(),
            position,
            title: None,
            status: RedirectStatus::Enabled,
            source_url: previous_url.to_string(),
            source_flags: SourceFlags::default(),
            match_type: MatchType::Url,
            match_value: None,
            match_is_regex: false,
            target_url: Some(item.current_url.clone()),
            alternate_target_url: None,
            action_type: ActionType::Redirect,
            action_code: 301,
            random_targets: Vec::new(),
            hit_count: 0,
            last_hit_at: None,
            log_excluded: false,
        })
        .await?;

    Ok(Some(redirect))
}
