use shared::{
    ActionType, MatchType, Redirect, RedirectStatus, Result, RerouteError, SourceFlags,
};
use storage::{NewRedirect, StorageAdapter};

/// Fields a caller supplies when creating a rule; position and status are
/// assigned here.
#[derive(Clone, Debug)]
pub struct CreateRedirectInput {
    pub group_id: String,
    pub source_url: String,
    pub source_flags: SourceFlags,
    pub match_type: MatchType,
    pub action_type: ActionType,
    pub action_code: u16,
    pub target_url: Option<String>,
    pub alternate_target_url: Option<String>,
    pub title: Option<String>,
    pub match_value: Option<String>,
    pub match_is_regex: bool,
    pub random_targets: Vec<String>,
    pub log_excluded: bool,
}

/// Field-wise update; `None` keeps the stored value.
#[derive(Clone, Debug, Default)]
pub struct UpdateRedirectInput {
    pub source_url: Option<String>,
    pub source_flags: Option<SourceFlags>,
    pub match_type: Option<MatchType>,
    pub match_value: Option<String>,
    pub match_is_regex: Option<bool>,
    pub target_url: Option<String>,
    pub alternate_target_url: Option<String>,
    pub action_type: Option<ActionType>,
    pub action_code: Option<u16>,
    pub group_id: Option<String>,
    pub title: Option<String>,
    pub random_targets: Option<Vec<String>>,
    pub log_excluded: Option<bool>,
}

pub async fn create_redirect(
    storage: &dyn StorageAdapter,
    input: CreateRedirectInput,
) -> Result<Redirect> {
    let position = storage.redirects().count_by_group_id(&input.group_id).await?;
    storage
        .redirects()
        .create(NewRedirect {
            group_id: input.group_id,
            position,
            title: input.title,
            status: RedirectStatus::Enabled,
            source_url: input.source_url,
            source_flags: input.source_flags,
            match_type: input.match_type,
            match_value: input.match_value,
            match_is_regex: input.match_is_regex,
            target_url: input.target_url,
            alternate_target_url: input.alternate_target_url,
            action_type: input.action_type,
            action_code: input.action_code,
            random_targets: input.random_targets,
            hit_count: 0,
            last_hit_at: None,
            log_excluded: input.log_excluded,
        })
        .await
}

pub async fn update_redirect(
    storage: &dyn StorageAdapter,
    redirect_id: &str,
    input: UpdateRedirectInput,
) -> Result<Redirect> {
    let existing = storage
        .redirects()
        .find_by_id(redirect_id)
        .await?
        .ok_or_else(|| RerouteError::not_found("Redirect", redirect_id))?;

    let updated = Redirect {
        id: existing.id,
        position: existing.position,
        status: existing.status,
        hit_count: existing.hit_count,
        last_hit_at: existing.last_hit_at,
        source_url: input.source_url.unwrap_or(existing.source_url),
        source_flags: input.source_flags.unwrap_or(existing.source_flags),
        match_type: input.match_type.unwrap_or(existing.match_type),
        match_value: input.match_value.or(existing.match_value),
        match_is_regex: input.match_is_regex.unwrap_or(existing.match_is_regex),
        target_url: input.target_url.or(existing.target_url),
        alternate_target_url: input.alternate_target_url.or(existing.alternate_target_url),
        action_type: input.action_type.unwrap_or(existing.action_type),
        action_code: input.action_code.unwrap_or(existing.action_code),
        group_id: input.group_id.unwrap_or(existing.group_id),
        title: input.title.or(existing.title),
        random_targets: input.random_targets.unwrap_or(existing.random_targets),
        log_excluded: input.log_excluded.unwrap_or(existing.log_excluded),
    };

    storage.redirects().save(updated).await
}

pub async fn enable_redirect(storage: &dyn StorageAdapter, redirect_id: &str) -> Result<Redirect> {
    set_status(storage, redirect_id, RedirectStatus::Enabled).await
}

pub async fn disable_redirect(storage: &dyn StorageAdapter, redirect_id: &str) -> Result<Redirect> {
    set_status(storage, redirect_id, RedirectStatus::Disabled).await
}

async fn set_status(
    storage: &dyn StorageAdapter,
    redirect_id: &str,
    status: RedirectStatus,
) -> Result<Redirect> {
    let mut redirect = storage
        .redirects()
        .find_by_id(redirect_id)
        .await?
        .ok_or_else(|| RerouteError::not_found("Redirect", redirect_id))?;

    if redirect.status == status {
        let wanted = match status {
            RedirectStatus::Enabled => "Redirect must be disabled to enable",
            RedirectStatus::Disabled => "Redirect must be enabled to disable",
        };
        return Err(RerouteError::precondition(wanted));
    }

    redirect.status = status;
    storage.redirects().save(redirect).await
}

pub async fn delete_redirect(storage: &dyn StorageAdapter, redirect_id: &str) -> Result<()> {
    storage.redirects().delete(redirect_id).await
}

pub async fn reset_redirect_hits(storage: &dyn StorageAdapter, redirect_id: &str) -> Result<()> {
    storage
        .redirects()
        .find_by_id(redirect_id)
        .await?
        .ok_or_else(|| RerouteError::not_found("Redirect", redirect_id))?;
    storage.redirects().reset_hit_count(redirect_id).await
}
