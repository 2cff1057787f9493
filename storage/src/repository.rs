//! Repository contracts.
//!
//! Creation payloads are the entity minus its id; the repository assigns
//! ids. Status updates that touch many rows at once
//! (`update_many_status`) exist so group cascades stay a single storage
//! call.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use shared::{
    ActionType, Candidate, Group, MatchType, NotFoundLog, Redirect, RedirectLog, RedirectStatus,
    Result, SourceFlags, Tenant, TenantHost, TenantStatus,
};

use crate::query::{LogGroupQuery, LogGroupResult, LogQuery, PaginatedResult};

/// A tenant host waiting for an id.
#[derive(Clone, Debug)]
pub struct NewTenantHost {
    pub tenant_id: String,
    pub hostname: String,
    pub environment: Option<String>,
    pub status: RedirectStatus,
}

/// A group waiting for an id.
#[derive(Clone, Debug)]
pub struct NewGroup {
    pub tenant_id: String,
    pub name: String,
    pub status: RedirectStatus,
    pub position: u32,
}

/// A redirect waiting for an id.
#[derive(Clone, Debug)]
pub struct NewRedirect {
    pub group_id: String,
    pub position: u32,
    pub title: Option<String>,
    pub status: RedirectStatus,
    pub source_url: String,
    pub source_flags: SourceFlags,
    pub match_type: MatchType,
    pub match_value: Option<String>,
    pub match_is_regex: bool,
    pub target_url: Option<String>,
    pub alternate_target_url: Option<String>,
    pub action_type: ActionType,
    pub action_code: u16,
    pub random_targets: Vec<String>,
    pub hit_count: u64,
    pub last_hit_at: Option<DateTime<Utc>>,
    pub log_excluded: bool,
}

impl NewRedirect {
    pub(crate) fn into_redirect(self, id: String) -> Redirect {
        Redirect {
            id,
            group_id: self.group_id,
            position: self.position,
            title: self.title,
            status: self.status,
            source_url: self.source_url,
            source_flags: self.source_flags,
            match_type: self.match_type,
            match_value: self.match_value,
            match_is_regex: self.match_is_regex,
            target_url: self.target_url,
            alternate_target_url: self.alternate_target_url,
            action_type: self.action_type,
            action_code: self.action_code,
            random_targets: self.random_targets,
            hit_count: self.hit_count,
            last_hit_at: self.last_hit_at,
            log_excluded: self.log_excluded,
        }
    }
}

/// A redirect log row waiting for an id.
#[derive(Clone, Debug)]
pub struct NewRedirectLog {
    pub tenant_id: String,
    pub redirect_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub source_url: String,
    pub target_url: Option<String>,
    pub domain: Option<String>,
    pub ip: Option<String>,
    pub http_code: u16,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub request_method: Option<String>,
    pub request_headers: Option<String>,
    pub redirect_source: Option<String>,
}

/// A not-found log row waiting for an id.
#[derive(Clone, Debug)]
pub struct NewNotFoundLog {
    pub tenant_id: String,
    pub created_at: DateTime<Utc>,
    pub url: String,
    pub domain: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub request_method: Option<String>,
    pub request_headers: Option<String>,
}

/// Result of one expiration batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpiredBatch {
    pub deleted: u64,
    pub has_more: bool,
}

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>>;
    async fn find_all(&self) -> Result<Vec<Tenant>>;
    async fn create(&self, name: String, status: TenantStatus) -> Result<Tenant>;
    /// Persists a modified tenant; fails with `NotFound` for unknown ids.
    async fn save(&self, tenant: Tenant) -> Result<Tenant>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait TenantHostRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<TenantHost>>;
    async fn find_by_hostname(&self, hostname: &str) -> Result<Option<TenantHost>>;
    async fn find_by_tenant_id(&self, tenant_id: &str) -> Result<Vec<TenantHost>>;
    async fn create(&self, host: NewTenantHost) -> Result<TenantHost>;
    async fn save(&self, host: TenantHost) -> Result<TenantHost>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Group>>;
    /// Groups of a tenant, position-sorted.
    async fn find_by_tenant_id(&self, tenant_id: &str) -> Result<Vec<Group>>;
    async fn create(&self, group: NewGroup) -> Result<Group>;
    async fn save(&self, group: Group) -> Result<Group>;
    async fn delete(&self, id: &str) -> Result<()>;
    async fn count_by_tenant_id(&self, tenant_id: &str) -> Result<u32>;
}

#[async_trait]
pub trait RedirectRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Redirect>>;
    /// Redirects of a group, position-sorted.
    async fn find_by_group_id(&self, group_id: &str) -> Result<Vec<Redirect>>;
    /// The pipeline's candidate list: enabled redirects in enabled groups
    /// of the tenant, sorted by (group position asc, redirect position asc).
    async fn find_active_by_tenant_id(&self, tenant_id: &str) -> Result<Vec<Candidate>>;
    async fn create(&self, redirect: NewRedirect) -> Result<Redirect>;
    async fn create_many(&self, redirects: Vec<NewRedirect>) -> Result<Vec<Redirect>>;
    async fn save(&self, redirect: Redirect) -> Result<Redirect>;
    async fn update_many_status(&self, ids: &[String], status: RedirectStatus) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
    async fn delete_many(&self, ids: &[String]) -> Result<()>;
    async fn delete_by_group_id(&self, group_id: &str) -> Result<()>;
    async fn increment_hit_count(&self, id: &str, last_hit_at: DateTime<Utc>) -> Result<()>;
    async fn reset_hit_count(&self, id: &str) -> Result<()>;
    async fn count_by_group_id(&self, group_id: &str) -> Result<u32>;
}

#[async_trait]
pub trait RedirectLogRepository: Send + Sync {
    async fn create(&self, log: NewRedirectLog) -> Result<RedirectLog>;
    async fn query(&self, query: &LogQuery) -> Result<PaginatedResult<RedirectLog>>;
    async fn group_by(&self, query: &LogGroupQuery) -> Result<PaginatedResult<LogGroupResult>>;
    async fn delete_many(&self, ids: &[String]) -> Result<()>;
    async fn delete_by_tenant_id(&self, tenant_id: &str) -> Result<()>;
    async fn delete_expired_batch(
        &self,
        cutoff: DateTime<Utc>,
        batch_size: u64,
    ) -> Result<ExpiredBatch>;
    async fn count_expired(&self, cutoff: DateTime<Utc>) -> Result<u64>;
}

#[async_trait]
pub trait NotFoundLogRepository: Send + Sync {
    async fn create(&self, log: NewNotFoundLog) -> Result<NotFoundLog>;
    async fn query(&self, query: &LogQuery) -> Result<PaginatedResult<NotFoundLog>>;
    async fn group_by(&self, query: &LogGroupQuery) -> Result<PaginatedResult<LogGroupResult>>;
    async fn delete_many(&self, ids: &[String]) -> Result<()>;
    async fn delete_by_tenant_id(&self, tenant_id: &str) -> Result<()>;
    async fn delete_expired_batch(
        &self,
        cutoff: DateTime<Utc>,
        batch_size: u64,
    ) -> Result<ExpiredBatch>;
    async fn count_expired(&self, cutoff: DateTime<Utc>) -> Result<u64>;
}

/// Aggregates the per-entity repositories a host must supply.
pub trait StorageAdapter: Send + Sync {
    fn tenants(&self) -> &dyn TenantRepository;
    fn tenant_hosts(&self) -> &dyn TenantHostRepository;
    fn groups(&self) -> &dyn GroupRepository;
    fn redirects(&self) -> &dyn RedirectRepository;
    fn redirect_logs(&self) -> &dyn RedirectLogRepository;
    fn not_found_logs(&self) -> &dyn NotFoundLogRepository;
}
