//! Multi-tenant URL-redirection decision engine.
//!
//! Embedded as a library inside a host web server or edge function: the
//! host owns the HTTP transport and hands each request to
//! [`Reroute::process_request`], which answers with an
//! [`shared::ActionResult`] value (redirect, error, rewrite, random
//! redirect, nothing, or pass). The host then acts on that decision.
//!
//! # Example
//!
//! ```no_run
//! use reroute::{Reroute, RerouteConfig};
//! use shared::HttpRequest;
//! use storage::MemoryStorage;
//!
//! # async fn demo() -> shared::Result<()> {
//! let engine = Reroute::new(MemoryStorage::new(), RerouteConfig::default());
//!
//! let tenant = engine.create_tenant("acme").await?;
//! engine.add_host(&tenant.id, "www.acme.com", None).await?;
//!
//! let request = HttpRequest::get("/old-path", "www.acme.com");
//! let decision = engine.process_request(&request).await?;
//! # let _ = decision;
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod hit_tracker;
pub mod import;
pub mod logger;
pub mod metrics_defs;
pub mod ops;
pub mod processor;

use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;

use shared::{
    ContentItem, Group, HttpRequest, ProcessResult, Redirect, RedirectStatus, Result, Tenant,
    TenantHost,
};
use storage::{
    LogGroupQuery, LogGroupResult, LogQuery, PaginatedResult, StorageAdapter,
};

pub use export::{
    ExportFormat, export_not_found_logs_csv, export_redirect_logs_csv, export_redirects,
};
pub use import::{ImportFormat, ImportResult};
pub use ops::expiration::ExpirationResult;
pub use ops::redirects::{CreateRedirectInput, UpdateRedirectInput};
pub use shared::{ActionResult, RerouteConfig};

/// The embeddable engine facade: one storage adapter plus one config,
/// exposing request processing and every lifecycle operation.
pub struct Reroute<S> {
    storage: S,
    config: RerouteConfig,
}

impl<S: StorageAdapter> Reroute<S> {
    pub fn new(storage: S, config: RerouteConfig) -> Self {
        Reroute { storage, config }
    }

    pub fn config(&self) -> &RerouteConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // --- Request processing ---

    pub async fn process_request(&self, request: &HttpRequest) -> Result<ProcessResult> {
        let mut rng = StdRng::from_entropy();
        self.process_request_with_rng(request, &mut rng).await
    }

    /// Deterministic variant for tests: the `random` action draws from the
    /// supplied generator.
    pub async fn process_request_with_rng<R: Rng>(
        &self,
        request: &HttpRequest,
        rng: &mut R,
    ) -> Result<ProcessResult> {
        processor::process_request(&self.storage, &self.config, request, rng).await
    }

    // --- Tenant lifecycle ---

    pub async fn create_tenant(&self, name: impl Into<String>) -> Result<Tenant> {
        ops::tenants::create_tenant(&self.storage, name.into()).await
    }

    pub async fn suspend_tenant(&self, tenant_id: &str) -> Result<Tenant> {
        ops::tenants::suspend_tenant(&self.storage, tenant_id).await
    }

    pub async fn activate_tenant(&self, tenant_id: &str) -> Result<Tenant> {
        ops::tenants::activate_tenant(&self.storage, tenant_id).await
    }

    // --- Host management ---

    pub async fn add_host(
        &self,
        tenant_id: &str,
        hostname: impl Into<String>,
        environment: Option<String>,
    ) -> Result<TenantHost> {
        ops::hosts::add_host(&self.storage, tenant_id, hostname.into(), environment).await
    }

    pub async fn remove_host(&self, host_id: &str) -> Result<()> {
        ops::hosts::remove_host(&self.storage, host_id).await
    }

    pub async fn enable_host(&self, host_id: &str) -> Result<TenantHost> {
        ops::hosts::enable_host(&self.storage, host_id).await
    }

    pub async fn disable_host(&self, host_id: &str) -> Result<TenantHost> {
        ops::hosts::disable_host(&self.storage, host_id).await
    }

    // --- Group management ---

    pub async fn create_group(&self, tenant_id: &str, name: impl Into<String>) -> Result<Group> {
        ops::groups::create_group(&self.storage, tenant_id, name.into()).await
    }

    pub async fn enable_group(&self, group_id: &str) -> Result<Group> {
        ops::groups::enable_group(&self.storage, group_id).await
    }

    pub async fn disable_group(&self, group_id: &str) -> Result<Group> {
        ops::groups::disable_group(&self.storage, group_id).await
    }

    pub async fn delete_group(&self, group_id: &str) -> Result<()> {
        ops::groups::delete_group(&self.storage, group_id).await
    }

    // --- Redirect management ---

    pub async fn create_redirect(&self, input: CreateRedirectInput) -> Result<Redirect> {
        ops::redirects::create_redirect(&self.storage, input).await
    }

    pub async fn update_redirect(
        &self,
        redirect_id: &str,
        input: UpdateRedirectInput,
    ) -> Result<Redirect> {
        ops::redirects::update_redirect(&self.storage, redirect_id, input).await
    }

    pub async fn enable_redirect(&self, redirect_id: &str) -> Result<Redirect> {
        ops::redirects::enable_redirect(&self.storage, redirect_id).await
    }

    pub async fn disable_redirect(&self, redirect_id: &str) -> Result<Redirect> {
        ops::redirects::disable_redirect(&self.storage, redirect_id).await
    }

    pub async fn delete_redirect(&self, redirect_id: &str) -> Result<()> {
        ops::redirects::delete_redirect(&self.storage, redirect_id).await
    }

    pub async fn reset_redirect_hits(&self, redirect_id: &str) -> Result<()> {
        ops::redirects::reset_redirect_hits(&self.storage, redirect_id).await
    }

    // --- Bulk operations ---

    pub async fn bulk_delete_redirects(&self, ids: &[String]) -> Result<()> {
        ops::bulk::bulk_delete_redirects(&self.storage, ids).await
    }

    pub async fn bulk_set_redirect_status(
        &self,
        ids: &[String],
        status: RedirectStatus,
    ) -> Result<()> {
        ops::bulk::bulk_set_redirect_status(&self.storage, ids, status).await
    }

    pub async fn bulk_delete_redirect_logs(&self, ids: &[String]) -> Result<()> {
        ops::bulk::bulk_delete_redirect_logs(&self.storage, ids).await
    }

    pub async fn bulk_delete_not_found_logs(&self, ids: &[String]) -> Result<()> {
        ops::bulk::bulk_delete_not_found_logs(&self.storage, ids).await
    }

    pub async fn delete_all_tenant_redirect_logs(&self, tenant_id: &str) -> Result<()> {
        ops::bulk::delete_all_tenant_redirect_logs(&self.storage, tenant_id).await
    }

    pub async fn delete_all_tenant_not_found_logs(&self, tenant_id: &str) -> Result<()> {
        ops::bulk::delete_all_tenant_not_found_logs(&self.storage, tenant_id).await
    }

    // --- Log queries ---

    pub async fn query_redirect_logs(
        &self,
        query: &LogQuery,
    ) -> Result<PaginatedResult<shared::RedirectLog>> {
        self.storage.redirect_logs().query(query).await
    }

    pub async fn group_redirect_logs(
        &self,
        query: &LogGroupQuery,
    ) -> Result<PaginatedResult<LogGroupResult>> {
        self.storage.redirect_logs().group_by(query).await
    }

    pub async fn query_not_found_logs(
        &self,
        query: &LogQuery,
    ) -> Result<PaginatedResult<shared::NotFoundLog>> {
        self.storage.not_found_logs().query(query).await
    }

    pub async fn group_not_found_logs(
        &self,
        query: &LogGroupQuery,
    ) -> Result<PaginatedResult<LogGroupResult>> {
        self.storage.not_found_logs().group_by(query).await
    }

    // --- Log expiration ---

    pub async fn expire_logs(&self) -> Result<ExpirationResult> {
        ops::expiration::expire_logs(&self.storage, &self.config).await
    }

    // --- Content monitoring ---

    pub async fn handle_content_url_change(
        &self,
        tenant_id: &str,
        target_group_id: &str,
        item: &ContentItem,
    ) -> Result<Option<Redirect>> {
        ops::content::handle_content_url_change(
            &self.storage,
            &self.config,
            tenant_id,
            target_group_id,
            item,
        )
        .await
    }

    // --- Import ---

    pub async fn import_redirects(
        &self,
        source_data: &str,
        format: ImportFormat,
        target_group_id: &str,
    ) -> Result<ImportResult> {
        import::import_redirects(&self.storage, source_data, format, target_group_id).await
    }
}
