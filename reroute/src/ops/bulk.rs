//! Bulk maintenance entry points; thin passthroughs to the repositories.

use shared::{RedirectStatus, Result};
use storage::StorageAdapter;

pub async fn bulk_delete_redirects(storage: &dyn StorageAdapter, ids: &[String]) -> Result<()> {
    storage.redirects().delete_many(ids).await
}

pub async fn bulk_set_redirect_status(
    storage: &dyn StorageAdapter,
    ids: &[String],
    status: RedirectStatus,
) -> Result<()> {
    storage.redirects().update_many_status(ids, status).await
}

pub async fn bulk_delete_redirect_logs(storage: &dyn StorageAdapter, ids: &[String]) -> Result<()> {
    storage.redirect_logs().delete_many(ids).await
}

pub async fn bulk_delete_not_found_logs(
    storage: &dyn StorageAdapter,
    ids: &[String],
) -> Result<()> {
    storage.not_found_logs().delete_many(ids).await
}

pub async fn delete_all_tenant_redirect_logs(
    storage: &dyn StorageAdapter,
    tenant_id: &str,
) -> Result<()> {
    storage.redirect_logs().delete_by_tenant_id(tenant_id).await
}

pub async fn delete_all_tenant_not_found_logs(
    storage: &dyn StorageAdapter,
    tenant_id: &str,
) -> Result<()> {
    storage.not_found_logs().delete_by_tenant_id(tenant_id).await
}
