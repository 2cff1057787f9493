use shared::{Group, RedirectStatus, Result, RerouteError, TenantStatus};
use storage::{NewGroup, StorageAdapter};

pub async fn create_group(
    storage: &dyn StorageAdapter,
    tenant_id: &str,
    name: String,
) -> Result<Group> {
    let tenant = storage
        .tenants()
        .find_by_id(tenant_id)
        .await?
        .ok_or_else(|| RerouteError::not_found("Tenant", tenant_id))?;
    if tenant.status != TenantStatus::Active {
        return Err(RerouteError::precondition("Tenant must be active to create group"));
    }

    let position = storage.groups().count_by_tenant_id(tenant_id).await?;
    storage
        .groups()
        .create(NewGroup {
            tenant_id: tenant_id.to_string(),
            name,
            status: RedirectStatus::Enabled,
            position,
        })
        .await
}

/// Re-enables a group and cascade-enables its member redirects.
pub async fn enable_group(storage: &dyn StorageAdapter, group_id: &str) -> Result<Group> {
    let mut group = storage
        .groups()
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| RerouteError::not_found("Group", group_id))?;
    if group.status != RedirectStatus::Disabled {
        return Err(RerouteError::precondition("Group must be disabled to enable"));
    }

    cascade_status(storage, group_id, RedirectStatus::Enabled).await?;

    group.status = RedirectStatus::Enabled;
    storage.groups().save(group).await
}

/// Disables a group and cascade-disables its member redirects. The rules
/// are kept, not deleted, so re-enabling restores them.
pub async fn disable_group(storage: &dyn StorageAdapter, group_id: &str) -> Result<Group> {
    let mut group = storage
        .groups()
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| RerouteError::not_found("Group", group_id))?;
    if group.status != RedirectStatus::Enabled {
        return Err(RerouteError::precondition("Group must be enabled to disable"));
    }

    cascade_status(storage, group_id, RedirectStatus::Disabled).await?;

    group.status = RedirectStatus::Disabled;
    storage.groups().save(group).await
}

async fn cascade_status(
    storage: &dyn StorageAdapter,
    group_id: &str,
    status: RedirectStatus,
) -> Result<()> {
    let redirects = storage.redirects().find_by_group_id(group_id).await?;
    let ids: Vec<String> = redirects.into_iter().map(|r| r.id).collect();
    if !ids.is_empty() {
        storage.redirects().update_many_status(&ids, status).await?;
    }
    tracing::debug!(group_id = %group_id, count = ids.len(), status = ?status, "cascaded group status");
    Ok(())
}

/// Deletes a group together with its member redirects.
pub async fn delete_group(storage: &dyn StorageAdapter, group_id: &str) -> Result<()> {
    storage
        .groups()
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| RerouteError::not_found("Group", group_id))?;

    storage.redirects().delete_by_group_id(group_id).await?;
    storage.groups().delete(group_id).await
}
