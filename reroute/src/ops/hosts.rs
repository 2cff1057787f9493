use shared::{RedirectStatus, Result, RerouteError, TenantHost, TenantStatus};
use storage::{NewTenantHost, StorageAdapter};

pub async fn add_host(
    storage: &dyn StorageAdapter,
    tenant_id: &str,
    hostname: String,
    environment: Option<String>,
) -> Result<TenantHost> {
    let tenant = storage
        .tenants()
        .find_by_id(tenant_id)
        .await?
        .ok_or_else(|| RerouteError::not_found("Tenant", tenant_id))?;
    if tenant.status != TenantStatus::Active {
        return Err(RerouteError::precondition("Tenant must be active to add host"));
    }

    if storage
        .tenant_hosts()
        .find_by_hostname(&hostname)
        .await?
        .is_some()
    {
        return Err(RerouteError::precondition(format!(
            "Hostname already registered: {hostname}"
        )));
    }

    storage
        .tenant_hosts()
        .create(NewTenantHost {
            tenant_id: tenant_id.to_string(),
            hostname,
            environment,
            status: RedirectStatus::Enabled,
        })
        .await
}

/// Removes a host, refusing to drop the tenant's last enabled one: a tenant
/// without an enabled host can never match a request again.
pub async fn remove_host(storage: &dyn StorageAdapter, host_id: &str) -> Result<()> {
    let host = storage
        .tenant_hosts()
        .find_by_id(host_id)
        .await?
        .ok_or_else(|| RerouteError::not_found("TenantHost", host_id))?;

    let all_hosts = storage
        .tenant_hosts()
        .find_by_tenant_id(&host.tenant_id)
        .await?;
    let enabled = all_hosts
        .iter()
        .filter(|h| h.status == RedirectStatus::Enabled)
        .count();
    if enabled <= 1 && host.status == RedirectStatus::Enabled {
        return Err(RerouteError::precondition("Cannot remove last active host"));
    }

    storage.tenant_hosts().delete(host_id).await
}

pub async fn enable_host(storage: &dyn StorageAdapter, host_id: &str) -> Result<TenantHost> {
    let mut host = storage
        .tenant_hosts()
        .find_by_id(host_id)
        .await?
        .ok_or_else(|| RerouteError::not_found("TenantHost", host_id))?;
    if host.status != RedirectStatus::Disabled {
        return Err(RerouteError::precondition("Host must be disabled to enable"));
    }
    host.status = RedirectStatus::Enabled;
    storage.tenant_hosts().save(host).await
}

pub async fn disable_host(storage: &dyn StorageAdapter, host_id: &str) -> Result<TenantHost> {
    let mut host = storage
        .tenant_hosts()
        .find_by_id(host_id)
        .await?
        .ok_or_else(|| RerouteError::not_found("TenantHost", host_id))?;
    if host.status != RedirectStatus::Enabled {
        return Err(RerouteError::precondition("Host must be enabled to disable"));
    }
    host.status = RedirectStatus::Disabled;
    storage.tenant_hosts().save(host).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::tenants::create_tenant;
    use storage::MemoryStorage;

    #[tokio::test]
    async fn test_add_host_requires_unique_hostname() {
        let storage = MemoryStorage::new();
        let tenant = create_tenant(&storage, "Acme".to_string()).await.unwrap();

        add_host(&storage, &tenant.id, "www.acme.com".to_string(), None)
            .await
            .unwrap();
        let err = add_host(&storage, &tenant.id, "www.acme.com".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, RerouteError::Precondition(_)));
    }

    #[tokio::test]
    async fn test_cannot_remove_last_active_host() {
        let storage = MemoryStorage::new();
        let tenant = create_tenant(&storage, "Acme".to_string()).await.unwrap();
        let only = add_host(&storage, &tenant.id, "www.acme.com".to_string(), None)
            .await
            .unwrap();

        let err = remove_host(&storage, &only.id).await.unwrap_err();
        assert!(matches!(err, RerouteError::Precondition(_)));

        // with a second enabled host the removal goes through
        add_host(&storage, &tenant.id, "acme.com".to_string(), None)
            .await
            .unwrap();
        remove_host(&storage, &only.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_enable_disable_roundtrip() {
        let storage = MemoryStorage::new();
        let tenant = create_tenant(&storage, "Acme".to_string()).await.unwrap();
        let host = add_host(&storage, &tenant.id, "www.acme.com".to_string(), None)
            .await
            .unwrap();

        let host = disable_host(&storage, &host.id).await.unwrap();
        assert_eq!(host.status, RedirectStatus::Disabled);

        let err = disable_host(&storage, &host.id).await.unwrap_err();
        assert!(matches!(err, RerouteError::Precondition(_)));

        let host = enable_host(&storage, &host.id).await.unwrap();
        assert_eq!(host.status, RedirectStatus::Enabled);
    }
}
