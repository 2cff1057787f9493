use shared::{Result, RerouteError, Tenant, TenantStatus};
use storage::StorageAdapter;

pub async fn create_tenant(storage: &dyn StorageAdapter, name: String) -> Result<Tenant> {
    storage.tenants().create(name, TenantStatus::Active).await
}

pub async fn suspend_tenant(storage: &dyn StorageAdapter, tenant_id: &str) -> Result<Tenant> {
    let mut tenant = storage
        .tenants()
        .find_by_id(tenant_id)
        .await?
        .ok_or_else(|| RerouteError::not_found("Tenant", tenant_id))?;
    if tenant.status != TenantStatus::Active {
        return Err(RerouteError::precondition("Tenant must be active to suspend"));
    }
    tenant.status = TenantStatus::Suspended;
    storage.tenants().save(tenant).await
}

pub async fn activate_tenant(storage: &dyn StorageAdapter, tenant_id: &str) -> Result<Tenant> {
    let mut tenant = storage
        .tenants()
        .find_by_id(tenant_id)
        .await?
        .ok_or_else(|| RerouteError::not_found("Tenant", tenant_id))?;
    if tenant.status != TenantStatus::Suspended {
        return Err(RerouteError::precondition("Tenant must be suspended to activate"));
    }
    tenant.status = TenantStatus::Active;
    storage.tenants().save(tenant).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::MemoryStorage;

    #[tokio::test]
    async fn test_tenant_lifecycle() {
        let storage = MemoryStorage::new();
        let tenant = create_tenant(&storage, "Acme".to_string()).await.unwrap();
        assert_eq!(tenant.status, TenantStatus::Active);

        let tenant = suspend_tenant(&storage, &tenant.id).await.unwrap();
        assert_eq!(tenant.status, TenantStatus::Suspended);

        // suspending twice violates the precondition
        let err = suspend_tenant(&storage, &tenant.id).await.unwrap_err();
        assert!(matches!(err, RerouteError::Precondition(_)));

        let tenant = activate_tenant(&storage, &tenant.id).await.unwrap();
        assert_eq!(tenant.status, TenantStatus::Active);
    }

    #[tokio::test]
    async fn test_unknown_tenant_is_not_found() {
        let storage = MemoryStorage::new();
        let err = suspend_tenant(&storage, "missing").await.unwrap_err();
        assert!(matches!(err, RerouteError::NotFound { .. }));
    }
}
