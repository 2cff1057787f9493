use async_trait::async_trait;

use shared::{Result, RerouteError, Tenant, TenantHost, TenantStatus};

use super::{SharedStore, new_store, next_id};
use crate::repository::{NewTenantHost, TenantHostRepository, TenantRepository};

pub struct MemoryTenantRepository {
    store: SharedStore<Tenant>,
}

impl MemoryTenantRepository {
    pub fn new() -> Self {
        MemoryTenantRepository { store: new_store() }
    }
}

impl Default for MemoryTenantRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TenantRepository for MemoryTenantRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>> {
        let store = self.store.read().expect("tenant store poisoned");
        Ok(store.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Tenant>> {
        let store = self.store.read().expect("tenant store poisoned");
        Ok(store.values().cloned().collect())
    }

    async fn create(&self, name: String, status: TenantStatus) -> Result<Tenant> {
        let tenant = Tenant {
            id: next_id(),
            name,
            status,
        };
        let mut store = self.store.write().expect("tenant store poisoned");
        store.insert(tenant.id.clone(), tenant.clone());
        Ok(tenant)
    }

    async fn save(&self, tenant: Tenant) -> Result<Tenant> {
        let mut store = self.store.write().expect("tenant store poisoned");
        if !store.contains_key(&tenant.id) {
            return Err(RerouteError::not_found("Tenant", &tenant.id));
        }
        store.insert(tenant.id.clone(), tenant.clone());
        Ok(tenant)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut store = self.store.write().expect("tenant store poisoned");
        store.shift_remove(id);
        Ok(())
    }
}

pub struct MemoryTenantHostRepository {
    store: SharedStore<TenantHost>,
}

impl MemoryTenantHostRepository {
    pub fn new() -> Self {
        MemoryTenantHostRepository { store: new_store() }
    }
}

impl Default for MemoryTenantHostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TenantHostRepository for MemoryTenantHostRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<TenantHost>> {
        let store = self.store.read().expect("host store poisoned");
        Ok(store.get(id).cloned())
    }

    async fn find_by_hostname(&self, hostname: &str) -> Result<Option<TenantHost>> {
        let store = self.store.read().expect("host store poisoned");
        Ok(store.values().find(|h| h.hostname == hostname).cloned())
    }

    async fn find_by_tenant_id(&self, tenant_id: &str) -> Result<Vec<TenantHost>> {
        let store = self.store.read().expect("host store poisoned");
        Ok(store
            .values()
            .filter(|h| h.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn create(&self, host: NewTenantHost) -> Result<TenantHost> {
        let host = TenantHost {
            id: next_id(),
            tenant_id: host.tenant_id,
            hostname: host.hostname,
            environment: host.environment,
            status: host.status,
        };
        let mut store = self.store.write().expect("host store poisoned");
        store.insert(host.id.clone(), host.clone());
        Ok(host)
    }

    async fn save(&self, host: TenantHost) -> Result<TenantHost> {
        let mut store = self.store.write().expect("host store poisoned");
        if !store.contains_key(&host.id) {
            return Err(RerouteError::not_found("TenantHost", &host.id));
        }
        store.insert(host.id.clone(), host.clone());
        Ok(host)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut store = self.store.write().expect("host store poisoned");
        store.shift_remove(id);
        Ok(())
    }
}
