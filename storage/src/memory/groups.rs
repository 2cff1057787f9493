use async_trait::async_trait;

use shared::{Group, Result, RerouteError};

use super::{SharedStore, next_id};
use crate::repository::{GroupRepository, NewGroup};

pub struct MemoryGroupRepository {
    store: SharedStore<Group>,
}

impl MemoryGroupRepository {
    pub fn new(store: SharedStore<Group>) -> Self {
        MemoryGroupRepository { store }
    }
}

#[async_trait]
impl GroupRepository for MemoryGroupRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Group>> {
        let store = self.store.read().expect("group store poisoned");
        Ok(store.get(id).cloned())
    }

    async fn find_by_tenant_id(&self, tenant_id: &str) -> Result<Vec<Group>> {
        let store = self.store.read().expect("group store poisoned");
        let mut groups: Vec<Group> = store
            .values()
            .filter(|g| g.tenant_id == tenant_id)
            .cloned()
            .collect();
        groups.sort_by_key(|g| g.position);
        Ok(groups)
    }

    async fn create(&self, group: NewGroup) -> Result<Group> {
        let group = Group {
            id: next_id(),
            tenant_id: group.tenant_id,
            name: group.name,
            status: group.status,
            position: group.position,
        };
        let mut store = self.store.write().expect("group store poisoned");
        store.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn save(&self, group: Group) -> Result<Group> {
        let mut store = self.store.write().expect("group store poisoned");
        if !store.contains_key(&group.id) {
            return Err(RerouteError::not_found("Group", &group.id));
        }
        store.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut store = self.store.write().expect("group store poisoned");
        store.shift_remove(id);
        Ok(())
    }

    async fn count_by_tenant_id(&self, tenant_id: &str) -> Result<u32> {
        let store = self.store.read().expect("group store poisoned");
        Ok(store.values().filter(|g| g.tenant_id == tenant_id).count() as u32)
    }
}
