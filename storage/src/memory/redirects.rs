use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use shared::{Candidate, Group, Redirect, RedirectStatus, Result, RerouteError};

use super::{SharedStore, new_store, next_id};
use crate::repository::{NewRedirect, RedirectRepository};

pub struct MemoryRedirectRepository {
    store: SharedStore<Redirect>,
    /// Shared with the group repository; candidate building joins on it.
    groups: SharedStore<Group>,
}

impl MemoryRedirectRepository {
    pub fn new(groups: SharedStore<Group>) -> Self {
        MemoryRedirectRepository {
            store: new_store(),
            groups,
        }
    }
}

#[async_trait]
impl RedirectRepository for MemoryRedirectRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Redirect>> {
        let store = self.store.read().expect("redirect store poisoned");
        Ok(store.get(id).cloned())
    }

    async fn find_by_group_id(&self, group_id: &str) -> Result<Vec<Redirect>> {
        let store = self.store.read().expect("redirect store poisoned");
        let mut redirects: Vec<Redirect> = store
            .values()
            .filter(|r| r.group_id == group_id)
            .cloned()
            .collect();
        redirects.sort_by_key(|r| r.position);
        Ok(redirects)
    }

    async fn find_active_by_tenant_id(&self, tenant_id: &str) -> Result<Vec<Candidate>> {
        let active_groups: HashMap<String, u32> = {
            let groups = self.groups.read().expect("group store poisoned");
            groups
                .values()
                .filter(|g| g.tenant_id == tenant_id && g.status == RedirectStatus::Enabled)
                .map(|g| (g.id.clone(), g.position))
                .collect()
        };

        let store = self.store.read().expect("redirect store poisoned");
        let mut candidates: Vec<Candidate> = store
            .values()
            .filter(|r| r.status == RedirectStatus::Enabled)
            .filter_map(|r| {
                active_groups.get(&r.group_id).map(|&group_position| Candidate {
                    redirect: r.clone(),
                    group_position,
                })
            })
            .collect();

        candidates.sort_by_key(|c| (c.group_position, c.redirect.position));
        Ok(candidates)
    }

    async fn create(&self, redirect: NewRedirect) -> Result<Redirect> {
        let redirect = redirect.into_redirect(next_id());
        let mut store = self.store.write().expect("redirect store poisoned");
        store.insert(redirect.id.clone(), redirect.clone());
        Ok(redirect)
    }

    async fn create_many(&self, redirects: Vec<NewRedirect>) -> Result<Vec<Redirect>> {
        let mut store = self.store.write().expect("redirect store poisoned");
        let mut created = Vec::with_capacity(redirects.len());
        for redirect in redirects {
            let redirect = redirect.into_redirect(next_id());
            store.insert(redirect.id.clone(), redirect.clone());
            created.push(redirect);
        }
        Ok(created)
    }

    async fn save(&self, redirect: Redirect) -> Result<Redirect> {
        let mut store = self.store.write().expect("redirect store poisoned");
        if !store.contains_key(&redirect.id) {
            return Err(RerouteError::not_found("Redirect", &redirect.id));
        }
        store.insert(redirect.id.clone(), redirect.clone());
        Ok(redirect)
    }

    async fn update_many_status(&self, ids: &[String], status: RedirectStatus) -> Result<()> {
        let mut store = self.store.write().expect("redirect store poisoned");
        for id in ids {
            if let Some(redirect) = store.get_mut(id) {
                redirect.status = status;
            }
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut store = self.store.write().expect("redirect store poisoned");
        store.shift_remove(id);
        Ok(())
    }

    async fn delete_many(&self, ids: &[String]) -> Result<()> {
        let mut store = self.store.write().expect("redirect store poisoned");
        for id in ids {
            store.shift_remove(id);
        }
        Ok(())
    }

    async fn delete_by_group_id(&self, group_id: &str) -> Result<()> {
        let mut store = self.store.write().expect("redirect store poisoned");
        store.retain(|_, r| r.group_id != group_id);
        Ok(())
    }

    async fn increment_hit_count(&self, id: &str, last_hit_at: DateTime<Utc>) -> Result<()> {
        let mut store = self.store.write().expect("redirect store poisoned");
        match store.get_mut(id) {
            Some(redirect) => {
                redirect.hit_count += 1;
                redirect.last_hit_at = Some(last_hit_at);
            }
            // A rule deleted between match and tracking is not an error.
            None => tracing::warn!(redirect_id = %id, "hit tracked for unknown redirect"),
        }
        Ok(())
    }

    async fn reset_hit_count(&self, id: &str) -> Result<()> {
        let mut store = self.store.write().expect("redirect store poisoned");
        if let Some(redirect) = store.get_mut(id) {
            redirect.hit_count = 0;
            redirect.last_hit_at = None;
        }
        Ok(())
    }

    async fn count_by_group_id(&self, group_id: &str) -> Result<u32> {
        let store = self.store.read().expect("redirect store poisoned");
        Ok(store.values().filter(|r| r.group_id == group_id).count() as u32)
    }
}
