//! In-memory storage adapter.
//!
//! Backs tests and database-free embeddings. Insertion order is preserved
//! (`IndexMap`) so listings are deterministic; candidate ordering is
//! re-sorted on read per the pipeline's sort contract.

mod groups;
mod logs;
mod redirects;
mod tenants;

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

use crate::repository::{
    GroupRepository, NotFoundLogRepository, RedirectLogRepository, RedirectRepository,
    StorageAdapter, TenantHostRepository, TenantRepository,
};

pub use groups::MemoryGroupRepository;
pub use logs::{MemoryNotFoundLogRepository, MemoryRedirectLogRepository};
pub use redirects::MemoryRedirectRepository;
pub use tenants::{MemoryTenantHostRepository, MemoryTenantRepository};

pub(crate) type SharedStore<T> = Arc<RwLock<IndexMap<String, T>>>;

pub(crate) fn new_store<T>() -> SharedStore<T> {
    Arc::new(RwLock::new(IndexMap::new()))
}

pub(crate) fn next_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A complete in-process [`StorageAdapter`].
pub struct MemoryStorage {
    tenants: MemoryTenantRepository,
    tenant_hosts: MemoryTenantHostRepository,
    groups: MemoryGroupRepository,
    redirects: MemoryRedirectRepository,
    redirect_logs: MemoryRedirectLogRepository,
    not_found_logs: MemoryNotFoundLogRepository,
}

impl MemoryStorage {
    pub fn new() -> Self {
        // The redirect repository joins against groups when building the
        // pipeline candidate list, so the two share one group store.
        let group_store = new_store();

        MemoryStorage {
            tenants: MemoryTenantRepository::new(),
            tenant_hosts: MemoryTenantHostRepository::new(),
            groups: MemoryGroupRepository::new(group_store.clone()),
            redirects: MemoryRedirectRepository::new(group_store),
            redirect_logs: MemoryRedirectLogRepository::new(),
            not_found_logs: MemoryNotFoundLogRepository::new(),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        MemoryStorage::new()
    }
}

impl StorageAdapter for MemoryStorage {
    fn tenants(&self) -> &dyn TenantRepository {
        &self.tenants
    }

    fn tenant_hosts(&self) -> &dyn TenantHostRepository {
        &self.tenant_hosts
    }

    fn groups(&self) -> &dyn GroupRepository {
        &self.groups
    }

    fn redirects(&self) -> &dyn RedirectRepository {
        &self.redirects
    }

    fn redirect_logs(&self) -> &dyn RedirectLogRepository {
        &self.redirect_logs
    }

    fn not_found_logs(&self) -> &dyn NotFoundLogRepository {
        &self.not_found_logs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{NewGroup, NewRedirect};
    use shared::{ActionType, MatchType, RedirectStatus, SourceFlags, TenantStatus};

    fn new_redirect(group_id: &str, position: u32, source_url: &str) -> NewRedirect {
        NewRedirect {
            group_id: group_id.to_string(),
            position,
            title: None,
            status: RedirectStatus::Enabled,
            source_url: source_url.to_string(),
            source_flags: SourceFlags::default(),
            match_type: MatchType::Url,
            match_value: None,
            match_is_regex: false,
            target_url: Some("/new".to_string()),
            alternate_target_url: None,
            action_type: ActionType::Redirect,
            action_code: 301,
            random_targets: Vec::new(),
            hit_count: 0,
            last_hit_at: None,
            log_excluded: false,
        }
    }

    #[tokio::test]
    async fn test_active_candidates_are_sorted_and_filtered() {
        let storage = MemoryStorage::new();
        let tenant = storage
            .tenants()
            .create("Acme".to_string(), TenantStatus::Active)
            .await
            .unwrap();

        // Create the later group first so insertion order differs from
        // position order.
        let second = storage
            .groups()
            .create(NewGroup {
                tenant_id: tenant.id.clone(),
                name: "second".to_string(),
                status: RedirectStatus::Enabled,
                position: 1,
            })
            .await
            .unwrap();
        let first = storage
            .groups()
            .create(NewGroup {
                tenant_id: tenant.id.clone(),
                name: "first".to_string(),
                status: RedirectStatus::Enabled,
                position: 0,
            })
            .await
            .unwrap();
        let disabled = storage
            .groups()
            .create(NewGroup {
                tenant_id: tenant.id.clone(),
                name: "off".to_string(),
                status: RedirectStatus::Disabled,
                position: 2,
            })
            .await
            .unwrap();

        storage
            .redirects()
            .create(new_redirect(&second.id, 0, "/b"))
            .await
            .unwrap();
        storage
            .redirects()
            .create(new_redirect(&first.id, 1, "/a2"))
            .await
            .unwrap();
        storage
            .redirects()
            .create(new_redirect(&first.id, 0, "/a1"))
            .await
            .unwrap();
        // in a disabled group: not a candidate
        storage
            .redirects()
            .create(new_redirect(&disabled.id, 0, "/hidden"))
            .await
            .unwrap();
        // disabled rule in an enabled group: not a candidate
        let mut off_rule = new_redirect(&first.id, 2, "/off");
        off_rule.status = RedirectStatus::Disabled;
        storage.redirects().create(off_rule).await.unwrap();

        let candidates = storage
            .redirects()
            .find_active_by_tenant_id(&tenant.id)
            .await
            .unwrap();

        let sources: Vec<&str> = candidates
            .iter()
            .map(|c| c.redirect.source_url.as_str())
            .collect();
        assert_eq!(sources, vec!["/a1", "/a2", "/b"]);
        assert_eq!(candidates[0].group_position, 0);
        assert_eq!(candidates[2].group_position, 1);
    }

    #[tokio::test]
    async fn test_hit_count_increment_and_reset() {
        let storage = MemoryStorage::new();
        let redirect = storage
            .redirects()
            .create(new_redirect("g1", 0, "/old"))
            .await
            .unwrap();

        let now = chrono::Utc::now();
        storage
            .redirects()
            .increment_hit_count(&redirect.id, now)
            .await
            .unwrap();
        storage
            .redirects()
            .increment_hit_count(&redirect.id, now)
            .await
            .unwrap();

        let stored = storage
            .redirects()
            .find_by_id(&redirect.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.hit_count, 2);
        assert_eq!(stored.last_hit_at, Some(now));

        storage
            .redirects()
            .reset_hit_count(&redirect.id)
            .await
            .unwrap();
        let stored = storage
            .redirects()
            .find_by_id(&redirect.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.hit_count, 0);
        assert_eq!(stored.last_hit_at, None);
    }

    #[tokio::test]
    async fn test_save_unknown_id_is_not_found() {
        let storage = MemoryStorage::new();
        let tenant = storage
            .tenants()
            .create("Acme".to_string(), TenantStatus::Active)
            .await
            .unwrap();

        let mut ghost = tenant.clone();
        ghost.id = "missing".to_string();
        let err = storage.tenants().save(ghost).await.unwrap_err();
        assert!(matches!(err, shared::RerouteError::NotFound { .. }));
    }
}
