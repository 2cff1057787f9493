use async_trait::async_trait;
use chrono::{DateTime, Utc};

use shared::{NotFoundLog, RedirectLog, Result};

use super::{SharedStore, new_store, next_id};
use crate::query::{
    LogGroupQuery, LogGroupResult, LogQuery, PaginatedResult, group_items, query_items,
};
use crate::repository::{
    ExpiredBatch, NewNotFoundLog, NewRedirectLog, NotFoundLogRepository, RedirectLogRepository,
};

/// Removes up to `batch_size` rows older than `cutoff`, oldest first.
fn expire_batch<T, F>(
    store: &SharedStore<T>,
    cutoff: DateTime<Utc>,
    batch_size: u64,
    created_at: F,
) -> ExpiredBatch
where
    F: Fn(&T) -> DateTime<Utc>,
{
    let mut store = store.write().expect("log store poisoned");

    let mut expired: Vec<(String, DateTime<Utc>)> = store
        .iter()
        .filter(|(_, row)| created_at(row) < cutoff)
        .map(|(id, row)| (id.clone(), created_at(row)))
        .collect();
    expired.sort_by_key(|(_, ts)| *ts);

    let total = expired.len() as u64;
    let deleted = total.min(batch_size);
    for (id, _) in expired.into_iter().take(deleted as usize) {
        store.shift_remove(&id);
    }

    ExpiredBatch {
        deleted,
        has_more: total > deleted,
    }
}

pub struct MemoryRedirectLogRepository {
    store: SharedStore<RedirectLog>,
}

impl MemoryRedirectLogRepository {
    pub fn new() -> Self {
        MemoryRedirectLogRepository { store: new_store() }
    }
}

impl Default for MemoryRedirectLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RedirectLogRepository for MemoryRedirectLogRepository {
    async fn create(&self, log: NewRedirectLog) -> Result<RedirectLog> {
        let log = RedirectLog {
            id: next_id(),
            tenant_id: log.tenant_id,
            redirect_id: log.redirect_id,
            created_at: log.created_at,
            source_url: log.source_url,
            target_url: log.target_url,
            domain: log.domain,
            ip: log.ip,
            http_code: log.http_code,
            user_agent: log.user_agent,
            referrer: log.referrer,
            request_method: log.request_method,
            request_headers: log.request_headers,
            redirect_source: log.redirect_source,
        };
        let mut store = self.store.write().expect("log store poisoned");
        store.insert(log.id.clone(), log.clone());
        Ok(log)
    }

    async fn query(&self, query: &LogQuery) -> Result<PaginatedResult<RedirectLog>> {
        let store = self.store.read().expect("log store poisoned");
        let rows: Vec<RedirectLog> = store.values().cloned().collect();
        Ok(query_items(&rows, query))
    }

    async fn group_by(&self, query: &LogGroupQuery) -> Result<PaginatedResult<LogGroupResult>> {
        let store = self.store.read().expect("log store poisoned");
        let rows: Vec<RedirectLog> = store.values().cloned().collect();
        Ok(group_items(&rows, query))
    }

    async fn delete_many(&self, ids: &[String]) -> Result<()> {
        let mut store = self.store.write().expect("log store poisoned");
        for id in ids {
            store.shift_remove(id);
        }
        Ok(())
    }

    async fn delete_by_tenant_id(&self, tenant_id: &str) -> Result<()> {
        let mut store = self.store.write().expect("log store poisoned");
        store.retain(|_, log| log.tenant_id != tenant_id);
        Ok(())
    }

    async fn delete_expired_batch(
        &self,
        cutoff: DateTime<Utc>,
        batch_size: u64,
    ) -> Result<ExpiredBatch> {
        Ok(expire_batch(&self.store, cutoff, batch_size, |log| {
            log.created_at
        }))
    }

    async fn count_expired(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let store = self.store.read().expect("log store poisoned");
        Ok(store.values().filter(|log| log.created_at < cutoff).count() as u64)
    }
}

pub struct MemoryNotFoundLogRepository {
    store: SharedStore<NotFoundLog>,
}

impl MemoryNotFoundLogRepository {
    pub fn new() -> Self {
        MemoryNotFoundLogRepository { store: new_store() }
    }
}

impl Default for MemoryNotFoundLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotFoundLogRepository for MemoryNotFoundLogRepository {
    async fn create(&self, log: NewNotFoundLog) -> Result<NotFoundLog> {
        let log = NotFoundLog {
            id: next_id(),
            tenant_id: log.tenant_id,
            created_at: log.created_at,
            url: log.url,
            domain: log.domain,
            ip: log.ip,
            user_agent: log.user_agent,
            referrer: log.referrer,
            request_method: log.request_method,
            request_headers: log.request_headers,
        };
        let mut store = self.store.write().expect("log store poisoned");
        store.insert(log.id.clone(), log.clone());
        Ok(log)
    }

    async fn query(&self, query: &LogQuery) -> Result<PaginatedResult<NotFoundLog>> {
        let store = self.store.read().expect("log store poisoned");
        let rows: Vec<NotFoundLog> = store.values().cloned().collect();
        Ok(query_items(&rows, query))
    }

    async fn group_by(&self, query: &LogGroupQuery) -> Result<PaginatedResult<LogGroupResult>> {
        let store = self.store.read().expect("log store poisoned");
        let rows: Vec<NotFoundLog> = store.values().cloned().collect();
        Ok(group_items(&rows, query))
    }

    async fn delete_many(&self, ids: &[String]) -> Result<()> {
        let mut store = self.store.write().expect("log store poisoned");
        for id in ids {
            store.shift_remove(id);
        }
        Ok(())
    }

    async fn delete_by_tenant_id(&self, tenant_id: &str) -> Result<()> {
        let mut store = self.store.write().expect("log store poisoned");
        store.retain(|_, log| log.tenant_id != tenant_id);
        Ok(())
    }

    async fn delete_expired_batch(
        &self,
        cutoff: DateTime<Utc>,
        batch_size: u64,
    ) -> Result<ExpiredBatch> {
        Ok(expire_batch(&self.store, cutoff, batch_size, |log| {
            log.created_at
        }))
    }

    async fn count_expired(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let store = self.store.read().expect("log store poisoned");
        Ok(store.values().filter(|log| log.created_at < cutoff).count() as u64)
    }
}
