//! Retention-driven log expiration.
//!
//! Intended to run from a host-side scheduler. Each invocation removes at
//! most one batch per log kind; callers keep invoking while `has_more`.

use chrono::{Duration, Utc};

use shared::{Result, RerouteConfig};
use storage::{ExpiredBatch, StorageAdapter};

use crate::metrics_defs::LOGS_EXPIRED;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpirationResult {
    pub redirect_logs: ExpiredBatch,
    pub not_found_logs: ExpiredBatch,
}

pub async fn expire_logs(
    storage: &dyn StorageAdapter,
    config: &RerouteConfig,
) -> Result<ExpirationResult> {
    let mut result = ExpirationResult::default();

    if config.redirect_log_retention_days > 0 {
        let cutoff = Utc::now() - Duration::days(i64::from(config.redirect_log_retention_days));
        let count = storage.redirect_logs().count_expired(cutoff).await?;
        if count > 0 {
            let batch_size = pick_batch_size(count, config);
            result.redirect_logs = storage
                .redirect_logs()
                .delete_expired_batch(cutoff, batch_size)
                .await?;
        }
    }

    if config.not_found_log_retention_days > 0 {
        let cutoff = Utc::now() - Duration::days(i64::from(config.not_found_log_retention_days));
        let count = storage.not_found_logs().count_expired(cutoff).await?;
        if count > 0 {
            let batch_size = pick_batch_size(count, config);
            result.not_found_logs = storage
                .not_found_logs()
                .delete_expired_batch(cutoff, batch_size)
                .await?;
        }
    }

    let deleted = result.redirect_logs.deleted + result.not_found_logs.deleted;
    if deleted > 0 {
        LOGS_EXPIRED.increment(deleted);
        tracing::debug!(
            redirect_logs = result.redirect_logs.deleted,
            not_found_logs = result.not_found_logs.deleted,
            "expired log rows"
        );
    }

    Ok(result)
}

/// Backlogs past the aggressive threshold get the larger batch size.
fn pick_batch_size(expired_count: u64, config: &RerouteConfig) -> u64 {
    if expired_count > config.aggressive_cleanup_threshold {
        config.aggressive_cleanup_batch_size
    } else {
        config.log_cleanup_batch_size
    }
}
