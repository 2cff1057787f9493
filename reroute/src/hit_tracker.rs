use chrono::Utc;

use shared::{Redirect, RerouteConfig, Result};
use storage::StorageAdapter;

use crate::metrics_defs::HITS_TRACKED;

/// Bumps the rule's hit count, unless hit tracking is disabled.
pub async fn track_hit(
    storage: &dyn StorageAdapter,
    config: &RerouteConfig,
    redirect: &Redirect,
) -> Result<()> {
    if !config.track_hits {
        return Ok(());
    }
    storage
        .redirects()
        .increment_hit_count(&redirect.id, Utc::now())
        .await?;
    HITS_TRACKED.increment(1);
    Ok(())
}
