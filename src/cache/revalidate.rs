//! Revalidation Task
//!
//! The unit of work that refetches upstream data and rewrites the cache
//! entry. Runs synchronously on the miss path and detached (fire-and-forget)
//! after a hit. A failed refresh never touches the existing entry, so stale
//! data stays servable.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::cache::{CacheKey, CachedPayload, CacheStats};
use crate::error::Result;
use crate::store::StoreClient;
use crate::upstream::UpstreamClient;

// == Revalidator ==
/// Refetches the upstream payload and replaces the stored entry.
pub struct Revalidator {
    store: Arc<dyn StoreClient>,
    upstream: Arc<dyn UpstreamClient>,
    ttl: Duration,
    stats: Arc<CacheStats>,
}

impl Revalidator {
    /// Creates a revalidator writing entries with the given TTL.
    pub fn new(
        store: Arc<dyn StoreClient>,
        upstream: Arc<dyn UpstreamClient>,
        ttl: Duration,
        stats: Arc<CacheStats>,
    ) -> Self {
        Self {
            store,
            upstream,
            ttl,
            stats,
        }
    }

    // == Refresh ==
    /// Fetches the upstream payload and writes it under `key`, fully
    /// replacing any existing entry and resetting its TTL.
    ///
    /// Returns the fetched payload so the miss path can serve it without a
    /// second read. On any failure the store is left untouched.
    ///
    /// Re-running a refresh against unchanged upstream state rewrites the
    /// same entry; the operation is idempotent in effect.
    pub async fn refresh(&self, key: &CacheKey) -> Result<CachedPayload> {
        let bytes = self.upstream.fetch().await?;
        let payload = CachedPayload::decode(bytes)?;

        self.store
            .set(key, payload.as_bytes().to_vec(), self.ttl)
            .await?;

        Ok(payload)
    }
}

// == Fire-and-Forget Refresh ==
/// Spawns a detached background refresh for `key`.
///
/// The task is not linked to any request lifecycle: nothing awaits it,
/// nothing cancels it. Failures are logged and counted but never surface
/// to a caller; the existing entry stays in place.
///
/// # Returns
/// The task's JoinHandle. Callers on the request path drop it; tests may
/// await it.
pub fn spawn_refresh(revalidator: Arc<Revalidator>, key: CacheKey) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(key = %key, "revalidating cache in background");

        match revalidator.refresh(&key).await {
            Ok(_) => {
                revalidator.stats.record_revalidation();
                info!(key = %key, "cache revalidated");
            }
            Err(err) => {
                revalidator.stats.record_failed_revalidation();
                error!(key = %key, error = %err, "background revalidation failed");
            }
        }
    })
}
