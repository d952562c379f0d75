//! Cache Orchestrator
//!
//! The request-facing policy engine. Decides between serving the stored
//! payload and fetching inline, and triggers background revalidation:
//!
//! - present entry: serve it immediately, spawn one detached refresh. An
//!   entry is always servable while the store holds it; freshness is
//!   approximated by the store's own TTL eventually evicting it.
//! - absent entry: fetch-and-populate inline; the caller pays the upstream
//!   latency only here.
//! - undecodable entry: same as absent.
//!
//! Concurrent hits each spawn their own refresh; duplicate refreshes for the
//! same key are accepted, last write wins at the store.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::revalidate::{spawn_refresh, Revalidator};
use crate::cache::{CacheKey, CachedPayload, CacheStats};
use crate::error::Result;
use crate::store::StoreClient;

// == Cache Source ==
/// Where a served payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
    /// Served from the store; a background refresh was triggered
    Hit,
    /// Fetched from upstream inline because the store had no usable entry
    Fresh,
}

impl CacheSource {
    /// Value for the `x-cache` response header.
    pub fn header_value(&self) -> &'static str {
        match self {
            CacheSource::Hit => "hit",
            CacheSource::Fresh => "miss",
        }
    }
}

// == Cache Orchestrator ==
/// Serves reads for one cached collection.
pub struct CacheOrchestrator {
    store: Arc<dyn StoreClient>,
    revalidator: Arc<Revalidator>,
    key: CacheKey,
    stats: Arc<CacheStats>,
}

impl CacheOrchestrator {
    /// Creates an orchestrator for the collection stored under `key`.
    pub fn new(
        store: Arc<dyn StoreClient>,
        revalidator: Arc<Revalidator>,
        key: CacheKey,
        stats: Arc<CacheStats>,
    ) -> Self {
        Self {
            store,
            revalidator,
            key,
            stats,
        }
    }

    // == Get ==
    /// Returns the collection payload and where it came from.
    ///
    /// On a hit the caller never waits on upstream; the refresh runs
    /// detached and its failure cannot affect the returned response. On a
    /// miss, any store, fetch, or validation failure surfaces to the caller.
    pub async fn get(&self) -> Result<(CachedPayload, CacheSource)> {
        match self.store.get(&self.key).await? {
            Some(bytes) => match CachedPayload::decode(bytes) {
                Ok(payload) => {
                    self.stats.record_hit();
                    info!(key = %self.key, "cache hit, serving stored payload");

                    spawn_refresh(Arc::clone(&self.revalidator), self.key.clone());

                    Ok((payload, CacheSource::Hit))
                }
                Err(err) => {
                    // An unreadable entry is as good as no entry: refetch
                    // inline rather than surface the corruption
                    warn!(key = %self.key, error = %err, "stored payload undecodable, refetching");
                    self.fetch_inline().await
                }
            },
            None => {
                info!(key = %self.key, "cache miss, fetching upstream");
                self.fetch_inline().await
            }
        }
    }

    async fn fetch_inline(&self) -> Result<(CachedPayload, CacheSource)> {
        self.stats.record_miss();
        let payload = self.revalidator.refresh(&self.key).await?;
        Ok((payload, CacheSource::Fresh))
    }
}
