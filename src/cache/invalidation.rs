//! Invalidation Handler
//!
//! Explicit cache-clear operation. Deletes the entry unconditionally and
//! idempotently; it does not coordinate with in-flight revalidations, so a
//! refresh already past its fetch may repopulate the key shortly after.

use std::sync::Arc;

use tracing::info;

use crate::cache::{CacheKey, CacheStats};
use crate::error::Result;
use crate::store::StoreClient;

/// Clears the cached collection.
pub struct CacheInvalidator {
    store: Arc<dyn StoreClient>,
    key: CacheKey,
    stats: Arc<CacheStats>,
}

impl CacheInvalidator {
    /// Creates an invalidator for the collection stored under `key`.
    pub fn new(store: Arc<dyn StoreClient>, key: CacheKey, stats: Arc<CacheStats>) -> Self {
        Self { store, key, stats }
    }

    /// Deletes the entry. Invalidating an absent key succeeds.
    pub async fn invalidate(&self) -> Result<()> {
        self.store.delete(&self.key).await?;
        self.stats.record_invalidation();
        info!(key = %self.key, "cache cleared");
        Ok(())
    }
}
