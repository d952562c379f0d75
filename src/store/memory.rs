//! In-Memory Store Backend
//!
//! A thread-safe expiring key-value map implementing the store contract.
//! Stands in for a networked store in deployments and tests that do not
//! have one; expiry is enforced at read time, with a periodic purge task
//! (see `tasks::spawn_purge_task`) reclaiming memory for entries nobody
//! reads again.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::CacheKey;
use crate::error::StoreError;
use crate::store::StoreClient;

// == Stored Entry ==
/// A value plus the instant it stops being servable.
#[derive(Debug, Clone)]
struct StoredEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl StoredEntry {
    fn new(value: Vec<u8>, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

// == Memory Store ==
/// In-memory implementation of [`StoreClient`] with TTL enforcement.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredEntry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Physically removes all expired entries.
    ///
    /// Expired entries already read as absent; this reclaims their memory.
    /// Returns the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    /// Returns the remaining TTL of a live entry, or `None` if the key is
    /// absent or expired.
    pub async fn ttl_remaining(&self, key: &CacheKey) -> Option<Duration> {
        let entries = self.entries.read().await;
        entries
            .get(key.as_str())
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.expires_at.saturating_duration_since(Instant::now()))
    }

    /// Returns the number of physically present entries, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if no entries are physically present.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key.as_str())
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &CacheKey, value: Vec<u8>, ttl: Duration) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.as_str().to_string(), StoredEntry::new(value, ttl));
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.remove(key.as_str());
        Ok(())
    }
}
