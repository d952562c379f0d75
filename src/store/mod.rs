//! Store Module
//!
//! Contract for the shared key-value store backing the cache, plus the
//! bundled in-memory backend.
//!
//! The service only ever needs three operations from its store: read a key,
//! write a key with an expiry, delete a key. Expiration is owned entirely by
//! the store; callers see "present" or "absent" and never inspect timestamps.

mod memory;


pub use memory::MemoryStore;

use std::time::Duration;

use async_trait::async_trait;

use crate::cache::CacheKey;
use crate::error::StoreError;

// == Store Client Contract ==
/// Abstract expiring key-value store.
///
/// Implementations must be shareable across requests and background tasks;
/// the service holds a single client behind `Arc` for the process lifetime.
#[async_trait]
pub trait StoreClient: Send + Sync + 'static {
    /// Reads the value stored under `key`, or `None` if the key is absent
    /// or its TTL has elapsed.
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, StoreError>;

    /// Writes `value` under `key` with the given TTL, fully replacing any
    /// existing entry and resetting its expiry.
    async fn set(&self, key: &CacheKey, value: Vec<u8>, ttl: Duration) -> Result<(), StoreError>;

    /// Removes the entry under `key`. Deleting an absent key is not an error.
    async fn delete(&self, key: &CacheKey) -> Result<(), StoreError>;
}
