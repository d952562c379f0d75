//! Expired-Entry Purge Task
//!
//! Background task that periodically removes expired entries from the
//! bundled in-memory store backend. Expired entries already read as absent;
//! the purge reclaims their memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::MemoryStore;

/// Spawns a background task that periodically purges expired store entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between purge runs.
///
/// # Arguments
/// * `store` - Shared in-memory store backend
/// * `purge_interval_secs` - Interval in seconds between purge runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_purge_task(store: Arc<MemoryStore>, purge_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(purge_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expired-entry purge task with interval of {} seconds",
            purge_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.purge_expired().await;

            if removed > 0 {
                info!("Purge: removed {} expired entries", removed);
            } else {
                debug!("Purge: no expired entries found");
            }
        }
    })
}
