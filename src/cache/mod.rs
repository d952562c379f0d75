//! Cache Module
//!
//! The stale-while-revalidate core: key and payload types, the
//! request-facing orchestrator, the revalidation task, and explicit
//! invalidation.

mod codec;
mod invalidation;
mod key;
mod orchestrator;
mod revalidate;
mod stats;

// Re-export public types
pub use codec::CachedPayload;
pub use invalidation::CacheInvalidator;
pub use key::CacheKey;
pub use orchestrator::{CacheOrchestrator, CacheSource};
pub use revalidate::{spawn_refresh, Revalidator};
pub use stats::CacheStats;
