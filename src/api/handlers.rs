//! API Handlers
//!
//! HTTP request handlers for each service endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::{CacheInvalidator, CacheKey, CacheOrchestrator, CacheStats, Revalidator};
use crate::config::Config;
use crate::error::Result;
use crate::models::{HealthResponse, InvalidateResponse, StatsResponse};
use crate::store::StoreClient;
use crate::upstream::UpstreamClient;

/// Response header carrying the cache verdict for a read ("hit" or "miss").
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Application state shared across all handlers.
///
/// Holds the cache core wired to a single shared store client and upstream
/// client, both constructed once at process start.
#[derive(Clone)]
pub struct AppState {
    /// Read-path policy engine
    pub orchestrator: Arc<CacheOrchestrator>,
    /// Explicit cache-clear operation
    pub invalidator: Arc<CacheInvalidator>,
    /// Shared behavior counters
    pub stats: Arc<CacheStats>,
}

impl AppState {
    /// Wires the cache core onto the given store and upstream clients.
    pub fn new(
        store: Arc<dyn StoreClient>,
        upstream: Arc<dyn UpstreamClient>,
        config: &Config,
    ) -> Self {
        let stats = Arc::new(CacheStats::new());
        let key = CacheKey::new(config.cache_key.clone());
        let ttl = Duration::from_secs(config.cache_ttl);

        let revalidator = Arc::new(Revalidator::new(
            Arc::clone(&store),
            upstream,
            ttl,
            Arc::clone(&stats),
        ));
        let orchestrator = Arc::new(CacheOrchestrator::new(
            Arc::clone(&store),
            revalidator,
            key.clone(),
            Arc::clone(&stats),
        ));
        let invalidator = Arc::new(CacheInvalidator::new(store, key, Arc::clone(&stats)));

        Self {
            orchestrator,
            invalidator,
            stats,
        }
    }
}

/// Handler for GET /api/posts
///
/// Serves the cached collection, falling back to an inline upstream fetch
/// when the store has no usable entry. The body is the raw JSON payload,
/// byte-for-byte as fetched; the `x-cache` header tells the two paths apart.
pub async fn get_posts_handler(State(state): State<AppState>) -> Result<Response> {
    let (payload, source) = state.orchestrator.get().await?;

    let mut response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        payload.into_bytes(),
    )
        .into_response();
    response.headers_mut().insert(
        CACHE_STATUS_HEADER,
        HeaderValue::from_static(source.header_value()),
    );

    Ok(response)
}

/// Handler for DELETE /api/cache
///
/// Clears the cached collection so the next read refetches upstream.
pub async fn invalidate_cache_handler(
    State(state): State<AppState>,
) -> Result<Json<InvalidateResponse>> {
    state.invalidator.invalidate().await?;

    Ok(Json(InvalidateResponse::new()))
}

/// Handler for GET /stats
///
/// Returns current cache behavior counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = &state.stats;

    Json(StatsResponse::new(
        stats.hits(),
        stats.misses(),
        stats.revalidations(),
        stats.failed_revalidations(),
        stats.invalidations(),
    ))
}

/// Handler for GET /health
///
/// Returns health status of the service.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
