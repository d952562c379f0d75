//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycles over the router, with a stub upstream
//! injected behind the fetch contract.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use posts_cache::cache::CacheKey;
use posts_cache::error::FetchError;
use posts_cache::store::{MemoryStore, StoreClient};
use posts_cache::upstream::UpstreamClient;
use posts_cache::{api::create_router, AppState, Config};

// == Helper Types ==

/// Stub upstream with a switchable failure mode and a fetch counter.
struct StubUpstream {
    payload: Vec<u8>,
    fail: AtomicBool,
    fetches: AtomicUsize,
}

impl StubUpstream {
    fn serving(payload: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            payload: payload.to_vec(),
            fail: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        let stub = Self::serving(b"[]");
        stub.fail.store(true, Ordering::SeqCst);
        stub
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamClient for StubUpstream {
    async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(FetchError::Status(reqwest::StatusCode::BAD_GATEWAY));
        }
        Ok(self.payload.clone())
    }
}

// == Helper Functions ==

fn create_test_app(upstream: Arc<StubUpstream>) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), upstream, &Config::default());
    (create_router(state), store)
}

async fn get_posts(app: &Router) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri("/api/posts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn delete_cache(app: &Router) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX).await.unwrap().to_vec()
}

async fn body_to_json(body: Body) -> Value {
    serde_json::from_slice(&body_bytes(body).await).unwrap()
}

/// Polls `cond` until it holds or a timeout elapses.
async fn eventually<F: Fn() -> bool>(cond: F, what: &str) {
    for _ in 0..100 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for: {}", what);
}

const POSTS_KEY: &str = "posts";
const UPSTREAM_PAYLOAD: &[u8] = br#"[{"id":1,"title":"hello","body":"world"}]"#;

// == Read Endpoint Tests ==

#[tokio::test]
async fn test_empty_store_fills_from_upstream() {
    let upstream = StubUpstream::serving(UPSTREAM_PAYLOAD);
    let (app, store) = create_test_app(upstream.clone());

    let response = get_posts(&app).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-cache"], "miss");
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(body_bytes(response.into_body()).await, UPSTREAM_PAYLOAD);

    // Exactly one upstream call, and the entry is now present with the
    // configured TTL attached
    assert_eq!(upstream.fetch_count(), 1);
    assert_eq!(
        store.get(&CacheKey::new(POSTS_KEY)).await.unwrap(),
        Some(UPSTREAM_PAYLOAD.to_vec())
    );
    let ttl = store
        .ttl_remaining(&CacheKey::new(POSTS_KEY))
        .await
        .expect("entry should carry a TTL");
    assert!(ttl <= Duration::from_secs(3600));
    assert!(ttl > Duration::from_secs(3590));
}

#[tokio::test]
async fn test_existing_entry_is_served_immediately() {
    let upstream = StubUpstream::serving(UPSTREAM_PAYLOAD);
    let (app, store) = create_test_app(upstream.clone());

    let seeded = br#"[{"id":1,"title":"x"}]"#.to_vec();
    store
        .set(&CacheKey::new(POSTS_KEY), seeded.clone(), Duration::from_secs(3600))
        .await
        .unwrap();

    let response = get_posts(&app).await;

    // The response is the stored entry, not the newer upstream payload
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-cache"], "hit");
    assert_eq!(body_bytes(response.into_body()).await, seeded);

    // Upstream is called afterwards, in the background, and the entry is
    // eventually replaced
    eventually(|| upstream.fetch_count() == 1, "background upstream call").await;

    let mut replaced = false;
    for _ in 0..100 {
        if store.get(&CacheKey::new(POSTS_KEY)).await.unwrap() == Some(UPSTREAM_PAYLOAD.to_vec()) {
            replaced = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(replaced, "entry should be replaced by the background refresh");
}

#[tokio::test]
async fn test_second_read_does_not_wait_for_upstream() {
    let upstream = StubUpstream::serving(UPSTREAM_PAYLOAD);
    let (app, _store) = create_test_app(upstream.clone());

    let first = get_posts(&app).await;
    assert_eq!(first.headers()["x-cache"], "miss");

    let second = get_posts(&app).await;
    assert_eq!(second.headers()["x-cache"], "hit");
    assert_eq!(body_bytes(second.into_body()).await, UPSTREAM_PAYLOAD);
}

#[tokio::test]
async fn test_round_trip_preserves_payload_bytes() {
    // Formatting quirks must survive store-and-serve untouched
    let payload = br#"[ {"title": "x",  "id": 1} ]"#;
    let upstream = StubUpstream::serving(payload);
    let (app, _store) = create_test_app(upstream);

    let miss = get_posts(&app).await;
    assert_eq!(body_bytes(miss.into_body()).await, payload);

    let hit = get_posts(&app).await;
    assert_eq!(hit.headers()["x-cache"], "hit");
    assert_eq!(body_bytes(hit.into_body()).await, payload);
}

#[tokio::test]
async fn test_dead_upstream_with_empty_store_is_generic_error() {
    let upstream = StubUpstream::failing();
    let (app, store) = create_test_app(upstream);

    let response = get_posts(&app).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Internal Server Error");

    // The failed fill wrote nothing
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_stale_entry_survives_failing_upstream() {
    let upstream = StubUpstream::failing();
    let (app, store) = create_test_app(upstream.clone());

    let seeded = br#"[{"id":1,"title":"x"}]"#.to_vec();
    store
        .set(&CacheKey::new(POSTS_KEY), seeded.clone(), Duration::from_secs(3600))
        .await
        .unwrap();

    // Served from the store despite the upstream being down
    let response = get_posts(&app).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response.into_body()).await, seeded.clone());

    // The background refresh fails without touching the entry
    eventually(|| upstream.fetch_count() >= 1, "background refresh attempt").await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let response = get_posts(&app).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-cache"], "hit");
    assert_eq!(body_bytes(response.into_body()).await, seeded);
}

// == Invalidate Endpoint Tests ==

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let upstream = StubUpstream::serving(UPSTREAM_PAYLOAD);
    let (app, store) = create_test_app(upstream.clone());

    // Populate
    get_posts(&app).await;
    assert_eq!(upstream.fetch_count(), 1);
    assert!(!store.is_empty().await);

    // Clear
    let response = delete_cache(&app).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["message"], "Cache cleared successfully");
    assert_eq!(store.get(&CacheKey::new(POSTS_KEY)).await.unwrap(), None);

    // Next read misses and fetches again
    let response = get_posts(&app).await;
    assert_eq!(response.headers()["x-cache"], "miss");
    assert_eq!(upstream.fetch_count(), 2);
}

#[tokio::test]
async fn test_invalidate_empty_cache_succeeds() {
    let upstream = StubUpstream::serving(UPSTREAM_PAYLOAD);
    let (app, _store) = create_test_app(upstream);

    let response = delete_cache(&app).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["message"], "Cache cleared successfully");
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_reflect_reads() {
    let upstream = StubUpstream::serving(UPSTREAM_PAYLOAD);
    let (app, _store) = create_test_app(upstream);

    get_posts(&app).await; // miss
    get_posts(&app).await; // hit

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert!(json.get("hit_rate").is_some());
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let upstream = StubUpstream::serving(UPSTREAM_PAYLOAD);
    let (app, _store) = create_test_app(upstream);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}
