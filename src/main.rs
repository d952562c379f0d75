//! Posts Cache - a stale-while-revalidate caching service
//!
//! Serves a cached upstream collection over HTTP, refreshing it in the
//! background on every hit and filling it inline on miss.

mod api;
mod cache;
mod config;
mod error;
mod models;
mod store;
mod tasks;
mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use store::MemoryStore;
use tasks::spawn_purge_task;
use upstream::HttpUpstream;

/// Main entry point for the caching service.
///
/// # Startup Sequence
/// 1. Load `.env` and initialize the tracing subscriber
/// 2. Load configuration from environment variables
/// 3. Construct the shared store and upstream clients
/// 4. Start the background expired-entry purge task
/// 5. Create the Axum router with all endpoints
/// 6. Start the HTTP server on the configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "posts_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting posts caching service");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, upstream={}, cache_key={}, ttl={}s",
        config.server_port, config.upstream_url, config.cache_key, config.cache_ttl
    );

    // Construct the shared clients, reused for the process lifetime
    let store = Arc::new(MemoryStore::new());
    let upstream = Arc::new(HttpUpstream::new(
        config.upstream_url.as_str(),
        Duration::from_secs(config.upstream_timeout),
    )?);

    // Wire the cache core into the application state
    let state = AppState::new(store.clone(), upstream, &config);
    info!("Cache core initialized");

    // Start background purge task
    let purge_handle = spawn_purge_task(store, config.purge_interval);
    info!("Background purge task started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(purge_handle))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the purge task and allows graceful shutdown.
async fn shutdown_signal(purge_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the purge task
    purge_handle.abort();
    warn!("Purge task aborted");
}
