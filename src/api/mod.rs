//! API Module
//!
//! HTTP handlers and routing for the caching service REST API.
//!
//! # Endpoints
//! - `GET /api/posts` - Serve the cached collection (filling on miss)
//! - `DELETE /api/cache` - Clear the cached collection
//! - `GET /stats` - Get cache behavior counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
