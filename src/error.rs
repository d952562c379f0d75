//! Error types for the caching service
//!
//! Provides unified error handling using thiserror. Each failure domain
//! (key-value store, upstream fetch, payload codec) has its own error kind
//! so callers can tell "store unavailable" apart from "upstream unavailable".

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

// == Store Error ==
/// Failure against the external key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached or the operation failed
    #[error("key-value store unavailable: {0}")]
    Unavailable(String),
}

// == Fetch Error ==
/// Failure fetching from the upstream data source.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network-level failure (connect, timeout, malformed response)
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
}

// == Codec Error ==
/// A cached payload that could not be interpreted.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The stored bytes are not well-formed JSON
    #[error("malformed cached payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

// == Cache Error Enum ==
/// Unified error type for the caching service.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key-value store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Upstream fetch failure
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Cached payload could not be decoded
    #[error(transparent)]
    Codec(#[from] CodecError),
}

// == IntoResponse Implementation ==
/// Every unrecoverable synchronous failure yields the same generic outcome.
/// The underlying cause is logged but never leaks to the caller.
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");

        let body = Json(json!({
            "error": "Internal Server Error"
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the caching service.
pub type Result<T> = std::result::Result<T, CacheError>;
