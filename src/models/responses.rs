//! Response DTOs for the caching service API
//!
//! Defines the structure of outgoing HTTP response bodies. The read
//! endpoint serves the cached payload bytes directly and has no DTO here.

use serde::Serialize;

/// Response body for the invalidate operation (DELETE /api/cache)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Success message
    pub message: String,
}

impl InvalidateResponse {
    /// Creates a new InvalidateResponse
    pub fn new() -> Self {
        Self {
            message: "Cache cleared successfully".to_string(),
        }
    }
}

impl Default for InvalidateResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of reads served from the store
    pub hits: u64,
    /// Number of reads that fetched upstream inline
    pub misses: u64,
    /// Number of successful background revalidations
    pub revalidations: u64,
    /// Number of failed background revalidations
    pub failed_revalidations: u64,
    /// Number of explicit invalidations
    pub invalidations: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache counters
    pub fn new(
        hits: u64,
        misses: u64,
        revalidations: u64,
        failed_revalidations: u64,
        invalidations: u64,
    ) -> Self {
        let total_reads = hits + misses;
        let hit_rate = if total_reads > 0 {
            hits as f64 / total_reads as f64
        } else {
            0.0
        };
        Self {
            hits,
            misses,
            revalidations,
            failed_revalidations,
            invalidations,
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
