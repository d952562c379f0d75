//! Response models for the caching service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing HTTP response bodies. The service's operations take no
//! request bodies, so there are no request DTOs.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, HealthResponse, InvalidateResponse, StatsResponse};
