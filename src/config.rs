//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// URL of the upstream data source
    pub upstream_url: String,
    /// Request timeout for upstream fetches, in seconds
    pub upstream_timeout: u64,
    /// Logical key the cached collection is stored under
    pub cache_key: String,
    /// TTL in seconds attached to every cache write
    pub cache_ttl: u64,
    /// Interval in seconds between expired-entry purge runs
    pub purge_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_URL` - Upstream data source URL
    ///   (default: https://jsonplaceholder.typicode.com/posts)
    /// - `UPSTREAM_TIMEOUT` - Upstream request timeout in seconds (default: 10)
    /// - `CACHE_KEY` - Store key for the cached collection (default: "posts")
    /// - `CACHE_TTL` - TTL in seconds for cache writes (default: 3600)
    /// - `PURGE_INTERVAL` - Purge frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            upstream_url: env::var("UPSTREAM_URL")
                .unwrap_or_else(|_| "https://jsonplaceholder.typicode.com/posts".to_string()),
            upstream_timeout: env::var("UPSTREAM_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            cache_key: env::var("CACHE_KEY").unwrap_or_else(|_| "posts".to_string()),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            purge_interval: env::var("PURGE_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            upstream_url: "https://jsonplaceholder.typicode.com/posts".to_string(),
            upstream_timeout: 10,
            cache_key: "posts".to_string(),
            cache_ttl: 3600,
            purge_interval: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.upstream_url, "https://jsonplaceholder.typicode.com/posts");
        assert_eq!(config.upstream_timeout, 10);
        assert_eq!(config.cache_key, "posts");
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.purge_interval, 60);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("API_PORT");
        env::remove_var("UPSTREAM_URL");
        env::remove_var("UPSTREAM_TIMEOUT");
        env::remove_var("CACHE_KEY");
        env::remove_var("CACHE_TTL");
        env::remove_var("PURGE_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_key, "posts");
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.purge_interval, 60);
    }
}
