//! Upstream Data Source
//!
//! The upstream fetch collaborator: a single read-only call to an external
//! HTTP endpoint returning a JSON payload. The cache core depends only on
//! the [`UpstreamClient`] contract; the HTTP binding lives here.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::FetchError;

// == Upstream Contract ==
/// Opaque fetch operation against the upstream data source.
#[async_trait]
pub trait UpstreamClient: Send + Sync + 'static {
    /// Fetches the current upstream payload as raw JSON bytes.
    ///
    /// Network failures, timeouts, and non-2xx responses all surface as
    /// [`FetchError`].
    async fn fetch(&self) -> Result<Vec<u8>, FetchError>;
}

// == HTTP Upstream ==
/// Reqwest-backed [`UpstreamClient`] with a fixed URL and request timeout.
///
/// The inner client is connection-pooled and reused for the process
/// lifetime; construct once at startup and share behind `Arc`.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    url: String,
}

impl HttpUpstream {
    /// Creates a client for the given endpoint.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstream {
    async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        debug!(url = %self.url, "fetching upstream payload");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_upstream_construction() {
        let upstream = HttpUpstream::new(
            "https://jsonplaceholder.typicode.com/posts",
            Duration::from_secs(10),
        );
        assert!(upstream.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_error_on_unreachable_host() {
        // Reserved TEST-NET-1 address; the connect attempt fails fast
        let upstream =
            HttpUpstream::new("http://192.0.2.1/posts", Duration::from_millis(200)).unwrap();

        let result = upstream.fetch().await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
