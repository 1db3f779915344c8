//! Content sources: where the loader gets records from.

use crate::error::LoadError;
use crate::result::{decode_body, FetchResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A remote (or stand-in) provider of record lists.
///
/// Implementations never fail: every outcome is folded into a
/// [`FetchResult`].
#[async_trait]
pub trait ContentSource<T>: Send + Sync {
    /// Issue exactly one request for `endpoint`.
    async fn fetch(&self, endpoint: &str) -> FetchResult<T>;
}

/// JSON-over-HTTP source.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpSource {
    /// Source rooted at `base_url` with the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            client: build_client(DEFAULT_TIMEOUT),
        }
    }

    /// Replace the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.client = build_client(timeout);
        self
    }

    /// Base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for `endpoint`. Absolute endpoints are used as given.
    #[must_use]
    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Fetch and decode one endpoint.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<Option<Vec<T>>, LoadError> {
        let url = self.url_for(endpoint);
        debug!(url = %url, "fetching content");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| self.classify(&url, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| self.classify(&url, source))?;
        decode_body(&url, &body)
    }

    fn classify(&self, url: &str, source: reqwest::Error) -> LoadError {
        if source.is_timeout() {
            LoadError::Timeout {
                url: url.to_string(),
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            LoadError::Transport {
                url: url.to_string(),
                source,
            }
        }
    }
}

fn build_client(timeout: Duration) -> reqwest::Client {
    match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(err) => {
            warn!(
                error = %err,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                "http client build failed; using defaults without the request timeout"
            );
            reqwest::Client::default()
        }
    }
}

#[async_trait]
impl<T> ContentSource<T> for HttpSource
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch(&self, endpoint: &str) -> FetchResult<T> {
        FetchResult::from(self.request::<T>(endpoint).await)
    }
}

/// Source that answers every request with a fixed result.
///
/// Used offline and in tests; an optional delay stands in for latency.
#[derive(Debug, Clone)]
pub struct StaticSource<T> {
    result: FetchResult<T>,
    delay: Option<Duration>,
}

impl<T: Clone> StaticSource<T> {
    /// Always return `result`.
    #[must_use]
    pub const fn new(result: FetchResult<T>) -> Self {
        Self {
            result,
            delay: None,
        }
    }

    /// Always fail with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(FetchResult::failed(message))
    }

    /// Wait `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl<T> ContentSource<T> for StaticSource<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn fetch(&self, _endpoint: &str) -> FetchResult<T> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let source = HttpSource::new("http://api.local/api/");
        assert_eq!(source.url_for("/counters"), "http://api.local/api/counters");
        assert_eq!(source.url_for("counters/"), "http://api.local/api/counters/");
        assert_eq!(
            source.url_for("https://cdn.local/c.json"),
            "https://cdn.local/c.json"
        );
    }

    #[test]
    fn test_timeout_default_and_override() {
        let source = HttpSource::new("http://x");
        assert_eq!(source.timeout(), DEFAULT_TIMEOUT);
        let source = source.with_timeout(Duration::from_millis(250));
        assert_eq!(source.timeout(), Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_static_source_returns_fixed_result() {
        let source = StaticSource::new(FetchResult::ok(vec![1u32, 2, 3]));
        let result = source.fetch("anything").await;
        assert_eq!(result.records(), Some(&[1, 2, 3][..]));

        let source: StaticSource<u32> = StaticSource::failing("down");
        let result = source.fetch("anything").await;
        assert!(!result.success);
        assert_eq!(result.error_message.as_deref(), Some("down"));
    }
}
