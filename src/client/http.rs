//! HTTP fetcher backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::{Fetch, FetchError, Result};
use crate::config::ClientConfig;

/// Fetches resources from a remote roster server.
///
/// # Example
///
/// ```rust,no_run
/// use team_roster::client::{Fetch, HttpFetcher};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpFetcher::new("http://127.0.0.1:8081")?;
/// let members = fetcher.get_json("/members").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpFetcher {
    /// Create a new fetcher with a default client.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a fetcher whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, http)
    }

    /// Create a fetcher from the `client` config section: its base URL and
    /// request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::with_timeout(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Create a new fetcher with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self { base_url, http })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.base_url.join(path)?;
        tracing::debug!(url = %url, "GET resource");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
