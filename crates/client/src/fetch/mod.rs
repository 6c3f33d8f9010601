//! HTTP transport for page and continuation requests.
//!
//! ### Contract
//! - `GET` returns the raw response body as text (an HTML page).
//! - `POST` sends a JSON body and returns the parsed JSON response.
//! - Non-2xx statuses and network failures map to `UpstreamRequestFailed`.
//! - Bodies larger than `max_bytes` are rejected before parsing.
//!
//! No retries, caching or rate limiting happen here; a failed request is
//! reported to the caller as-is.

pub mod url;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::Value;
use std::time::{Duration, Instant};

pub use self::url::{ContentType, Endpoints, Locale, TrendingTab, UrlError};

use tubex_core::{AppConfig, Error};

/// Fetch primitive the extraction engine is written against.
///
/// This allows swapping the transport (or recording requests in tests)
/// without touching the walkers.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page and return its body text.
    async fn get_text(&self, url: &::url::Url) -> Result<String, Error>;

    /// POST a JSON body and return the parsed JSON response.
    async fn post_json(&self, url: &::url::Url, body: &Value) -> Result<Value, Error>;
}

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 10MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self { user_agent: config.user_agent.clone(), max_bytes: config.max_bytes, timeout: config.timeout() }
    }
}

/// reqwest-backed `PageFetcher`.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::UpstreamRequestFailed(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Send a prepared request and buffer the body, enforcing status and size limits.
    async fn send(&self, request: reqwest::RequestBuilder, url: &::url::Url) -> Result<Vec<u8>, Error> {
        let start = Instant::now();

        let response = request
            .send()
            .await
            .map_err(|e| Error::UpstreamRequestFailed(format!("network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamRequestFailed(format!("status {}", status.as_u16())));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::ResponseTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::UpstreamRequestFailed(format!("failed to read response: {}", e)))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::ResponseTooLarge(format!("{} bytes exceeds {}", bytes.len(), self.config.max_bytes)));
        }

        tracing::debug!("fetched {} in {}ms ({} bytes)", url, start.elapsed().as_millis(), bytes.len());

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl PageFetcher for FetchClient {
    async fn get_text(&self, url: &::url::Url) -> Result<String, Error> {
        let request = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8");

        let bytes = self.send(request, url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn post_json(&self, url: &::url::Url, body: &Value) -> Result<Value, Error> {
        let request = self
            .http
            .post(url.as_str())
            .header(header::ACCEPT, "application/json")
            .json(body);

        let bytes = self.send(request, url).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::UpstreamRequestFailed(format!("response was not JSON: {}", e)))
    }
}
