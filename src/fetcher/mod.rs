pub mod error;

use anyhow::{Context, Result};
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, error, trace};
use url::Url;

pub use error::FetchError;

// Defaults for outbound requests
const REQUEST_TIMEOUT: u64 = 8; // seconds
const MAX_REDIRECTS: usize = 5;
pub const MAX_DOWNLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Configuration for outbound page and file fetches
///
/// Every fetch is bounded by the same timeout and redirect cap. The size cap
/// only applies to file downloads; pages are read whole.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub request_timeout: Duration,
    pub max_redirects: usize,
    pub max_download_bytes: u64,
    pub user_agent: String,
    pub allowed_schemes: Vec<String>,
}

impl FetcherConfig {
    /// Creates a new fetcher configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-request timeout, covering connect through end of body
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the maximum number of redirects followed before failing
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Sets the maximum number of bytes a proxied download may carry
    pub fn with_max_download_bytes(mut self, max: u64) -> Self {
        self.max_download_bytes = max;
        self
    }

    /// Sets the user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT),
            max_redirects: MAX_REDIRECTS,
            max_download_bytes: MAX_DOWNLOAD_BYTES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
        }
    }
}

/// A downloaded file along with the response metadata the proxy needs
#[derive(Debug, Clone)]
pub struct FetchedFile {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
}

/// Shared HTTP client for page scraping and file proxying
///
/// Built once at server start; holds no per-request state.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: FetcherConfig,
}

impl Fetcher {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        debug!(
            "Initializing HTTP client: timeout={:?}, max_redirects={}, max_download_bytes={}",
            config.request_timeout, config.max_redirects, config.max_download_bytes
        );

        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent)
            .context("Failed to create User-Agent header")?;
        headers.insert(USER_AGENT, agent);

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                error!("Failed to build HTTP client: {}", e);
                e
            })
            .context("Failed to build HTTP client")?;

        Ok(Self { client, config })
    }

    /// Fetches a page and returns its body decoded as text.
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.send(url).await?;
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;
        trace!("Fetched {} bytes of HTML from {}", body.len(), url);
        Ok(body)
    }

    /// Fetches a file, failing rather than truncating once the size cap is exceeded.
    pub async fn fetch_file(&self, url: &str) -> Result<FetchedFile, FetchError> {
        let limit = self.config.max_download_bytes;
        let response = self.send(url).await?;

        if let Some(declared) = response.content_length() {
            if declared > limit {
                debug!("Declared Content-Length {} exceeds limit {} for {}", declared, limit, url);
                return Err(FetchError::TooLarge { url: url.to_string(), limit });
            }
        }

        let content_type = header_string(&response, CONTENT_TYPE);
        let content_disposition = header_string(&response, CONTENT_DISPOSITION);

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| FetchError::from_reqwest(url, e))?;
            if (bytes.len() + chunk.len()) as u64 > limit {
                debug!("Streamed body of {} exceeded limit {}", url, limit);
                return Err(FetchError::TooLarge { url: url.to_string(), limit });
            }
            bytes.extend_from_slice(&chunk);
        }

        debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(FetchedFile {
            bytes,
            content_type,
            content_disposition,
        })
    }

    async fn send(&self, url: &str) -> Result<Response, FetchError> {
        let target = self.validate(url)?;

        debug!("Sending request to {}", url);
        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        trace!("Response status {} from {}", status, url);
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }
        Ok(response)
    }

    fn validate(&self, url: &str) -> Result<Url, FetchError> {
        let invalid = || FetchError::InvalidUrl { url: url.to_string() };
        let parsed = Url::parse(url).map_err(|_| invalid())?;
        if !self.config.allowed_schemes.iter().any(|s| s == parsed.scheme()) {
            return Err(invalid());
        }
        Ok(parsed)
    }
}

fn header_string(response: &Response, name: reqwest::header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
