//! Errors raised while fetching pages or files from upstream servers.

use thiserror::Error;

/// Failure of a single outbound fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The target could not be parsed as an absolute http(s) URL
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// The upstream exceeded the request time budget
    #[error("timeout fetching {url}")]
    Timeout { url: String },

    /// The upstream answered with a non-success status
    #[error("HTTP {status}: {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    /// The response body is larger than the configured cap
    #[error("response from {url} exceeds the {limit} byte limit")]
    TooLarge { url: String, limit: u64 },

    /// Connection, TLS, redirect or body decoding failure
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Classifies a transport error, separating timeouts from everything else.
    pub fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            FetchError::Timeout { url: url.to_string() }
        } else {
            FetchError::Network {
                url: url.to_string(),
                source,
            }
        }
    }

    /// The URL the failing fetch targeted.
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url }
            | FetchError::Timeout { url }
            | FetchError::Status { url, .. }
            | FetchError::TooLarge { url, .. }
            | FetchError::Network { url, .. } => url,
        }
    }
}
