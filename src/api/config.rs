use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::fetcher::{FetcherConfig, DEFAULT_USER_AGENT, MAX_DOWNLOAD_BYTES};

/// Configuration for the API server
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Directory for log files; logs go to stdout when unset
    pub log_dir: Option<PathBuf>,

    /// Timeout for each outbound page or file fetch, in seconds
    pub fetch_timeout_secs: u64,

    /// Redirects followed before a fetch fails
    pub max_redirects: usize,

    /// Largest file the download proxy will relay
    pub max_download_bytes: u64,

    /// User agent sent upstream
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_dir: None,
            fetch_timeout_secs: 8,
            max_redirects: 5,
            max_download_bytes: MAX_DOWNLOAD_BYTES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads defaults overlaid with an optional TOML file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig::new()
            .with_request_timeout(Duration::from_secs(self.fetch_timeout_secs))
            .with_max_redirects(self.max_redirects)
            .with_max_download_bytes(self.max_download_bytes)
            .with_user_agent(self.user_agent.clone())
    }
}
