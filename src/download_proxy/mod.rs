//! Server-side file download proxy.

pub mod filename;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Serialize;
use tracing::{info, instrument};

use crate::fetcher::{FetchError, Fetcher};
pub use filename::infer_filename;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A proxied file ready for the response framing layer
///
/// The body travels base64-encoded; `is_base64_encoded` tells the framing
/// layer to decode it before writing raw bytes to the client.
#[derive(Debug, Clone, Serialize)]
pub struct ProxiedFile {
    pub filename: String,
    pub content_type: String,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ProxiedFile {
    /// Returns the raw bytes the client should receive.
    pub fn decode_body(&self) -> Result<Vec<u8>> {
        if self.is_base64_encoded {
            BASE64
                .decode(self.body.as_bytes())
                .context("Proxied body is not valid base64")
        } else {
            Ok(self.body.clone().into_bytes())
        }
    }
}

/// Downloads a single remote file within the fetcher's time and size limits.
#[instrument(skip(fetcher))]
pub async fn proxy_download(fetcher: &Fetcher, url: &str) -> Result<ProxiedFile, FetchError> {
    let fetched = fetcher.fetch_file(url).await?;

    let filename = infer_filename(url, fetched.content_disposition.as_deref());
    let content_type = fetched
        .content_type
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    info!(
        "Proxied {} ({} bytes, {}) as {}",
        url,
        fetched.bytes.len(),
        content_type,
        filename
    );

    Ok(ProxiedFile {
        filename,
        content_type,
        body: BASE64.encode(&fetched.bytes),
        is_base64_encoded: true,
    })
}
