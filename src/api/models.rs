use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::api::error::ApiError;
use crate::link_scraper::pagination::DEFAULT_PAGE_RANGE;
use crate::link_scraper::{
    build_extension_filter, LinkRecord, PaginationMode, ScrapeParams, ScrapeSummary,
};

/// Request body of the scrape endpoint
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ScrapeRequest {
    /// Page to scrape, required
    pub url: Option<String>,

    /// `single` (default) or `manual`
    pub pagination_mode: Option<PaginationMode>,

    /// Optional extension filter, e.g. `[".pdf", "DOCX"]`
    pub extensions: Option<Vec<String>>,

    /// Template with a `{page}` placeholder, manual mode only
    pub url_pattern: Option<String>,

    /// Page range such as `1,3-5`, manual mode only
    pub page_range: Option<String>,
}

impl ScrapeRequest {
    /// Applies defaults and validates the required URL.
    pub fn into_params(self) -> Result<ScrapeParams, ApiError> {
        let url = non_empty(self.url).ok_or_else(ApiError::missing_url)?;
        let filter = build_extension_filter(self.extensions.as_deref().unwrap_or_default());
        let url_pattern = non_empty(self.url_pattern).unwrap_or_else(|| url.clone());
        let page_range =
            non_empty(self.page_range).unwrap_or_else(|| DEFAULT_PAGE_RANGE.to_string());

        Ok(ScrapeParams {
            url,
            mode: self.pagination_mode.unwrap_or_default(),
            filter,
            url_pattern,
            page_range,
        })
    }
}

/// Successful scrape response
#[derive(Debug, Serialize, Clone)]
pub struct ScrapeResponse {
    pub success: bool,
    pub links: Vec<LinkRecord>,
    pub count: usize,
    pub statistics: BTreeMap<String, usize>,
}

impl From<ScrapeSummary> for ScrapeResponse {
    fn from(summary: ScrapeSummary) -> Self {
        Self {
            success: true,
            links: summary.links,
            count: summary.count,
            statistics: summary.statistics,
        }
    }
}

/// Request body of the download proxy endpoint
#[derive(Debug, Default, Deserialize, Clone)]
pub struct DownloadRequest {
    pub url: Option<String>,
}

impl DownloadRequest {
    pub fn target(self) -> Result<String, ApiError> {
        non_empty(self.url).ok_or_else(ApiError::missing_url)
    }
}

/// Health status response for the /health endpoint
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub uptime_secs: u64,
    pub version: String,
}

/// Error body shared by both endpoints
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,

    /// Target URL of a failed download, when known
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
}

/// Parses a JSON request body; an empty body counts as `{}`.
pub fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::unhandled(format!("Invalid JSON body: {}", e)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_request_defaults() {
        let request: ScrapeRequest =
            parse_body(br#"{"url": "https://example.com/docs"}"#).unwrap();
        let params = request.into_params().unwrap();
        assert_eq!(params.url, "https://example.com/docs");
        assert_eq!(params.mode, PaginationMode::Single);
        assert!(params.filter.is_none());
        assert_eq!(params.url_pattern, "https://example.com/docs");
        assert_eq!(params.page_range, "1");
    }

    #[test]
    fn test_scrape_request_manual() {
        let request: ScrapeRequest = parse_body(
            br#"{
                "url": "https://example.com/docs",
                "pagination_mode": "manual",
                "extensions": [".PDF", "zip"],
                "url_pattern": "https://example.com/docs?p={page}",
                "page_range": "2-4"
            }"#,
        )
        .unwrap();
        let params = request.into_params().unwrap();
        assert_eq!(params.mode, PaginationMode::Manual);
        let filter = params.filter.unwrap();
        assert!(filter.contains("pdf") && filter.contains("zip"));
        assert_eq!(params.url_pattern, "https://example.com/docs?p={page}");
        assert_eq!(params.page_range, "2-4");
    }

    #[test]
    fn test_missing_or_empty_url() {
        let empty: ScrapeRequest = parse_body(b"").unwrap();
        assert!(matches!(empty.into_params(), Err(ApiError::Validation(_))));

        let blank: ScrapeRequest = parse_body(br#"{"url": ""}"#).unwrap();
        assert!(matches!(blank.into_params(), Err(ApiError::Validation(_))));

        let null: DownloadRequest = parse_body(br#"{"url": null}"#).unwrap();
        assert!(matches!(null.target(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_invalid_json_is_unhandled() {
        let result: Result<ScrapeRequest, _> = parse_body(b"{not json");
        assert!(matches!(result, Err(ApiError::Unhandled { .. })));
    }

    #[test]
    fn test_error_response_omits_missing_url() {
        let body = serde_json::to_value(ErrorResponse {
            error: "URL is required".to_string(),
            url: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"error": "URL is required"}));
    }
}
