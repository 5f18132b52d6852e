use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::api::models::ErrorResponse;
use crate::fetcher::FetchError;

pub const MISSING_URL: &str = "URL is required";
pub const DOWNLOAD_TIMEOUT: &str = "Download timeout - file too large or slow server";
pub const DOWNLOAD_FAILED: &str = "Failed to download file";

/// Errors surfaced by the HTTP endpoints
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required request field is missing
    #[error("{0}")]
    Validation(String),

    /// The upstream did not answer within the time budget
    #[error("{}", DOWNLOAD_TIMEOUT)]
    Timeout { url: Option<String> },

    /// The upstream answered with an error status, mirrored to the client
    #[error("HTTP {status}: {reason}")]
    Upstream {
        status: u16,
        reason: String,
        url: Option<String>,
    },

    /// Anything else
    #[error("{message}")]
    Unhandled { message: String, url: Option<String> },
}

impl ApiError {
    pub fn missing_url() -> Self {
        ApiError::Validation(MISSING_URL.to_string())
    }

    pub fn unhandled(message: impl Into<String>) -> Self {
        ApiError::Unhandled {
            message: message.into(),
            url: None,
        }
    }

    /// Maps a failed download onto the proxy's status codes.
    pub fn from_download(err: FetchError) -> Self {
        let url = Some(err.url().to_string());
        match err {
            FetchError::Timeout { .. } => ApiError::Timeout { url },
            FetchError::Status { status, reason, .. } => ApiError::Upstream { status, reason, url },
            _ => ApiError::Unhandled {
                message: DOWNLOAD_FAILED.to_string(),
                url,
            },
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ApiError::Validation(_) => None,
            ApiError::Timeout { url }
            | ApiError::Upstream { url, .. }
            | ApiError::Unhandled { url, .. } => url.as_deref(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Unhandled { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            url: self.url().map(str::to_string),
        })
    }
}
