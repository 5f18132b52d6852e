use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::api::error::{ApiError, DOWNLOAD_FAILED};
use crate::api::models::{
    parse_body, DownloadRequest, HealthStatus, ScrapeRequest, ScrapeResponse,
};
use crate::api::AppState;
use crate::download_proxy::proxy_download;
use crate::link_scraper::run_scrape;

/// HTTP handler for scrape requests
///
/// Scrapes one page, or a templated range of pages in manual mode, and
/// returns the unique downloadable links with per-extension counts.
#[instrument(skip(state, body), fields(request_id = %Uuid::new_v4()))]
pub async fn scrape_handler(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let request: ScrapeRequest = parse_body(&body)?;
    let params = request.into_params()?;
    info!("Received scrape request for URL: {} ({:?})", params.url, params.mode);

    let summary = run_scrape(&state.fetcher, &params).await.map_err(|e| {
        error!("Scrape request failed: {:#}", e);
        ApiError::unhandled(format!("{:#}", e))
    })?;

    debug!("Returning {} links", summary.count);
    Ok(HttpResponse::Ok().json(ScrapeResponse::from(summary)))
}

/// HTTP handler for proxied downloads
///
/// Fetches the file server-side and relays its bytes with the upstream
/// content type and a suggested filename.
#[instrument(skip(state, body), fields(request_id = %Uuid::new_v4()))]
pub async fn download_handler(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let request: DownloadRequest = parse_body(&body).map_err(|e| {
        error!("Rejected download request body: {}", e);
        ApiError::unhandled(DOWNLOAD_FAILED)
    })?;
    let url = request.target()?;
    info!("Received download request for URL: {}", url);

    let file = proxy_download(&state.fetcher, &url).await.map_err(|e| {
        error!("Download error: {}", e);
        ApiError::from_download(e)
    })?;

    let bytes = file.decode_body().map_err(|e| {
        error!("Failed to decode proxied body for {}: {:#}", url, e);
        ApiError::Unhandled {
            message: DOWNLOAD_FAILED.to_string(),
            url: Some(url.clone()),
        }
    })?;

    Ok(HttpResponse::Ok()
        .content_type(file.content_type.as_str())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file.filename)],
        })
        .body(bytes))
}

/// CORS preflight; the CORS headers themselves come from the app middleware.
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Health check endpoint for monitoring service status
#[instrument(skip(state))]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let uptime = state.started_at.elapsed();
    debug!("Health check: uptime={:?}", uptime);
    HttpResponse::Ok().json(HealthStatus {
        status: "healthy".to_string(),
        uptime_secs: uptime.as_secs(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
