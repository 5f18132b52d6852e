pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, App, HttpServer};
use anyhow::Result;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

use crate::api::config::ApiConfig;
use crate::api::handlers::{download_handler, health_check, preflight, scrape_handler};
use crate::fetcher::Fetcher;

/// Shared, read-only state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub fetcher: Fetcher,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            started_at: Instant::now(),
        }
    }
}

/// Permissive CORS headers attached to every response
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
        .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
}

/// Registers the scrape, download proxy and health routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/scrape")
            .route(web::post().to(scrape_handler))
            .route(web::method(Method::OPTIONS).to(preflight)),
    )
    .service(
        web::resource("/download-proxy")
            .route(web::post().to(download_handler))
            .route(web::method(Method::OPTIONS).to(preflight)),
    )
    .service(web::resource("/health").route(web::get().to(health_check)));
}

/// Starts the API server with the specified configuration
///
/// Builds the shared HTTP client once and serves until shutdown.
///
/// # Arguments
/// * `host` - Host address to bind to (e.g., "127.0.0.1")
/// * `port` - Port to listen on
/// * `config` - Optional API configuration (uses defaults if None)
#[instrument(skip(config))]
pub async fn start_server(host: &str, port: u16, config: Option<ApiConfig>) -> Result<()> {
    info!("Starting link harvest API server on {}:{}", host, port);

    let config = config.unwrap_or_else(|| {
        debug!("Using default API configuration");
        ApiConfig::default()
    });

    let fetcher = Fetcher::new(config.fetcher_config()).map_err(|e| {
        error!("Failed to initialize fetcher: {:#}", e);
        e
    })?;
    let state = web::Data::new(AppState::new(fetcher));

    let server_result = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors_headers())
            .configure(configure_routes)
    })
    .bind((host, port))
    .map_err(|e| {
        error!("Failed to bind to {}:{}: {}", host, port, e);
        e
    })?
    .run()
    .await;

    if let Err(e) = server_result {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
