//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use jarchive::{Fetcher, HttpFetcher, Sampler};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes::{category_handler, clue_handler, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sampler: Arc<Sampler>,
}

impl AppState {
    pub fn new(sampler: Sampler) -> Self {
        Self {
            sampler: Arc::new(sampler),
        }
    }
}

/// Build the sampler against the live archive described by `config`.
pub fn build_sampler(config: &Config) -> jarchive::FetchResult<Sampler> {
    let fetcher = HttpFetcher::new(&config.archive_base_url)?
        .with_user_agent(config.archive_user_agent.clone())
        .with_timeout(config.fetch_timeout)?;
    let fetcher: Arc<dyn Fetcher> = Arc::new(fetcher);

    Ok(Sampler::new(fetcher, config.sampler_config()))
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - allow any origin, read-only API
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/", get(clue_handler))
        .route("/category", get(category_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
