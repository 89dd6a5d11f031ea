use axum::{extract::Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_known_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_refresh: Option<DateTime<Utc>>,
    banned_games: usize,
}

/// Health check endpoint
///
/// Reports the game index without touching the archive. `max_known_id` and
/// `last_refresh` are absent until the first sample has refreshed the index.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    let stats = state.sampler.index().stats();

    Json(HealthResponse {
        status: "ok".to_string(),
        max_known_id: stats.max_known_id,
        last_refresh: stats.last_refresh,
        banned_games: stats.banned_games,
    })
}
