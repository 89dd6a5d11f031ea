use axum::{
    extract::{Extension, Query},
    Json,
};
use jarchive::{Category, Clue, Round, Sampled};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClueResponse {
    pub category: String,
    pub value: u32,
    pub round: String,
    pub question: String,
    pub answer: String,
    pub date: String,
    pub game_id: u32,
}

impl From<Sampled<Clue>> for ClueResponse {
    fn from(sampled: Sampled<Clue>) -> Self {
        let clue = sampled.record;
        Self {
            value: clue.displayed_value(),
            round: clue.round().label().to_string(),
            category: clue.category,
            question: clue.question,
            answer: clue.answer,
            date: sampled.date,
            game_id: sampled.game_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryResponse {
    pub category: String,
    pub round: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub date: String,
    pub game_id: u32,
}

impl From<Sampled<Category>> for CategoryResponse {
    fn from(sampled: Sampled<Category>) -> Self {
        let category = sampled.record;
        Self {
            round: category.round.label().to_string(),
            questions: category.questions(),
            answers: category.answers(),
            category: category.name,
            date: sampled.date,
            game_id: sampled.game_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    /// Kept as text so a bad value becomes our own 400 body
    round: Option<String>,
}

impl CategoryParams {
    fn round(&self) -> Result<Option<Round>, ApiError> {
        let Some(raw) = self.round.as_deref() else {
            return Ok(None);
        };

        raw.trim()
            .parse::<u8>()
            .ok()
            .and_then(Round::from_number)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("round must be 1 or 2, got {:?}", raw)))
    }
}

/// A single random clue
pub async fn clue_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<ClueResponse>, ApiError> {
    let sampled = state.sampler.sample_clue().await?;
    Ok(Json(sampled.into()))
}

/// A whole random category, from the requested round or a random one
pub async fn category_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let round = match params.round()? {
        Some(round) => round,
        None => state.sampler.random_round(),
    };

    let sampled = state.sampler.sample_category(round).await?;
    Ok(Json(sampled.into()))
}
