//! Recommendation and trend endpoints

use super::validate;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use litexplorer_common::{errors::Result, models::Recommendation, TrendReport};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RecommendationQuery {
    #[validate(length(min = 1))]
    pub doi: String,

    #[serde(default = "default_count")]
    #[validate(range(min = 1, max = 20))]
    pub n: usize,
}

fn default_count() -> usize {
    5
}

#[derive(Serialize)]
pub struct RecommendationResponse {
    pub doi: String,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TrendQuery {
    #[serde(default = "default_window")]
    #[validate(range(max = 100))]
    pub window_years: u32,
}

fn default_window() -> u32 {
    2
}

/// Suggestions related to a stored paper
pub async fn recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<RecommendationResponse>> {
    validate(&query)?;

    let recommendations = state.explorer.recommend(&query.doi, query.n).await?;
    Ok(Json(RecommendationResponse {
        doi: query.doi,
        recommendations,
    }))
}

/// Trend analysis over the recent window
pub async fn trends(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<TrendReport>> {
    validate(&query)?;
    Ok(Json(state.explorer.analyze_trends(query.window_years).await))
}
