//! Query-driven discovery

use super::{papers::outcome_response, validate};
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use litexplorer_common::{errors::Result, IngestOutcome};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct DiscoverRequest {
    #[validate(length(min = 1, max = 500))]
    pub query: String,
}

/// Search, extract, and store one paper; falls back to a placeholder
pub async fn discover(
    State(state): State<AppState>,
    Json(request): Json<DiscoverRequest>,
) -> Result<(StatusCode, Json<IngestOutcome>)> {
    validate(&request)?;

    info!(query = %request.query, "Discovery requested");
    let outcome = state.explorer.fetch_and_ingest(&request.query).await;
    outcome_response(outcome)
}
