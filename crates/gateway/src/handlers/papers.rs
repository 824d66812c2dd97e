//! Paper listing and direct ingestion

use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use litexplorer_common::{
    errors::{AppError, ErrorCode, Result},
    IngestOutcome, PaperRecord, RawPaper,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct PaperListResponse {
    pub count: usize,
    pub papers: Vec<PaperRecord>,
}

/// Every stored paper
pub async fn list_papers(State(state): State<AppState>) -> Result<Json<PaperListResponse>> {
    let papers = state.explorer.load_all().await?;
    Ok(Json(PaperListResponse {
        count: papers.len(),
        papers,
    }))
}

/// Normalize and store a paper payload
pub async fn ingest_paper(
    State(state): State<AppState>,
    Json(raw): Json<RawPaper>,
) -> Result<(StatusCode, Json<IngestOutcome>)> {
    let outcome = state.explorer.ingest(&raw).await;
    outcome_response(outcome)
}

/// 201 with the outcome on success; a failure maps to the error it carries
pub(crate) fn outcome_response(outcome: IngestOutcome) -> Result<(StatusCode, Json<IngestOutcome>)> {
    match outcome {
        IngestOutcome::Success { .. } => Ok((StatusCode::CREATED, Json(outcome))),
        IngestOutcome::Error { message, code } => Err(match code {
            Some(ErrorCode::ValidationError) => AppError::Validation {
                message,
                field: Some("query".to_string()),
            },
            Some(ErrorCode::StoreUnavailable) => AppError::StoreUnavailable { message },
            _ => AppError::Internal { message },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(outcome: IngestOutcome) -> StatusCode {
        outcome_response(outcome).unwrap_err().status_code()
    }

    #[test]
    fn test_outcome_status_follows_error_code() {
        assert_eq!(
            status_of(IngestOutcome::failure(ErrorCode::DatabaseError, "disk I/O error")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(IngestOutcome::failure(ErrorCode::StoreUnavailable, "cannot open")),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(IngestOutcome::failure(ErrorCode::ValidationError, "blank")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(IngestOutcome::error("untagged")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_success_is_created() {
        let (status, _) = outcome_response(IngestOutcome::Success {
            doi: "10.1/a".into(),
            title: "A".into(),
        })
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
    }
}
