//! Search client

use crate::llm::ResearchModel;
use crate::models::SearchCandidate;
use std::sync::Arc;
use tracing::{debug, warn};

/// Queries shorter than this (after trimming) never reach the model
pub const MIN_QUERY_CHARS: usize = 2;

pub struct SearchClient {
    model: Arc<dyn ResearchModel>,
}

impl SearchClient {
    pub fn new(model: Arc<dyn ResearchModel>) -> Self {
        Self { model }
    }

    /// Up to `limit` candidates, or an empty list on a short query or any
    /// model failure.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<SearchCandidate> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            debug!(query, "Query too short, skipping search");
            return Vec::new();
        }

        match self.model.search(query, limit).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(query, error = %e, "Search unavailable");
                Vec::new()
            }
        }
    }
}
