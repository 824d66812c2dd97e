//! Extraction client

use super::truncate_chars;
use crate::llm::ResearchModel;
use crate::models::ExtractedFields;
use std::sync::Arc;
use tracing::warn;

pub struct ExtractionClient {
    model: Arc<dyn ResearchModel>,
    max_chars: usize,
}

impl ExtractionClient {
    pub fn new(model: Arc<dyn ResearchModel>, max_chars: usize) -> Self {
        Self { model, max_chars }
    }

    /// Structured fields for `text`, sent as a bounded prefix.
    ///
    /// An empty result means extraction was unavailable, not that the paper
    /// has no fields.
    pub async fn extract(&self, text: &str) -> ExtractedFields {
        let excerpt = truncate_chars(text, self.max_chars);

        match self.model.extract(excerpt).await {
            Ok(fields) => fields,
            Err(e) => {
                warn!(error = %e, chars = excerpt.chars().count(), "Extraction unavailable");
                ExtractedFields::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockModel;

    #[tokio::test]
    async fn test_text_is_truncated_before_sending() {
        let model = Arc::new(MockModel::unavailable().with_extraction(ExtractedFields {
            title: Some("T".into()),
            ..Default::default()
        }));
        let client = ExtractionClient::new(model.clone(), 10);

        let fields = client.extract(&"x".repeat(50)).await;

        assert_eq!(fields.title.as_deref(), Some("T"));
        assert_eq!(model.last_input().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_failure_yields_empty_fields() {
        let client = ExtractionClient::new(Arc::new(MockModel::unavailable()), 3000);
        assert!(client.extract("some text").await.is_empty());
    }
}
