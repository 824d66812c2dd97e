//! Explorer facade: the inbound API shared by the gateway and the CLI

use super::{
    placeholder_record, ExtractionClient, IngestionPipeline, RecommendationQuerier, SearchClient,
    TrendQuerier,
};
use crate::citations::CitationGraph;
use crate::config::{AppConfig, IngestionConfig};
use crate::db::PaperRepository;
use crate::errors::{ErrorCode, Result};
use crate::llm::{create_model, ResearchModel};
use crate::metrics;
use crate::models::{IngestOutcome, PaperRecord, RawPaper, Recommendation, TrendReport};
use std::sync::Arc;
use tracing::{info, warn};

/// Entry point for every catalog operation
pub struct Explorer {
    repository: PaperRepository,
    pipeline: IngestionPipeline,
    recommender: RecommendationQuerier,
    trends: TrendQuerier,
    model_name: String,
}

impl Explorer {
    /// Wire the services around an opened repository and a model
    pub fn new(
        repository: PaperRepository,
        model: Arc<dyn ResearchModel>,
        config: &IngestionConfig,
    ) -> Self {
        let pipeline = IngestionPipeline::new(
            SearchClient::new(model.clone()),
            ExtractionClient::new(model.clone(), config.extract_max_chars),
            repository.clone(),
            config.search_limit,
        );

        Self {
            recommender: RecommendationQuerier::new(
                repository.clone(),
                model.clone(),
                config.recommend_max_chars,
            ),
            trends: TrendQuerier::new(repository.clone(), model.clone(), config.trend_max_chars),
            model_name: model.model_name().to_string(),
            repository,
            pipeline,
        }
    }

    /// Open the store and build the model from configuration
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let repository = PaperRepository::open(&config.database).await?;
        let model = create_model(&config.model)?;
        info!(model = model.model_name(), "Explorer ready");
        Ok(Self::new(repository, model, &config.ingestion))
    }

    pub fn repository(&self) -> &PaperRepository {
        &self.repository
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Every stored paper
    pub async fn load_all(&self) -> Result<Vec<PaperRecord>> {
        self.repository.load_all().await
    }

    /// Store a caller-supplied paper
    pub async fn ingest(&self, raw: &RawPaper) -> IngestOutcome {
        self.pipeline.ingest(raw).await
    }

    /// Discover and store a paper for `query`.
    ///
    /// Falls back to a placeholder record when the pipeline fails, so the
    /// outcome is only an error for a blank query or when the store itself
    /// rejects the write.
    pub async fn fetch_and_ingest(&self, query: &str) -> IngestOutcome {
        if query.trim().is_empty() {
            warn!("Blank discovery query rejected");
            return IngestOutcome::failure(ErrorCode::ValidationError, "Query must not be blank");
        }

        let outcome = self.pipeline.run(query).await;
        if outcome.is_success() {
            return outcome;
        }

        warn!(query, "Pipeline failed, storing placeholder");
        let placeholder = placeholder_record(query);
        let outcome = self.repository.upsert(&placeholder).await;
        metrics::record_ingestion("fallback", outcome.is_success());
        outcome
    }

    pub async fn recommend(&self, doi: &str, n: usize) -> Result<Vec<Recommendation>> {
        self.recommender.recommend(doi, n).await
    }

    pub async fn analyze_trends(&self, window_years: u32) -> TrendReport {
        self.trends.analyze_trends(window_years).await
    }

    /// Citation graph over the current contents of the store
    pub async fn citation_graph(&self) -> Result<CitationGraph> {
        let papers = self.repository.load_all().await?;
        Ok(CitationGraph::from_records(&papers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::temp_repository;
    use crate::llm::MockModel;
    use crate::DEMO_SOURCE;

    fn explorer(repository: PaperRepository, model: Arc<dyn ResearchModel>) -> Explorer {
        Explorer::new(repository, model, &IngestionConfig::default())
    }

    #[tokio::test]
    async fn test_fetch_and_ingest_falls_back_to_placeholder() {
        let repository = temp_repository().await;
        let explorer = explorer(repository.clone(), Arc::new(MockModel::unavailable()));

        let outcome = explorer.fetch_and_ingest("Topic X").await;
        assert!(outcome.is_success());

        let stored = explorer.load_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].source, DEMO_SOURCE);
        assert!(stored[0].title.contains("Topic X"));
    }

    #[tokio::test]
    async fn test_short_query_never_reaches_model() {
        let repository = temp_repository().await;
        let model = Arc::new(MockModel::unavailable());
        let explorer = explorer(repository, model.clone());

        let outcome = explorer.fetch_and_ingest("a").await;

        assert!(outcome.is_success());
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_query_stores_nothing() {
        let repository = temp_repository().await;
        let model = Arc::new(MockModel::unavailable());
        let explorer = explorer(repository, model.clone());

        let outcome = explorer.fetch_and_ingest("   ").await;

        assert!(matches!(
            outcome,
            IngestOutcome::Error {
                code: Some(ErrorCode::ValidationError),
                ..
            }
        ));
        assert_eq!(model.call_count(), 0);
        assert!(explorer.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_citing_paper_does_not_create_target() {
        let repository = temp_repository().await;
        let explorer = explorer(repository, Arc::new(MockModel::unavailable()));

        explorer
            .ingest(&RawPaper {
                doi: Some("A".into()),
                title: Some("Paper A".into()),
                citations: Some(vec!["B".into()]),
                ..Default::default()
            })
            .await;
        explorer
            .ingest(&RawPaper {
                doi: Some("B".into()),
                title: Some("Paper B".into()),
                ..Default::default()
            })
            .await;

        let mut stored = explorer.load_all().await.unwrap();
        stored.sort_by(|a, b| a.doi.cmp(&b.doi));
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].citations, vec!["B"]);

        let graph = explorer.citation_graph().await.unwrap();
        assert_eq!(graph.cited_by("B"), vec!["A"]);
        assert!(graph.dangling().is_empty());
    }

    #[tokio::test]
    async fn test_trends_on_empty_store() {
        let repository = temp_repository().await;
        let explorer = explorer(repository, Arc::new(MockModel::unavailable()));

        assert_eq!(explorer.analyze_trends(2).await, TrendReport::insufficient_data());
    }

    #[tokio::test]
    async fn test_from_config_without_key_uses_mock() {
        let mut config = AppConfig::default();
        config.database = crate::db::testing::temp_database_config();
        config.model.api_key = None;

        let explorer = Explorer::from_config(&config).await.unwrap();
        assert_eq!(explorer.model_name(), "mock");
        assert!(explorer.repository().ping().await.is_ok());
    }
}
