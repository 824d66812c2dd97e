//! Ingestion pipeline
//!
//! search -> first candidate -> extract -> normalize -> upsert, one attempt
//! per stage. The placeholder fallback lives in the `Explorer` so callers
//! that want the raw pipeline outcome can still get it.

use super::{ExtractionClient, SearchClient};
use crate::db::PaperRepository;
use crate::metrics;
use crate::models::{ExtractedFields, IngestOutcome, PaperRecord, RawPaper, SearchCandidate};
use crate::normalize::normalize;
use crate::DEMO_SOURCE;
use std::time::Instant;
use tracing::{info, instrument, warn};

pub struct IngestionPipeline {
    search: SearchClient,
    extraction: ExtractionClient,
    repository: PaperRepository,
    search_limit: usize,
}

impl IngestionPipeline {
    pub fn new(
        search: SearchClient,
        extraction: ExtractionClient,
        repository: PaperRepository,
        search_limit: usize,
    ) -> Self {
        Self {
            search,
            extraction,
            repository,
            search_limit,
        }
    }

    /// Discover one paper for `query` and store it.
    #[instrument(skip(self))]
    pub async fn run(&self, query: &str) -> IngestOutcome {
        let start = Instant::now();

        let candidates = self.search.search(query, self.search_limit).await;
        let Some(selected) = candidates.into_iter().next() else {
            warn!("No search results");
            metrics::record_ingestion("pipeline", false);
            return IngestOutcome::error(format!("No papers found for query: {}", query));
        };

        let blob = describe(query, &selected);
        let fields = self.extraction.extract(&blob).await;
        if fields.is_empty() {
            warn!(candidate = %selected.title, "Extraction returned nothing");
            metrics::record_ingestion("pipeline", false);
            return IngestOutcome::error(format!(
                "Could not extract details for: {}",
                selected.title
            ));
        }

        let record = normalize(&merge(fields, &selected, query));
        let outcome = self.repository.upsert(&record).await;
        metrics::record_ingestion("pipeline", outcome.is_success());

        info!(
            doi = %record.doi,
            success = outcome.is_success(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Pipeline finished"
        );
        outcome
    }

    /// Normalize and store a caller-supplied payload
    pub async fn ingest(&self, raw: &RawPaper) -> IngestOutcome {
        let record = normalize(raw);
        let outcome = self.repository.upsert(&record).await;
        metrics::record_ingestion("direct", outcome.is_success());
        outcome
    }
}

/// Text handed to the extraction model for a search hit
fn describe(query: &str, candidate: &SearchCandidate) -> String {
    format!(
        "Research query: {}\nTitle: {}\nURL: {}\nDescription: {}",
        query, candidate.title, candidate.url, candidate.description
    )
}

/// Combine extracted fields with the search hit they came from
fn merge(fields: ExtractedFields, selected: &SearchCandidate, query: &str) -> RawPaper {
    let title = fields
        .title
        .filter(|t| !t.is_empty())
        .or_else(|| Some(selected.title.clone()).filter(|t| !t.is_empty()))
        .unwrap_or_else(|| query.to_string());

    let content = fields
        .abstract_text
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| selected.description.clone());

    RawPaper {
        title: Some(title),
        authors: fields.authors,
        content: Some(content),
        citations: fields.potential_citations,
        ..Default::default()
    }
}

/// Minimal record synthesized from the raw query, no model calls
pub fn placeholder_record(query: &str) -> PaperRecord {
    let query = query.trim();
    PaperRecord {
        doi: format!("doi:demo-{}", query.replace(' ', "-")),
        title: format!("Research on {}", query),
        authors: vec!["Anonymous Researcher".to_string()],
        content: format!(
            "A comprehensive exploration of {} in contemporary research.",
            query
        ),
        citations: Vec::new(),
        source: DEMO_SOURCE.to_string(),
        ingestion_date: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::temp_repository;
    use crate::llm::{MockModel, ResearchModel};
    use crate::DEFAULT_SOURCE;
    use std::sync::Arc;

    fn pipeline(model: Arc<dyn ResearchModel>, repository: PaperRepository) -> IngestionPipeline {
        IngestionPipeline::new(
            SearchClient::new(model.clone()),
            ExtractionClient::new(model, 3000),
            repository,
            5,
        )
    }

    fn hit() -> SearchCandidate {
        SearchCandidate {
            title: "Graph Attention Networks".into(),
            url: "https://arxiv.org/abs/1710.10903".into(),
            description: "Attention over graph neighbourhoods.".into(),
        }
    }

    #[test]
    fn test_placeholder_record() {
        let record = placeholder_record("Topic X");
        assert_eq!(record.doi, "doi:demo-Topic-X");
        assert_eq!(record.title, "Research on Topic X");
        assert_eq!(record.authors, vec!["Anonymous Researcher"]);
        assert_eq!(
            record.content,
            "A comprehensive exploration of Topic X in contemporary research."
        );
        assert!(record.citations.is_empty());
        assert_eq!(record.source, DEMO_SOURCE);
    }

    #[test]
    fn test_merge_prefers_extracted_fields() {
        let fields = ExtractedFields {
            title: Some("GAT".into()),
            abstract_text: Some("Abstract".into()),
            authors: Some(vec!["P. Velickovic".into()]),
            potential_citations: Some(vec!["10.1/gcn".into()]),
            ..Default::default()
        };
        let raw = merge(fields, &hit(), "graphs");
        assert_eq!(raw.title.as_deref(), Some("GAT"));
        assert_eq!(raw.content.as_deref(), Some("Abstract"));
        assert_eq!(raw.citations, Some(vec!["10.1/gcn".to_string()]));
        assert!(raw.doi.is_none());
    }

    #[test]
    fn test_merge_falls_back_to_candidate_then_query() {
        let fields = ExtractedFields {
            research_domains: Some(vec!["graphs".into()]),
            ..Default::default()
        };
        let raw = merge(fields.clone(), &hit(), "graphs");
        assert_eq!(raw.title.as_deref(), Some("Graph Attention Networks"));
        assert_eq!(raw.content.as_deref(), Some("Attention over graph neighbourhoods."));

        let raw = merge(fields, &SearchCandidate::default(), "graphs");
        assert_eq!(raw.title.as_deref(), Some("graphs"));
    }

    #[tokio::test]
    async fn test_run_stores_extracted_paper() {
        let repository = temp_repository().await;
        let model = Arc::new(
            MockModel::unavailable()
                .with_search(vec![hit()])
                .with_extraction(ExtractedFields {
                    title: Some("Graph Attention Networks".into()),
                    authors: Some(vec!["Petar Velickovic".into(), "Yoshua Bengio".into()]),
                    abstract_text: Some("We present GATs.".into()),
                    potential_citations: Some(vec!["10.48550/arXiv.1609.02907".into()]),
                    ..Default::default()
                }),
        );

        let outcome = pipeline(model.clone(), repository.clone()).run("graph attention").await;

        assert_eq!(
            outcome,
            IngestOutcome::Success {
                doi: "doi:cerebras-Graph-Attention-Networks".into(),
                title: "Graph Attention Networks".into()
            }
        );
        assert_eq!(model.call_count(), 2);
        assert!(model.last_input().unwrap().contains("URL: https://arxiv.org/abs/1710.10903"));

        let stored = repository.load_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].source, DEFAULT_SOURCE);
        assert_eq!(stored[0].authors.len(), 2);
        assert_eq!(stored[0].content, "We present GATs.");
    }

    #[tokio::test]
    async fn test_run_without_search_results_is_error() {
        let repository = temp_repository().await;
        let model = Arc::new(MockModel::unavailable());

        let outcome = pipeline(model.clone(), repository.clone()).run("graph attention").await;

        assert!(!outcome.is_success());
        assert_eq!(model.call_count(), 1);
        assert!(repository.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_with_failed_extraction_is_error() {
        let repository = temp_repository().await;
        let model = Arc::new(MockModel::unavailable().with_search(vec![hit()]));

        let outcome = pipeline(model, repository.clone()).run("graph attention").await;

        assert!(!outcome.is_success());
        assert!(repository.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ingest_normalizes_raw_payload() {
        let repository = temp_repository().await;
        let raw = RawPaper {
            title: Some("Quantum ML!".into()),
            abstract_text: Some("Qubits".into()),
            ..Default::default()
        };

        let outcome = pipeline(Arc::new(MockModel::unavailable()), repository.clone())
            .ingest(&raw)
            .await;

        assert_eq!(
            outcome,
            IngestOutcome::Success {
                doi: "doi:cerebras-Quantum-ML-".into(),
                title: "Quantum ML!".into()
            }
        );
        let stored = repository.find_by_doi("doi:cerebras-Quantum-ML-").await.unwrap().unwrap();
        assert_eq!(stored.content, "Qubits");
    }
}
