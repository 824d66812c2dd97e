//! Deterministic stand-in for the research model
//!
//! Methods without a canned reply fail the way an unreachable service does.

use super::ResearchModel;
use crate::errors::{AppError, Result};
use crate::models::{ExtractedFields, Recommendation, SearchCandidate};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock model for tests and keyless development
#[derive(Debug, Default)]
pub struct MockModel {
    extraction: Option<ExtractedFields>,
    search: Option<Vec<SearchCandidate>>,
    recommendations: Option<Vec<Recommendation>>,
    trends: Option<Map<String, Value>>,
    calls: AtomicUsize,
    last_input: Mutex<Option<String>>,
}

impl MockModel {
    /// A model whose every call fails
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn with_extraction(mut self, fields: ExtractedFields) -> Self {
        self.extraction = Some(fields);
        self
    }

    pub fn with_search(mut self, candidates: Vec<SearchCandidate>) -> Self {
        self.search = Some(candidates);
        self
    }

    pub fn with_recommendations(mut self, recommendations: Vec<Recommendation>) -> Self {
        self.recommendations = Some(recommendations);
        self
    }

    pub fn with_trends(mut self, analysis: Map<String, Value>) -> Self {
        self.trends = Some(analysis);
        self
    }

    /// Number of calls made so far, successful or not
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Text passed to the most recent call
    pub fn last_input(&self) -> Option<String> {
        self.last_input.lock().ok().and_then(|guard| guard.clone())
    }

    fn reply<T: Clone>(&self, operation: &str, input: &str, canned: &Option<T>) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_input.lock() {
            *guard = Some(input.to_string());
        }

        canned.clone().ok_or_else(|| AppError::ModelError {
            message: format!("mock model has no {} reply", operation),
        })
    }
}

#[async_trait]
impl ResearchModel for MockModel {
    async fn extract(&self, text: &str) -> Result<ExtractedFields> {
        self.reply("extract", text, &self.extraction)
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchCandidate>> {
        let mut candidates = self.reply("search", query, &self.search)?;
        candidates.truncate(limit);
        Ok(candidates)
    }

    async fn recommend(&self, _title: &str, content: &str, count: usize) -> Result<Vec<Recommendation>> {
        let mut recommendations = self.reply("recommend", content, &self.recommendations)?;
        recommendations.truncate(count);
        Ok(recommendations)
    }

    async fn analyze_trends(&self, corpus: &str, _window_years: u32) -> Result<Map<String, Value>> {
        self.reply("trends", corpus, &self.trends)
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
