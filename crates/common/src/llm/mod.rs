//! Remote research model abstraction
//!
//! Every extraction, search, ranking, and trend step is one call to an opaque
//! `(instruction, text) -> JSON` capability. `ResearchModel` exposes the four
//! fixed reply shapes so the HTTP client can be swapped for `MockModel`.

mod client;
mod mock;
pub mod prompts;

pub use client::CerebrasModel;
pub use mock::MockModel;

use crate::config::ModelConfig;
use crate::errors::{AppError, Result};
use crate::models::{ExtractedFields, Recommendation, SearchCandidate};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::{Arc, OnceLock};

/// Trait for the remote research model
#[async_trait]
pub trait ResearchModel: Send + Sync {
    /// Extract structured fields from a text blob
    async fn extract(&self, text: &str) -> Result<ExtractedFields>;

    /// Find up to `limit` candidate papers for a query
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchCandidate>>;

    /// Suggest `count` related papers for a stored paper
    async fn recommend(&self, title: &str, content: &str, count: usize) -> Result<Vec<Recommendation>>;

    /// Open-ended trend analysis over a corpus excerpt
    async fn analyze_trends(&self, corpus: &str, window_years: u32) -> Result<Map<String, Value>>;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// Create a model client based on configuration
pub fn create_model(config: &ModelConfig) -> Result<Arc<dyn ResearchModel>> {
    match config.provider.as_str() {
        "cerebras" | "openai" => match config.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(Arc::new(CerebrasModel::new(config.clone())?)),
            _ => {
                tracing::warn!(
                    provider = %config.provider,
                    "No model API key configured, using mock model"
                );
                Ok(Arc::new(MockModel::unavailable()))
            }
        },
        "mock" => Ok(Arc::new(MockModel::unavailable())),
        other => Err(AppError::Configuration {
            message: format!("Unknown model provider: {}", other),
        }),
    }
}

fn code_fence() -> &'static regex_lite::Regex {
    static FENCE: OnceLock<regex_lite::Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        regex_lite::Regex::new(r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$")
            .expect("code fence pattern is valid")
    })
}

/// Parse a model reply body as JSON, tolerating a Markdown code fence
pub fn parse_reply<T: DeserializeOwned>(reply: &str) -> Result<T> {
    let body = code_fence()
        .captures(reply)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
        .unwrap_or(reply);

    serde_json::from_str(body.trim()).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let candidates: Vec<SearchCandidate> =
            parse_reply(r#"[{"title": "T", "url": "https://x", "description": "D"}]"#).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://x");
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = "```json\n{\"title\": \"Fenced\"}\n```";
        let fields: ExtractedFields = parse_reply(reply).unwrap();
        assert_eq!(fields.title.as_deref(), Some("Fenced"));
    }

    #[test]
    fn test_non_array_search_reply_is_error() {
        let result: Result<Vec<SearchCandidate>> = parse_reply(r#"{"title": "not a list"}"#);
        assert!(matches!(result, Err(AppError::Serialization(_))));
    }

    #[test]
    fn test_null_url_keeps_search_hit() {
        let hits: Vec<SearchCandidate> =
            parse_reply(r#"[{"title":"Found","url":null,"description":"d"}]"#).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Found");
        assert!(hits[0].url.is_empty());
    }

    #[test]
    fn test_string_relevance_score_keeps_recommendation() {
        let recs: Vec<Recommendation> = parse_reply(
            r#"[{"title":"Next","rationale":"Builds on it","relevance_score":"0.9"}]"#,
        )
        .unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].relevance_score, Some(0.9));
    }

    #[test]
    fn test_string_authors_keeps_extraction() {
        let fields: ExtractedFields =
            parse_reply(r#"{"title":"T","authors":"Ann Lee, Bo Kim"}"#).unwrap();
        assert_eq!(fields.title.as_deref(), Some("T"));
        assert_eq!(
            fields.authors,
            Some(vec!["Ann Lee".to_string(), "Bo Kim".to_string()])
        );
    }

    #[test]
    fn test_prose_reply_is_error() {
        let result: Result<Map<String, Value>> = parse_reply("Sure! Here are the trends...");
        assert!(result.is_err());
    }

    #[test]
    fn test_create_model_without_key_uses_mock() {
        let config = ModelConfig::default();
        let model = create_model(&config).unwrap();
        assert_eq!(model.model_name(), "mock");
    }

    #[test]
    fn test_create_model_unknown_provider() {
        let config = ModelConfig {
            provider: "carrier-pigeon".into(),
            ..Default::default()
        };
        assert!(matches!(
            create_model(&config),
            Err(AppError::Configuration { .. })
        ));
    }
}
