//! Core data shapes
//!
//! - `PaperRecord`: the single persisted entity, in its canonical form
//! - `RawPaper`: the loosely-typed input bag accepted by the normalizer
//! - Reply shapes of the remote research model
//! - Outcome sentinels returned across the public API
//!
//! Model replies are only required to be valid JSON. Their typed fields
//! deserialize leniently: a null or mistyped value falls back to the default
//! instead of rejecting the whole reply.

mod lenient;

use crate::errors::ErrorCode;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical paper record, as stored and as returned by `load_all`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Unique key
    pub doi: String,

    pub title: String,

    /// Ordered author names
    pub authors: Vec<String>,

    /// Full text or abstract
    pub content: String,

    /// Ordered DOI-like citation strings
    pub citations: Vec<String>,

    /// Provenance label
    pub source: String,

    /// Assigned by the store at write time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingestion_date: Option<NaiveDateTime>,
}

/// Loosely-typed paper payload. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPaper {
    pub doi: Option<String>,
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub content: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub citations: Option<Vec<String>>,
    pub potential_citations: Option<Vec<String>>,
    pub source: Option<String>,
}

/// Structured fields extracted from free text.
///
/// Keys the model omits stay `None`; defaults are applied by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedFields {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string_list")]
    pub authors: Option<Vec<String>>,
    #[serde(rename = "abstract", deserialize_with = "lenient::opt_string")]
    pub abstract_text: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string_list")]
    pub key_contributions: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::opt_string_list")]
    pub research_domains: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::opt_string_list")]
    pub potential_citations: Option<Vec<String>>,
}

impl ExtractedFields {
    /// True when nothing was extracted ("extraction unavailable").
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// One search hit returned by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCandidate {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub url: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

/// One ranked suggestion returned by the model.
///
/// Keys beyond the three requested ones are kept in `extra` and serialized
/// back alongside them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub rationale: String,
    /// Numbers and numeric strings are accepted; anything else is `None`
    #[serde(deserialize_with = "lenient::opt_score")]
    pub relevance_score: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of an ingest or upsert.
///
/// Serializes as `{"status": "success", "doi", "title"}` or
/// `{"status": "error", "message"}`. The failure kind travels in `code` for
/// callers that map outcomes onto HTTP statuses; it is not serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestOutcome {
    Success {
        doi: String,
        title: String,
    },
    Error {
        message: String,
        #[serde(skip)]
        code: Option<ErrorCode>,
    },
}

impl IngestOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        IngestOutcome::Error {
            message: message.into(),
            code: None,
        }
    }

    /// Error outcome tagged with the kind of failure
    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        IngestOutcome::Error {
            message: message.into(),
            code: Some(code),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, IngestOutcome::Success { .. })
    }
}

/// Result of a trend analysis: the model's object verbatim, or a status sentinel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrendReport {
    Analysis(Map<String, Value>),
    Status(TrendStatus),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendStatus {
    InsufficientData,
    Error { message: String },
}

impl TrendReport {
    pub fn insufficient_data() -> Self {
        TrendReport::Status(TrendStatus::InsufficientData)
    }

    pub fn error(message: impl Into<String>) -> Self {
        TrendReport::Status(TrendStatus::Error {
            message: message.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outcome_wire_shape() {
        let ok = IngestOutcome::Success {
            doi: "10.1/a".into(),
            title: "A".into(),
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"status": "success", "doi": "10.1/a", "title": "A"})
        );

        let err = IngestOutcome::error("disk I/O error");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"status": "error", "message": "disk I/O error"})
        );
        assert!(!err.is_success());
    }

    #[test]
    fn test_trend_report_wire_shape() {
        assert_eq!(
            serde_json::to_value(TrendReport::insufficient_data()).unwrap(),
            json!({"status": "insufficient_data"})
        );

        let mut analysis = Map::new();
        analysis.insert("emerging_domains".into(), json!(["quantum ml"]));
        assert_eq!(
            serde_json::to_value(TrendReport::Analysis(analysis)).unwrap(),
            json!({"emerging_domains": ["quantum ml"]})
        );
    }

    #[test]
    fn test_raw_paper_accepts_loose_payloads() {
        let raw: RawPaper = serde_json::from_value(json!({
            "title": "Attention",
            "abstract": "We propose...",
            "potential_citations": ["10.1/b"],
            "unrelated": 42
        }))
        .unwrap();

        assert_eq!(raw.title.as_deref(), Some("Attention"));
        assert_eq!(raw.abstract_text.as_deref(), Some("We propose..."));
        assert!(raw.authors.is_none());
        assert_eq!(raw.potential_citations, Some(vec!["10.1/b".to_string()]));
    }

    #[test]
    fn test_search_candidate_tolerates_null_fields() {
        let hits: Vec<SearchCandidate> =
            serde_json::from_str(r#"[{"title":"Found","url":null,"description":"d"}]"#).unwrap();
        assert_eq!(hits[0].title, "Found");
        assert_eq!(hits[0].url, "");
        assert_eq!(hits[0].description, "d");
    }

    #[test]
    fn test_recommendation_keeps_string_score_and_extra_keys() {
        let recs: Vec<Recommendation> = serde_json::from_str(
            r#"[{"title":"Next","rationale":"r","relevance_score":"0.9","year":2021}]"#,
        )
        .unwrap();
        assert_eq!(recs[0].relevance_score, Some(0.9));
        assert_eq!(recs[0].extra.get("year"), Some(&json!(2021)));

        let value = serde_json::to_value(&recs[0]).unwrap();
        assert_eq!(value["year"], 2021);
        assert_eq!(value["title"], "Next");
    }

    #[test]
    fn test_recommendation_unparseable_score_is_none() {
        let rec: Recommendation =
            serde_json::from_value(json!({"title": "T", "relevance_score": "high"})).unwrap();
        assert_eq!(rec.relevance_score, None);
        assert_eq!(rec.rationale, "");
    }

    #[test]
    fn test_extracted_authors_as_single_string() {
        let fields: ExtractedFields = serde_json::from_str(
            r#"{"title":"T","authors":"Ann Lee, Bo Kim","research_domains":null,"potential_citations":[1,"10.1/a"]}"#,
        )
        .unwrap();
        assert_eq!(fields.title.as_deref(), Some("T"));
        assert_eq!(
            fields.authors,
            Some(vec!["Ann Lee".to_string(), "Bo Kim".to_string()])
        );
        assert!(fields.research_domains.is_none());
        assert_eq!(
            fields.potential_citations,
            Some(vec!["1".to_string(), "10.1/a".to_string()])
        );
    }

    #[test]
    fn test_error_code_is_not_serialized() {
        let outcome = IngestOutcome::failure(ErrorCode::DatabaseError, "no such table: papers");
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"status": "error", "message": "no such table: papers"})
        );
    }

    #[test]
    fn test_extracted_fields_missing_keys() {
        let fields: ExtractedFields = serde_json::from_value(json!({"title": "Only a title"})).unwrap();
        assert!(!fields.is_empty());
        assert!(fields.authors.is_none());
        assert!(ExtractedFields::default().is_empty());
    }
}
