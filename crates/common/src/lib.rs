//! Literature Explorer Common Library
//!
//! Shared code for the gateway and the ingestion CLI:
//! - Paper record store (SQLite via SeaORM)
//! - Field normalization for loosely-typed paper payloads
//! - Remote research model client and its deterministic mock
//! - Ingestion pipeline, recommendation and trend queriers
//! - Error types, configuration, metrics

pub mod citations;
pub mod config;
pub mod db;
pub mod errors;
pub mod llm;
pub mod metrics;
pub mod models;
pub mod normalize;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::PaperRepository;
pub use errors::{AppError, Result};
pub use llm::ResearchModel;
pub use models::{IngestOutcome, PaperRecord, RawPaper, TrendReport};
pub use services::Explorer;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Provenance label for records produced by the search pipeline
pub const DEFAULT_SOURCE: &str = "Cerebras Web Search";

/// Provenance label for placeholder records built from a raw query
pub const DEMO_SOURCE: &str = "Demonstration Repository";
