//! Services over the record store and the research model
//!
//! Failure policy: model transport and parse errors stop at this layer and
//! become empty results or status sentinels. Store read errors still
//! propagate as `AppError` so callers can tell a failed read from an empty
//! table.

mod explorer;
mod extract;
mod ingest;
mod insights;
mod search;

pub use explorer::Explorer;
pub use extract::ExtractionClient;
pub use ingest::{placeholder_record, IngestionPipeline};
pub use insights::{RecommendationQuerier, TrendQuerier};
pub use search::{SearchClient, MIN_QUERY_CHARS};

/// Char-boundary-safe prefix of at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
