//! Field normalization
//!
//! Maps a loosely-typed `RawPaper` into the canonical `PaperRecord` shape.
//! Empty strings and empty lists are treated as missing.

use crate::models::{PaperRecord, RawPaper};
use crate::DEFAULT_SOURCE;

/// Scheme tag prefixed to DOIs synthesized from a title
pub const SYNTHETIC_DOI_PREFIX: &str = "doi:cerebras-";

/// Title used when the payload carries none
pub const UNTITLED: &str = "Untitled";

/// Normalize a raw payload. Pure: no network or storage access.
pub fn normalize(raw: &RawPaper) -> PaperRecord {
    let title = non_empty(&raw.title).unwrap_or(UNTITLED).to_string();

    let content = non_empty(&raw.content)
        .or_else(|| non_empty(&raw.abstract_text))
        .unwrap_or_default()
        .to_string();

    let citations = non_empty_list(&raw.citations)
        .or_else(|| non_empty_list(&raw.potential_citations))
        .map(<[String]>::to_vec)
        .unwrap_or_default();

    let doi = match non_empty(&raw.doi) {
        Some(doi) => doi.to_string(),
        None => synthesize_doi(&title),
    };

    PaperRecord {
        doi,
        title,
        authors: non_empty_list(&raw.authors)
            .map(<[String]>::to_vec)
            .unwrap_or_default(),
        content,
        citations,
        source: non_empty(&raw.source).unwrap_or(DEFAULT_SOURCE).to_string(),
        ingestion_date: None,
    }
}

/// `doi:cerebras-` followed by the slugified title.
///
/// Distinct titles that slugify identically collide on the same key.
pub fn synthesize_doi(title: &str) -> String {
    format!("{}{}", SYNTHETIC_DOI_PREFIX, slugify(title))
}

/// Replace every character outside `[A-Za-z0-9]` with `-`.
pub fn slugify(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn non_empty_list(value: &Option<Vec<String>>) -> Option<&[String]> {
    value.as_deref().filter(|list| !list.is_empty())
}
