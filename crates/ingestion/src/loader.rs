//! Seed file loading
//!
//! A seed file holds either a JSON array of paper payloads or a single
//! payload object. Fields follow `RawPaper`: everything optional.

use crate::errors::IngestionError;
use litexplorer_common::RawPaper;
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum SeedFile {
    Many(Vec<RawPaper>),
    One(RawPaper),
}

/// Read paper payloads from `path`
pub fn load_papers(path: &Path) -> Result<Vec<RawPaper>, IngestionError> {
    if !path.exists() {
        return Err(IngestionError::FileNotFound(path.display().to_string()));
    }

    let text = std::fs::read_to_string(path)?;
    parse_papers(&text).map_err(|source| IngestionError::InvalidInput {
        path: path.display().to_string(),
        source,
    })
}

fn parse_papers(text: &str) -> Result<Vec<RawPaper>, serde_json::Error> {
    Ok(match serde_json::from_str(text)? {
        SeedFile::Many(papers) => papers,
        SeedFile::One(paper) => vec![paper],
    })
}
