//! Ingestion CLI error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Input file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid paper JSON in {path}: {source}")]
    InvalidInput {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<litexplorer_common::errors::AppError> for IngestionError {
    fn from(e: litexplorer_common::errors::AppError) -> Self {
        IngestionError::StoreError(e.to_string())
    }
}

impl From<litexplorer_common::config::ConfigError> for IngestionError {
    fn from(e: litexplorer_common::config::ConfigError) -> Self {
        IngestionError::ConfigError(e.to_string())
    }
}
