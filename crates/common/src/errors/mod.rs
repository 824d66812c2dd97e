//! Error types for Literature Explorer
//!
//! Provides:
//! - Distinct error types for store, model, and validation failures
//! - HTTP status code mapping for the gateway
//! - Structured error responses carrying a `status: "error"` sentinel
//! - Error codes for client handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,

    // Resource errors (4xxx)
    NotFound,
    PaperNotFound,

    // Database errors (7xxx)
    DatabaseError,
    StoreUnavailable,

    // External service errors (8xxx)
    UpstreamError,
    ModelError,
    ModelTimeout,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 1001,

            ErrorCode::NotFound => 4001,
            ErrorCode::PaperNotFound => 4002,

            ErrorCode::DatabaseError => 7001,
            ErrorCode::StoreUnavailable => 7002,

            ErrorCode::UpstreamError => 8001,
            ErrorCode::ModelError => 8002,
            ErrorCode::ModelTimeout => 8003,

            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    // Resource errors
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound { resource_type: String, id: String },

    #[error("Paper not found: {doi}")]
    PaperNotFound { doi: String },

    // Store errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Record store unavailable: {message}")]
    StoreUnavailable { message: String },

    // Remote model errors
    #[error("Model service error: {message}")]
    ModelError { message: String },

    #[error("Model request timed out after {timeout_secs}s")]
    ModelTimeout { timeout_secs: u64 },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    // Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::PaperNotFound { .. } => ErrorCode::PaperNotFound,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::StoreUnavailable { .. } => ErrorCode::StoreUnavailable,
            AppError::ModelError { .. } => ErrorCode::ModelError,
            AppError::ModelTimeout { .. } => ErrorCode::ModelTimeout,
            AppError::HttpClient(_) => ErrorCode::UpstreamError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,

            // 404 Not Found
            AppError::NotFound { .. } | AppError::PaperNotFound { .. } => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            AppError::Database(_)
            | AppError::Internal { .. }
            | AppError::Configuration { .. }
            | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 502 Bad Gateway
            AppError::ModelError { .. } | AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,

            // 503 Service Unavailable
            AppError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,

            // 504 Gateway Timeout
            AppError::ModelTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Structured error body, shaped like the `{status: "error", message}` sentinel
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub code: ErrorCode,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        if self.is_server_error() {
            tracing::error!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Server error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Client error"
            );
        }

        let body = ErrorResponse {
            status: "error".to_string(),
            code,
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration {
            message: err.to_string(),
        }
    }
}
