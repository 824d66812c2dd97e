//! Configuration management for Literature Explorer
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default, config/{APP_ENV}, config/local)
//! - Default values
//!
//! The model API key additionally falls back to `CEREBRAS_API_KEY`.

use config::{Config, Environment, File};
pub use config::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable consulted when `model.api_key` is not configured
pub const API_KEY_ENV: &str = "CEREBRAS_API_KEY";

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Record store configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Remote research model configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Ingestion and query tuning
    #[serde(default)]
    pub ingestion: IngestionConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite URL, e.g. `sqlite://scientific_papers.db?mode=rwc`
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Model provider: cerebras, openai, mock
    #[serde(default = "default_model_provider")]
    pub provider: String,

    /// API key for the model service
    pub api_key: Option<String>,

    /// Chat-completions endpoint override
    pub api_base: Option<String>,

    /// Model to use
    #[serde(default = "default_model_name")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,

    /// Maximum output tokens per reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestionConfig {
    /// Candidates requested from the search call
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Characters of text sent for field extraction
    #[serde(default = "default_extract_max_chars")]
    pub extract_max_chars: usize,

    /// Characters of stored content sent for recommendations
    #[serde(default = "default_recommend_max_chars")]
    pub recommend_max_chars: usize,

    /// Characters of the concatenated corpus sent for trend analysis
    #[serde(default = "default_trend_max_chars")]
    pub trend_max_chars: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_request_timeout() -> u64 { 60 }
fn default_database_url() -> String { "sqlite://scientific_papers.db?mode=rwc".to_string() }
fn default_connect_timeout() -> u64 { 10 }
fn default_model_provider() -> String { "cerebras".to_string() }
fn default_model_name() -> String { "llama3.1-8b".to_string() }
fn default_model_timeout() -> u64 { 30 }
fn default_max_tokens() -> u32 { 1024 }
fn default_temperature() -> f32 { 0.2 }
fn default_search_limit() -> usize { 5 }
fn default_extract_max_chars() -> usize { 3000 }
fn default_recommend_max_chars() -> usize { 2000 }
fn default_trend_max_chars() -> usize { 4000 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_metrics_port() -> u16 { 9090 }
fn default_service_name() -> String { "litexplorer".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_model_provider(),
            api_key: None,
            api_base: None,
            model: default_model_name(),
            timeout_secs: default_model_timeout(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            search_limit: default_search_limit(),
            extract_max_chars: default_extract_max_chars(),
            recommend_max_chars: default_recommend_max_chars(),
            trend_max_chars: default_trend_max_chars(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            metrics_port: default_metrics_port(),
            service_name: default_service_name(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // e.g., APP__MODEL__TIMEOUT_SECS=45
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        Ok(config.with_api_key_from_env())
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        Ok(config.with_api_key_from_env())
    }

    fn with_api_key_from_env(mut self) -> Self {
        if self.model.api_key.is_none() {
            self.model.api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        }
        self
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}
