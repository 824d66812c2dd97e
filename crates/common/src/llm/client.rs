//! Chat-completions client for the hosted research model
//!
//! Speaks the OpenAI-compatible protocol exposed by Cerebras Cloud. One
//! request per call, bounded by the configured timeout, no retries.

use super::{parse_reply, prompts, ResearchModel};
use crate::config::ModelConfig;
use crate::errors::{AppError, Result};
use crate::metrics;
use crate::models::{ExtractedFields, Recommendation, SearchCandidate};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Default chat-completions endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.cerebras.ai/v1/chat/completions";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// HTTP client for the research model
pub struct CerebrasModel {
    client: reqwest::Client,
    config: ModelConfig,
    endpoint: String,
}

impl CerebrasModel {
    /// Create a new client
    pub fn new(config: ModelConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        let endpoint = config
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// Send one prompt and parse the reply into `T`, recording latency
    async fn ask<T: serde::de::DeserializeOwned>(&self, operation: &str, prompt: &str) -> Result<T> {
        let start = Instant::now();
        let result = match self.complete(prompt).await {
            Ok(reply) => parse_reply::<T>(&reply).map_err(|e| {
                debug!(operation, reply = %reply, "Model reply is not the expected JSON");
                e
            }),
            Err(e) => Err(e),
        };
        let elapsed = start.elapsed();

        metrics::record_model_call(
            operation,
            &self.config.model,
            elapsed.as_secs_f64(),
            result.is_ok(),
        );

        match &result {
            Ok(_) => info!(
                operation,
                model = %self.config.model,
                inference_ms = elapsed.as_millis() as u64,
                "Model call completed"
            ),
            Err(e) => warn!(
                operation,
                model = %self.config.model,
                inference_ms = elapsed.as_millis() as u64,
                error = %e,
                "Model call failed"
            ),
        }

        result
    }

    /// Call the chat-completions endpoint and return the first choice's text
    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompts::SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ModelError {
                message: format!("API error {}: {}", status, body),
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| self.transport_error(e))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::ModelError {
                message: "Empty response from model".to_string(),
            })
    }

    fn transport_error(&self, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            AppError::ModelTimeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            AppError::HttpClient(err)
        }
    }
}

#[async_trait]
impl ResearchModel for CerebrasModel {
    async fn extract(&self, text: &str) -> Result<ExtractedFields> {
        self.ask("extract", &prompts::extraction(text)).await
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchCandidate>> {
        let mut candidates: Vec<SearchCandidate> =
            self.ask("search", &prompts::search(query, limit)).await?;
        candidates.truncate(limit);
        Ok(candidates)
    }

    async fn recommend(&self, title: &str, content: &str, count: usize) -> Result<Vec<Recommendation>> {
        self.ask("recommend", &prompts::recommendation(title, content, count))
            .await
    }

    async fn analyze_trends(&self, corpus: &str, window_years: u32) -> Result<Map<String, Value>> {
        self.ask("trends", &prompts::trends(corpus, window_years))
            .await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
