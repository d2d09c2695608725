//! Chat-completions analyzer
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint (OpenAI, Azure
//! OpenAI deployments behind a compatible gateway, Ollama's `/v1`).
//!
//! # Features
//!
//! - Async HTTP communication via `reqwest`
//! - Configurable endpoint, model, temperature and token budget
//! - Optional bearer API key read from the environment
//! - Request timeout handling
//!
//! A single call makes a single HTTP request. Retrying is the caller's job, so
//! every failure is surfaced as an [`AnalyzerError`].
//!
//! # Examples
//!
//! ```no_run
//! use docsift_llm::ChatAnalyzer;
//!
//! let analyzer = ChatAnalyzer::new("http://localhost:11434/v1", "llama3").unwrap();
//! ```

use crate::config::{AnalyzerConfig, DEFAULT_TIMEOUT_SECS};
use crate::prompt::{build_messages, ChatMessage};
use crate::reply::parse_reply;
use async_trait::async_trait;
use docsift_domain::traits::Analyzer;
use docsift_domain::AnalyzerError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

/// Remote analyzer backed by a chat-completions API
#[derive(Debug, Clone)]
pub struct ChatAnalyzer {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
    client: reqwest::Client,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

/// Response from the chat-completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatAnalyzer {
    /// Create a new analyzer with default sampling settings
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://api.openai.com/v1")
    /// - `model`: Model to use (e.g., "gpt-4", "llama3")
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, AnalyzerError> {
        Self::from_config(&AnalyzerConfig {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key_env: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            ..AnalyzerConfig::default()
        })
    }

    /// Create an analyzer from configuration
    ///
    /// The API key is resolved from the configured environment variable here,
    /// once, rather than on every request.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, AnalyzerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AnalyzerError::Other(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    /// Set the API key explicitly
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Send the document and return the model's reply text
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint is unreachable or the request times out
    /// - The endpoint answers with a non-success status
    /// - The response body is not a chat-completions payload
    pub async fn complete(&self, document: &str) -> Result<String, AnalyzerError> {
        let url = format!("{}/chat/completions", self.endpoint);

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: build_messages(document),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Chat completion failed with HTTP {}", status);
            return Err(AnalyzerError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            AnalyzerError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AnalyzerError::InvalidResponse("Response has no message content".to_string())
            })?;

        debug!("Chat completion returned {} chars", content.len());
        Ok(content)
    }

    fn transport_error(&self, e: reqwest::Error) -> AnalyzerError {
        if e.is_timeout() {
            AnalyzerError::Timeout(self.timeout_secs)
        } else {
            AnalyzerError::Communication(format!("Request failed: {}", e))
        }
    }
}

#[async_trait]
impl Analyzer for ChatAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Value, AnalyzerError> {
        let reply = self.complete(text).await?;
        Ok(parse_reply(&reply))
    }

    fn name(&self) -> &str {
        "chat"
    }
}
