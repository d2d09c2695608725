//! Analyzer selection and connection settings

use serde::{Deserialize, Serialize};

/// Default OpenAI-compatible endpoint (a local Ollama exposes one under `/v1`)
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/v1";

/// Default model name
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "DOCSIFT_API_KEY";

/// Default timeout for a single remote request (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which analyzer implementation to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    /// Local keyword heuristics, no network
    #[default]
    Mock,
    /// Remote chat-completions endpoint
    Chat,
}

/// Analyzer configuration, usually the `[analyzer]` table of the server config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Implementation to use
    pub kind: AnalyzerKind,

    /// Base URL of the chat-completions API (without `/chat/completions`)
    pub endpoint: String,

    /// Model name sent with each request
    pub model: String,

    /// Environment variable the API key is read from; unset means no auth header
    pub api_key_env: Option<String>,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// Sampling temperature
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            kind: AnalyzerKind::Mock,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: Some(DEFAULT_API_KEY_ENV.to_string()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: 0.3,
            max_tokens: 1000,
        }
    }
}

impl AnalyzerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.kind == AnalyzerKind::Mock {
            return Ok(());
        }
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature {} out of range [0.0, 2.0]",
                self.temperature
            ));
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Resolve the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        self.api_key_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .filter(|key| !key.is_empty())
    }
}
