//! Configuration file parsing for the server.
//!
//! One TOML file carries the listener address and the `[analyzer]`,
//! `[pipeline]` and `[sink]` sections. Every field has a default, so an empty
//! file (or no file at all) runs the mock analyzer with an in-memory sink.

use docsift_llm::AnalyzerConfig;
use docsift_pipeline::{PipelineConfig, SinkConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range or inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// Analyzer selection and connection settings
    pub analyzer: AnalyzerConfig,

    /// Retry, batching and truncation settings
    pub pipeline: PipelineConfig,

    /// Where finished records go
    pub sink: SinkConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            analyzer: AnalyzerConfig::default(),
            pipeline: PipelineConfig::default(),
            sink: SinkConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.is_empty() {
            let msg = "bind_address must not be empty".to_string();
            return Err(ConfigError::Invalid(msg));
        }
        self.analyzer
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("analyzer: {}", e)))?;
        self.pipeline
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("pipeline: {}", e)))?;
        self.sink
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("sink: {}", e)))?;
        Ok(())
    }

    /// Override the listener from an `address:port` string
    pub fn set_bind(&mut self, bind: &str) -> Result<(), ConfigError> {
        let Some((address, port)) = bind.rsplit_once(':') else {
            let msg = format!("bind '{}' is not address:port", bind);
            return Err(ConfigError::Invalid(msg));
        };
        let Ok(port) = port.parse::<u16>() else {
            let msg = format!("bind port '{}' is not a valid port", port);
            return Err(ConfigError::Invalid(msg));
        };
        if address.is_empty() {
            let msg = format!("bind '{}' has no address", bind);
            return Err(ConfigError::Invalid(msg));
        }

        self.bind_address = address.to_string();
        self.bind_port = port;
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
