//! Configuration for the pipeline

use crate::batch::DEFAULT_BATCH_SIZE;
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the pipeline, usually the `[pipeline]` table of the server config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Retries after the initial analyzer call
    pub max_retries: u32,

    /// Delay before the first retry (milliseconds); doubles on each further retry
    pub base_delay_ms: u64,

    /// Upper bound of random jitter, as a fraction of the delay
    pub jitter_ratio: f64,

    /// Records per sink write
    pub batch_size: usize,

    /// Leading characters of the document kept in `rawContent`
    pub raw_content_limit: usize,
}

impl PipelineConfig {
    /// Retry policy described by this configuration
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.base_delay_ms))
            .with_jitter_ratio(self.jitter_ratio)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }
        if self.raw_content_limit == 0 {
            return Err("raw_content_limit must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.jitter_ratio) {
            return Err(format!(
                "jitter_ratio {} out of range [0.0, 1.0]",
                self.jitter_ratio
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
            jitter_ratio: 0.1,
            batch_size: DEFAULT_BATCH_SIZE,
            raw_content_limit: 1000,
        }
    }
}
