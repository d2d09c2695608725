//! Docsift Analyzer Layer
//!
//! Pluggable implementations of the [`Analyzer`] trait from `docsift-domain`.
//!
//! # Providers
//!
//! - `MockAnalyzer`: keyword heuristics, no network; the development default
//! - `ChatAnalyzer`: OpenAI-compatible chat-completions endpoint
//! - `ScriptedAnalyzer`: canned results and failures for tests
//!
//! Which one runs is a configuration decision ([`AnalyzerConfig::kind`]), made
//! once by [`build_analyzer`]; the pipeline only ever sees `Arc<dyn Analyzer>`.
//!
//! # Examples
//!
//! ```
//! use docsift_llm::MockAnalyzer;
//!
//! let analyzer = MockAnalyzer::new();
//! let result = analyzer.generate("We are pleased with the excellent results.");
//! assert_eq!(result["sentiment"], "positive");
//! ```
//!
//! [`Analyzer`]: docsift_domain::traits::Analyzer

#![warn(missing_docs)]

pub mod chat;
pub mod config;
pub mod mock;
pub mod prompt;
pub mod reply;
pub mod scripted;

use docsift_domain::traits::Analyzer;
use docsift_domain::AnalyzerError;
use std::sync::Arc;
use tracing::info;

pub use chat::ChatAnalyzer;
pub use config::{AnalyzerConfig, AnalyzerKind};
pub use mock::MockAnalyzer;
pub use reply::parse_reply;
pub use scripted::ScriptedAnalyzer;

/// Build the analyzer selected by configuration
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the HTTP client for a
/// remote analyzer cannot be constructed.
pub fn build_analyzer(config: &AnalyzerConfig) -> Result<Arc<dyn Analyzer>, AnalyzerError> {
    config.validate().map_err(AnalyzerError::Other)?;

    let analyzer: Arc<dyn Analyzer> = match config.kind {
        AnalyzerKind::Mock => Arc::new(MockAnalyzer::new()),
        AnalyzerKind::Chat => Arc::new(ChatAnalyzer::from_config(config)?),
    };

    info!("Using analyzer '{}'", analyzer.name());
    Ok(analyzer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_mock_analyzer() {
        let analyzer = build_analyzer(&AnalyzerConfig::default()).unwrap();
        assert_eq!(analyzer.name(), "mock");
    }

    #[test]
    fn test_build_chat_analyzer() {
        let config = AnalyzerConfig {
            kind: AnalyzerKind::Chat,
            ..AnalyzerConfig::default()
        };
        let analyzer = build_analyzer(&config).unwrap();
        assert_eq!(analyzer.name(), "chat");
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = AnalyzerConfig {
            kind: AnalyzerKind::Chat,
            endpoint: String::new(),
            ..AnalyzerConfig::default()
        };
        assert!(build_analyzer(&config).is_err());
    }
}
