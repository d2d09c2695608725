//! Docsift Server
//!
//! HTTP front end for document analysis. Accepts document text on
//! `POST /api/analyze`, runs it through the analysis pipeline, hands the
//! resulting record to the configured sink and returns the flattened analysis.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use docsift_domain::AnalyzerError;
use docsift_llm::build_analyzer;
use docsift_pipeline::{build_sink, Orchestrator};
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Analyzer could not be constructed
    #[error("Analyzer setup failed: {0}")]
    Analyzer(#[from] AnalyzerError),

    /// Sink could not be constructed
    #[error("Sink setup failed: {0}")]
    Sink(String),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the application state described by `config`
pub fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    config.validate()?;

    let analyzer = build_analyzer(&config.analyzer)?;
    let sink = build_sink(&config.sink, config.pipeline.batch_size)
        .map_err(ServerError::Sink)?;
    let orchestrator = Arc::new(Orchestrator::new(analyzer, config.pipeline.clone()));

    Ok(AppState { orchestrator, sink })
}

/// Start the HTTP server
///
/// Expects a tracing subscriber to be installed by the caller.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Docsift server");
    info!("Bind address: {}", config.bind_addr());
    info!("Analyzer: {:?}", config.analyzer.kind);
    info!(
        "Retry policy: {} retries, {} ms base delay",
        config.pipeline.max_retries, config.pipeline.base_delay_ms
    );
    info!("Sink: {:?}", config.sink.kind);

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
