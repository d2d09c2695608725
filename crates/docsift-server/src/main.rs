//! Docsift server binary
//!
//! Starts the HTTP server for document analysis.

use anyhow::Context;
use clap::Parser;
use docsift_server::{config::ServerConfig, start_server};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Docsift - Extract structured metadata from documents over HTTP.
#[derive(Debug, Parser)]
#[command(name = "docsift-server")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "DOCSIFT_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overriding the config file (e.g., 0.0.0.0:8080)
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            warn!("No config file, using mock analyzer and memory sink");
            ServerConfig::default()
        }
    };

    if let Some(bind) = &cli.bind {
        config.set_bind(bind)?;
    }

    start_server(config).await?;
    Ok(())
}
