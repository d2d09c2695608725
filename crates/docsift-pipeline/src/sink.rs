//! Record sinks
//!
//! [`MemorySink`] keeps records in process for tests and local runs.
//! [`JsonLinesSink`] appends one JSON document per line to a file, writing
//! at most `batch_size` records per flush.

use crate::batch::batch;
use async_trait::async_trait;
use docsift_domain::error::SinkError;
use docsift_domain::record::ResponseRecord;
use docsift_domain::traits::RecordSink;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Which sink the server writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Keep records in memory
    #[default]
    Memory,
    /// Append to a JSON Lines file
    #[serde(rename = "jsonl")]
    JsonLines,
}

/// Sink section of the server configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Sink implementation
    pub kind: SinkKind,

    /// Output file, required for `jsonl`
    pub path: Option<PathBuf>,
}

impl SinkConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        match (self.kind, &self.path) {
            (SinkKind::JsonLines, None) => {
                Err("sink.path is required for the jsonl sink".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Build the sink described by `config`
pub fn build_sink(config: &SinkConfig, batch_size: usize) -> Result<Arc<dyn RecordSink>, String> {
    config.validate()?;

    match (config.kind, &config.path) {
        (SinkKind::JsonLines, Some(path)) => {
            let sink = JsonLinesSink::new(path.clone()).with_batch_size(batch_size);
            Ok(Arc::new(sink))
        }
        _ => Ok(Arc::new(MemorySink::new())),
    }
}

/// In-memory sink
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<ResponseRecord>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored records
    pub fn records(&self) -> Vec<ResponseRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn store(&self, record: &ResponseRecord) -> Result<(), SinkError> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    async fn store_batch(&self, records: &[ResponseRecord]) -> Result<(), SinkError> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(records);
        Ok(())
    }
}

/// Append-only JSON Lines file sink
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    path: PathBuf,
    batch_size: usize,
}

impl JsonLinesSink {
    /// Sink writing to `path` (created on first write)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            batch_size: crate::batch::DEFAULT_BATCH_SIZE,
        }
    }

    /// Records per write
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Output file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, lines: String) -> Result<(), SinkError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(lines.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

fn encode(records: &[ResponseRecord]) -> Result<String, SinkError> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

#[async_trait]
impl RecordSink for JsonLinesSink {
    async fn store(&self, record: &ResponseRecord) -> Result<(), SinkError> {
        self.append(encode(std::slice::from_ref(record))?).await
    }

    async fn store_batch(&self, records: &[ResponseRecord]) -> Result<(), SinkError> {
        let chunks = batch(records, self.batch_size);
        let total = chunks.len();
        for (idx, chunk) in chunks.into_iter().enumerate() {
            debug!(
                "Writing batch {}/{} ({} records) to {}",
                idx + 1,
                total,
                chunk.len(),
                self.path.display()
            );
            self.append(encode(chunk)?).await?;
        }
        Ok(())
    }
}
