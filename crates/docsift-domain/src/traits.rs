//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Implementations live in other crates.

use crate::error::{AnalyzerError, SinkError};
use crate::record::ResponseRecord;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// The language-model analysis capability
///
/// Given document text, returns a loosely-typed JSON object. The shape is not
/// trusted; callers normalize it before use.
///
/// Implemented by the infrastructure layer (docsift-llm)
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyze the document text
    async fn analyze(&self, text: &str) -> Result<Value, AnalyzerError>;

    /// Short name used in logs and health output
    fn name(&self) -> &str;
}

/// Observer hooks for pipeline events
///
/// Every hook has a no-op default so implementations only override what they
/// need. The pipeline never logs through global state directly; it reports here.
pub trait AnalysisObserver: Send + Sync {
    /// A request passed validation and is about to be analyzed
    fn request_received(&self, _id: Option<&str>, _content_len: usize) {}

    /// An attempt failed and another will follow after `delay`
    fn attempt_failed(&self, _attempt: u32, _delay: Duration, _error: &str) {}

    /// The final attempt failed; no more retries
    fn retries_exhausted(&self, _attempts: u32, _error: &str) {}

    /// A raw field could not be coerced into the schema; the default was kept
    fn field_mismatch(&self, _field: &str, _reason: &str) {}

    /// A record was produced
    fn request_completed(&self, _id: &str, _elapsed: Duration) {}

    /// The request ended in an error
    fn request_failed(&self, _error: &str) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AnalysisObserver for NoopObserver {}

/// Destination for finished records
///
/// Implemented by the application layer (docsift-pipeline)
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Persist a single record
    async fn store(&self, record: &ResponseRecord) -> Result<(), SinkError>;

    /// Persist several records
    async fn store_batch(&self, records: &[ResponseRecord]) -> Result<(), SinkError> {
        for record in records {
            self.store(record).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flat::FlatRecord;
    use std::sync::Mutex;

    struct CountingSink {
        stored: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RecordSink for CountingSink {
        async fn store(&self, record: &ResponseRecord) -> Result<(), SinkError> {
            self.stored.lock().unwrap().push(record.id.clone());
            Ok(())
        }
    }

    fn record(id: &str) -> ResponseRecord {
        ResponseRecord {
            id: id.to_string(),
            document_name: "doc".to_string(),
            upload_time: "t".to_string(),
            analysis_result: FlatRecord::new(),
            raw_content: String::new(),
            processed: true,
            processing_time: "t".to_string(),
        }
    }

    #[tokio::test]
    async fn test_default_store_batch_stores_in_order() {
        let sink = CountingSink {
            stored: Mutex::new(Vec::new()),
        };
        let records = [record("a"), record("b"), record("c")];
        sink.store_batch(&records).await.unwrap();
        assert_eq!(*sink.stored.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_noop_observer_accepts_all_events() {
        let observer = NoopObserver;
        observer.request_received(Some("id"), 10);
        observer.attempt_failed(1, Duration::from_secs(1), "boom");
        observer.retries_exhausted(4, "boom");
        observer.field_mismatch("topics", "number");
        observer.request_completed("id", Duration::from_millis(5));
        observer.request_failed("boom");
    }
}
