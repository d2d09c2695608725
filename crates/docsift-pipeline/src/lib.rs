//! Docsift Pipeline
//!
//! Turns a document into a flat, storage-ready analysis record.
//!
//! # Overview
//!
//! ```text
//! AnalysisRequest → validate → Retrier(Analyzer) → normalize → flatten → ResponseRecord → RecordSink
//! ```
//!
//! # Key Features
//!
//! - **Retry with backoff**: transient analyzer failures are retried with
//!   exponential delay and jitter before the request fails
//! - **Schema normalization**: untrusted analyzer output is coerced into the
//!   five-field [`NormalizedAnalysis`](docsift_domain::NormalizedAnalysis)
//! - **Flattening**: nested JSON becomes a single-level record keyed by path
//! - **Batching**: records are written to sinks in bounded chunks
//!
//! # Example Usage
//!
//! ```no_run
//! use docsift_pipeline::{Orchestrator, PipelineConfig};
//! use docsift_domain::AnalysisRequest;
//! use docsift_llm::MockAnalyzer;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = Orchestrator::new(Arc::new(MockAnalyzer::new()), PipelineConfig::default());
//!
//! let record = orchestrator
//!     .process(AnalysisRequest::new("We are pleased to report record profit."))
//!     .await?;
//!
//! println!("{}: {:?}", record.id, record.analysis_result);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod render;

pub mod batch;
pub mod flatten;
pub mod normalize;
pub mod observer;
pub mod orchestrator;
pub mod retry;
pub mod sink;

pub use batch::{batch, DEFAULT_BATCH_SIZE};
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use flatten::{flatten, flatten_with, DEFAULT_SEPARATOR};
pub use normalize::normalize;
pub use observer::TracingObserver;
pub use orchestrator::Orchestrator;
pub use render::render_text;
pub use retry::{Retrier, RetryExhausted, RetryPolicy};
pub use sink::{build_sink, JsonLinesSink, MemorySink, SinkConfig, SinkKind};
