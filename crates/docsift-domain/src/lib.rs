//! Docsift Domain Layer
//!
//! Data model and trait seams shared by every other Docsift crate.
//! Infrastructure (analyzers, sinks) and application logic (the analysis
//! pipeline) live elsewhere and depend on this crate, never the reverse.
//!
//! ## Key Concepts
//!
//! - **AnalysisRequest**: a document submitted for metadata extraction
//! - **NormalizedAnalysis**: the fixed five-field schema every analysis is coerced into
//! - **FlatRecord**: a single-level key/value record ready for a document database
//! - **ResponseRecord**: the complete record produced for one request
//!
//! ## Seams
//!
//! - [`traits::Analyzer`]: the language-model capability (mock or remote)
//! - [`traits::AnalysisObserver`]: injectable logging/instrumentation hooks
//! - [`traits::RecordSink`]: where finished records are handed off

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod error;
pub mod flat;
pub mod record;
pub mod request;
pub mod traits;

// Re-exports for convenience
pub use analysis::NormalizedAnalysis;
pub use error::{AnalyzerError, SinkError};
pub use flat::{FlatRecord, FlatValue};
pub use record::ResponseRecord;
pub use request::{AnalysisRequest, DocumentMetadata};
