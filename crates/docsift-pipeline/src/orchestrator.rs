//! Analysis orchestrator
//!
//! Drives one request through validation, the analyzer (under retry),
//! normalization and flattening, then assembles the [`ResponseRecord`].

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::flatten::flatten;
use crate::normalize::normalize;
use crate::observer::TracingObserver;
use crate::retry::Retrier;
use chrono::{SecondsFormat, Utc};
use docsift_domain::record::ResponseRecord;
use docsift_domain::request::AnalysisRequest;
use docsift_domain::traits::{AnalysisObserver, Analyzer};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Name recorded when the request carries no metadata name
pub const UNNAMED_DOCUMENT: &str = "Unnamed Document";

/// Turns analysis requests into response records
pub struct Orchestrator {
    analyzer: Arc<dyn Analyzer>,
    config: PipelineConfig,
    observer: Arc<dyn AnalysisObserver>,
}

impl Orchestrator {
    /// Create an orchestrator that reports through [`TracingObserver`]
    pub fn new(analyzer: Arc<dyn Analyzer>, config: PipelineConfig) -> Self {
        Self {
            analyzer,
            config,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the observer
    pub fn with_observer(mut self, observer: Arc<dyn AnalysisObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Pipeline configuration in effect
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Name of the underlying analyzer
    pub fn analyzer_name(&self) -> &str {
        self.analyzer.name()
    }

    /// Process a single request
    ///
    /// Returns [`PipelineError::MissingField`] without calling the analyzer when
    /// `documentContent` is absent or empty, and
    /// [`PipelineError::ExhaustedRetries`] when every analyzer attempt failed.
    pub async fn process(&self, request: AnalysisRequest) -> Result<ResponseRecord, PipelineError> {
        let start = Instant::now();

        let Some(content) = request.content() else {
            let err = PipelineError::MissingField("documentContent".to_string());
            self.observer.request_failed(&err.to_string());
            return Err(err);
        };

        self.observer
            .request_received(request.id.as_deref(), content.chars().count());

        let retrier = Retrier::new(self.config.retry_policy(), self.observer.as_ref());
        let raw = match retrier.run(|| self.analyzer.analyze(content)).await {
            Ok(raw) => raw,
            Err(exhausted) => {
                let err = PipelineError::ExhaustedRetries {
                    attempts: exhausted.attempts,
                    message: exhausted.into_inner().to_string(),
                };
                self.observer.request_failed(&err.to_string());
                return Err(err);
            }
        };

        let analysis = normalize(&raw, self.observer.as_ref());
        let analysis_result = flatten(&analysis.to_json_map());
        let document_name = request.document_name().unwrap_or(UNNAMED_DOCUMENT);
        let limit = self.config.raw_content_limit;

        let record = ResponseRecord {
            id: request.id.clone().unwrap_or_else(new_record_id),
            document_name: document_name.to_string(),
            upload_time: request
                .upload_time()
                .map(str::to_string)
                .unwrap_or_else(now_rfc3339),
            analysis_result,
            raw_content: content.chars().take(limit).collect(),
            processed: true,
            processing_time: now_rfc3339(),
        };

        self.observer.request_completed(&record.id, start.elapsed());
        Ok(record)
    }
}

fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
