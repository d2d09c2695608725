//! End-to-end tests for the orchestrator with scripted and mock analyzers

use docsift_domain::traits::{AnalysisObserver, RecordSink};
use docsift_domain::{AnalysisRequest, AnalyzerError, DocumentMetadata, FlatValue, ResponseRecord};
use docsift_llm::{MockAnalyzer, ScriptedAnalyzer};
use docsift_pipeline::{MemorySink, Orchestrator, PipelineConfig, PipelineError};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct EventLog {
    events: Mutex<Vec<String>>,
}

impl EventLog {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl AnalysisObserver for EventLog {
    fn request_received(&self, _id: Option<&str>, _content_len: usize) {
        self.push("received".to_string());
    }

    fn attempt_failed(&self, attempt: u32, _delay: Duration, _error: &str) {
        self.push(format!("attempt_failed:{attempt}"));
    }

    fn retries_exhausted(&self, attempts: u32, _error: &str) {
        self.push(format!("exhausted:{attempts}"));
    }

    fn field_mismatch(&self, field: &str, _reason: &str) {
        self.push(format!("mismatch:{field}"));
    }

    fn request_completed(&self, id: &str, _elapsed: Duration) {
        self.push(format!("completed:{id}"));
    }

    fn request_failed(&self, _error: &str) {
        self.push("failed".to_string());
    }
}

fn fast_config() -> PipelineConfig {
    PipelineConfig {
        base_delay_ms: 10,
        ..PipelineConfig::default()
    }
}

fn text<'a>(record: &'a ResponseRecord, key: &str) -> Option<&'a str> {
    record.analysis_result.get(key).and_then(FlatValue::as_str)
}

fn number(record: &ResponseRecord, key: &str) -> Option<f64> {
    record.analysis_result.get(key).and_then(FlatValue::as_f64)
}

#[tokio::test]
async fn test_missing_content_rejected_before_analysis() {
    let analyzer = ScriptedAnalyzer::new(json!({}));
    let orchestrator = Orchestrator::new(Arc::new(analyzer.clone()), fast_config());

    let body = json!({ "metadata": { "name": "empty.txt" } });
    let request: AnalysisRequest = serde_json::from_value(body).unwrap();
    let err = orchestrator.process(request).await.unwrap_err();

    assert_eq!(err, PipelineError::MissingField("documentContent".into()));
    assert_eq!(err.to_string(), "Missing required field: documentContent");
    assert!(err.is_client_error());
    assert_eq!(analyzer.call_count(), 0);
}

#[tokio::test]
async fn test_successful_analysis_builds_record() {
    let analyzer = ScriptedAnalyzer::new(json!({
        "topics": "finance, business",
        "entities": ["Acme Corp", "John Smith"],
        "summary": "Quarterly results.",
        "sentiment": "positive",
        "confidence": 0.92,
        "extra": "dropped"
    }));
    let orchestrator = Orchestrator::new(Arc::new(analyzer), fast_config());

    let request = AnalysisRequest::new("Acme Corp reported strong quarterly results.")
        .with_id("doc-42")
        .with_metadata(DocumentMetadata {
            name: Some("report.txt".to_string()),
            upload_time: Some("2026-01-15T10:00:00Z".to_string()),
        });

    let record = orchestrator.process(request).await.unwrap();

    assert_eq!(record.id, "doc-42");
    assert_eq!(record.document_name, "report.txt");
    assert_eq!(record.upload_time, "2026-01-15T10:00:00Z");
    assert!(record.processed);

    assert_eq!(record.analysis_result.len(), 5);
    assert_eq!(text(&record, "topics"), Some("[finance, business]"));
    assert_eq!(text(&record, "entities"), Some("[Acme Corp, John Smith]"));
    assert_eq!(text(&record, "summary"), Some("Quarterly results."));
    assert_eq!(text(&record, "sentiment"), Some("positive"));
    assert_eq!(number(&record, "confidence_score"), Some(0.92));
    assert!(!record.analysis_result.contains_key("extra"));
}

#[tokio::test]
async fn test_raw_content_truncated_by_characters() {
    let analyzer = ScriptedAnalyzer::new(json!({}));
    let orchestrator = Orchestrator::new(Arc::new(analyzer), fast_config());

    let document = "é".repeat(1500);
    let record = orchestrator
        .process(AnalysisRequest::new(document))
        .await
        .unwrap();

    assert_eq!(record.raw_content.chars().count(), 1000);
    assert!(record.raw_content.chars().all(|c| c == 'é'));
}

#[tokio::test]
async fn test_raw_content_limit_is_configurable() {
    let config = PipelineConfig {
        raw_content_limit: 5,
        ..fast_config()
    };
    let analyzer = ScriptedAnalyzer::new(json!({}));
    let orchestrator = Orchestrator::new(Arc::new(analyzer), config);

    let record = orchestrator
        .process(AnalysisRequest::new("abcdefghij"))
        .await
        .unwrap();
    assert_eq!(record.raw_content, "abcde");
}

#[tokio::test(start_paused = true)]
async fn test_transient_failures_are_retried() {
    let analyzer = ScriptedAnalyzer::new(json!({ "summary": "recovered" }))
        .then_fail(AnalyzerError::Communication("HTTP 503".to_string()))
        .then_fail(AnalyzerError::Timeout(30));
    let log = Arc::new(EventLog::default());
    let orchestrator = Orchestrator::new(Arc::new(analyzer.clone()), PipelineConfig::default())
        .with_observer(log.clone());

    let record = orchestrator
        .process(AnalysisRequest::new("text").with_id("r1"))
        .await
        .unwrap();

    assert_eq!(analyzer.call_count(), 3);
    assert_eq!(text(&record, "summary"), Some("recovered"));
    assert_eq!(
        log.events(),
        vec![
            "received",
            "attempt_failed:1",
            "attempt_failed:2",
            "completed:r1",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_retries_keep_original_message() {
    let error = AnalyzerError::Communication("HTTP 503: overloaded".into());
    let analyzer = ScriptedAnalyzer::always_failing(error);
    let log = Arc::new(EventLog::default());
    let orchestrator = Orchestrator::new(Arc::new(analyzer.clone()), PipelineConfig::default())
        .with_observer(log.clone());

    let err = orchestrator
        .process(AnalysisRequest::new("text"))
        .await
        .unwrap_err();

    assert_eq!(analyzer.call_count(), 4);
    assert_eq!(err.to_string(), "Communication error: HTTP 503: overloaded");
    assert!(matches!(
        err,
        PipelineError::ExhaustedRetries { attempts: 4, .. }
    ));
    assert!(!err.is_client_error());

    let events = log.events();
    assert_eq!(events.first().map(String::as_str), Some("received"));
    assert!(events.contains(&"exhausted:4".to_string()));
    assert_eq!(events.last().map(String::as_str), Some("failed"));
}

#[tokio::test]
async fn test_mismatched_fields_fall_back_to_defaults() {
    let analyzer = ScriptedAnalyzer::new(json!({ "topics": 7, "sentiment": true }));
    let log = Arc::new(EventLog::default());
    let orchestrator = Orchestrator::new(Arc::new(analyzer), fast_config())
        .with_observer(log.clone());

    let record = orchestrator
        .process(AnalysisRequest::new("text"))
        .await
        .unwrap();

    assert_eq!(text(&record, "topics"), Some("[]"));
    assert_eq!(text(&record, "sentiment"), Some("neutral"));
    let events = log.events();
    assert!(events.contains(&"mismatch:topics".to_string()));
    assert!(events.contains(&"mismatch:sentiment".to_string()));
}

#[tokio::test]
async fn test_unparseable_reply_normalizes_to_defaults() {
    let analyzer = ScriptedAnalyzer::new(json!({
        "error": "Failed to parse AI response",
        "raw_response": "I cannot help with that."
    }));
    let orchestrator = Orchestrator::new(Arc::new(analyzer), fast_config());

    let record = orchestrator
        .process(AnalysisRequest::new("text"))
        .await
        .unwrap();

    assert_eq!(text(&record, "summary"), Some(""));
    assert_eq!(number(&record, "confidence_score"), Some(0.0));
    assert!(!record.analysis_result.contains_key("error"));
}

#[tokio::test]
async fn test_mock_analyzer_records_reach_sink() {
    let orchestrator = Orchestrator::new(Arc::new(MockAnalyzer::new()), fast_config());
    let sink = MemorySink::new();

    let documents = [
        "We are pleased to report excellent growth and strong profit this quarter.",
        "Revenue declined and the outlook is poor after a difficult year of losses.",
    ];

    let mut records = Vec::new();
    for document in documents {
        let record = orchestrator
            .process(AnalysisRequest::new(document))
            .await
            .unwrap();
        records.push(record);
    }
    sink.store_batch(&records).await.unwrap();

    let stored = sink.records();
    assert_eq!(stored.len(), 2);
    assert_eq!(text(&stored[0], "sentiment"), Some("positive"));
    assert_eq!(text(&stored[1], "sentiment"), Some("negative"));
    let summary = text(&stored[0], "summary").unwrap_or_default();
    assert!(summary.starts_with("[MOCK ANALYSIS] "));
    assert_ne!(stored[0].id, stored[1].id);
}
