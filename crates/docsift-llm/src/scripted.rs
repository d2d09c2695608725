//! Scripted analyzer for deterministic testing
//!
//! Returns queued results in order, then falls back to a fixed outcome. Every
//! call is counted, which lets tests assert how often the pipeline retried or
//! whether the analyzer was reached at all.

use async_trait::async_trait;
use docsift_domain::traits::Analyzer;
use docsift_domain::AnalyzerError;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Analyzer driven by a script of canned outcomes
///
/// # Examples
///
/// ```
/// use docsift_llm::ScriptedAnalyzer;
/// use docsift_domain::AnalyzerError;
/// use serde_json::json;
///
/// let analyzer = ScriptedAnalyzer::new(json!({"summary": "ok"}))
///     .then_fail(AnalyzerError::Communication("HTTP 429".into()));
/// assert_eq!(analyzer.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedAnalyzer {
    fallback: Result<Value, AnalyzerError>,
    script: Arc<Mutex<VecDeque<Result<Value, AnalyzerError>>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedAnalyzer {
    /// Analyzer that always returns `response` once the script is empty
    pub fn new(response: Value) -> Self {
        Self {
            fallback: Ok(response),
            script: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Analyzer that always fails with `error` once the script is empty
    pub fn always_failing(error: AnalyzerError) -> Self {
        Self {
            fallback: Err(error),
            script: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queue a successful result
    pub fn then_respond(self, response: Value) -> Self {
        self.push(Ok(response));
        self
    }

    /// Queue a failure
    pub fn then_fail(self, error: AnalyzerError) -> Self {
        self.push(Err(error));
        self
    }

    /// Number of times `analyze` was called
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(&self, outcome: Result<Value, AnalyzerError>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }
}

#[async_trait]
impl Analyzer for ScriptedAnalyzer {
    async fn analyze(&self, _text: &str) -> Result<Value, AnalyzerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        next.unwrap_or_else(|| self.fallback.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
