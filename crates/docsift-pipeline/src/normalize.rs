//! Coerce untrusted analyzer output into the fixed schema

use crate::render::render_text;
use docsift_domain::traits::AnalysisObserver;
use docsift_domain::NormalizedAnalysis;
use serde_json::{Map, Value};

/// Normalize a raw analysis into [`NormalizedAnalysis`]
///
/// Field by field:
/// - `topics`, `entities`: a sequence is copied (non-string elements are
///   rendered as text); a string is split on commas and each piece trimmed
/// - `summary`, `sentiment`: a string is copied; a sequence or mapping is
///   rendered as text
/// - `confidence`: a number overwrites `confidence_score`
///
/// Any other shape keeps the schema default and is reported through
/// `observer`. Unknown keys are dropped. This function never fails.
pub fn normalize(raw: &Value, observer: &dyn AnalysisObserver) -> NormalizedAnalysis {
    let mut result = NormalizedAnalysis::default();

    let Some(fields) = raw.as_object() else {
        let detail = format!("expected an object, got {}", kind(raw));
        observer.field_mismatch("<root>", &detail);
        return result;
    };

    if let Some(topics) = list_field(fields, "topics", observer) {
        result.topics = topics;
    }
    if let Some(entities) = list_field(fields, "entities", observer) {
        result.entities = entities;
    }
    if let Some(summary) = text_field(fields, "summary", observer) {
        result.summary = summary;
    }
    if let Some(sentiment) = text_field(fields, "sentiment", observer) {
        result.sentiment = sentiment;
    }
    if let Some(confidence) = fields.get("confidence").and_then(Value::as_f64) {
        result.confidence_score = confidence;
    }

    result
}

fn list_field(
    fields: &Map<String, Value>,
    field: &str,
    observer: &dyn AnalysisObserver,
) -> Option<Vec<String>> {
    match fields.get(field)? {
        Value::Array(items) => Some(items.iter().map(render_text).collect()),
        Value::String(s) => Some(s.split(',').map(|piece| piece.trim().to_string()).collect()),
        other => {
            let detail = format!("expected a sequence, got {}", kind(other));
            observer.field_mismatch(field, &detail);
            None
        }
    }
}

fn text_field(
    fields: &Map<String, Value>,
    field: &str,
    observer: &dyn AnalysisObserver,
) -> Option<String> {
    match fields.get(field)? {
        Value::String(s) => Some(s.clone()),
        value @ (Value::Array(_) | Value::Object(_)) => Some(render_text(value)),
        other => {
            let detail = format!("expected a string, got {}", kind(other));
            observer.field_mismatch(field, &detail);
            None
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
