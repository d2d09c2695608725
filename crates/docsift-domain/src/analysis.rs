//! The fixed analysis schema

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Default sentiment when the analyzer does not provide one
pub const DEFAULT_SENTIMENT: &str = "neutral";

/// Analysis result coerced into a fixed schema
///
/// All five fields are always present. `sentiment` is expected to be one of
/// `positive`, `negative` or `neutral`, but other values pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAnalysis {
    /// Main topics and themes
    pub topics: Vec<String>,

    /// Key entities mentioned
    pub entities: Vec<String>,

    /// Short summary of the content
    pub summary: String,

    /// Overall sentiment label
    pub sentiment: String,

    /// Model-reported confidence, 0.0 when not reported
    pub confidence_score: f64,
}

impl Default for NormalizedAnalysis {
    fn default() -> Self {
        Self {
            topics: Vec::new(),
            entities: Vec::new(),
            summary: String::new(),
            sentiment: DEFAULT_SENTIMENT.to_string(),
            confidence_score: 0.0,
        }
    }
}

impl NormalizedAnalysis {
    /// Convert into a JSON object with exactly the five schema keys
    ///
    /// A non-finite `confidence_score` becomes `null`, matching how JSON
    /// serializers treat NaN and infinities.
    pub fn to_json_map(&self) -> Map<String, Value> {
        let confidence = Number::from_f64(self.confidence_score)
            .map(Value::Number)
            .unwrap_or(Value::Null);
        let fields = [
            ("topics", string_array(&self.topics)),
            ("entities", string_array(&self.entities)),
            ("summary", Value::from(self.summary.as_str())),
            ("sentiment", Value::from(self.sentiment.as_str())),
            ("confidence_score", confidence),
        ];
        fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }
}

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let analysis = NormalizedAnalysis::default();
        assert!(analysis.topics.is_empty());
        assert!(analysis.entities.is_empty());
        assert_eq!(analysis.summary, "");
        assert_eq!(analysis.sentiment, "neutral");
        assert_eq!(analysis.confidence_score, 0.0);
    }

    #[test]
    fn test_serializes_all_five_keys() {
        let value = serde_json::to_value(NormalizedAnalysis::default()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        for key in ["topics", "entities", "summary", "sentiment", "confidence_score"] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn test_to_json_map_matches_serde() {
        let analysis = NormalizedAnalysis {
            topics: vec!["finance".to_string()],
            entities: vec!["Acme".to_string(), "$2.5M".to_string()],
            summary: "Earnings rose.".to_string(),
            sentiment: "positive".to_string(),
            confidence_score: 0.75,
        };

        let manual = Value::Object(analysis.to_json_map());
        let derived = serde_json::to_value(&analysis).unwrap();
        assert_eq!(manual, derived);
    }

    #[test]
    fn test_non_finite_confidence_becomes_null() {
        let analysis = NormalizedAnalysis {
            confidence_score: f64::NAN,
            ..NormalizedAnalysis::default()
        };
        assert_eq!(analysis.to_json_map()["confidence_score"], Value::Null);
    }
}
