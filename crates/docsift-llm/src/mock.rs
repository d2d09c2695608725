//! Heuristic analyzer for development without a model endpoint
//!
//! Produces a plausible analysis from keyword counts and capitalization
//! patterns. Deterministic: the same text always yields the same result.

use async_trait::async_trait;
use docsift_domain::traits::Analyzer;
use docsift_domain::AnalyzerError;
use regex::Regex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::{debug, info};

/// Summary prefix marking heuristic output
pub const SUMMARY_PREFIX: &str = "[MOCK ANALYSIS] ";

/// Characters of the document carried into the summary
pub const SUMMARY_CHARS: usize = 200;

/// Upper bound on reported entities
pub const MAX_ENTITIES: usize = 5;

/// Number of reported topics
pub const MAX_TOPICS: usize = 3;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "positive", "success", "happy", "pleased", "increase", "profit",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "poor", "negative", "fail", "decrease", "problem", "issue", "complaint", "loss",
];

const DEFAULT_ENTITIES: &[&str] = &["Document", "Content", "Analysis"];
const DEFAULT_TOPICS: &[&str] = &["document", "analysis", "content"];

/// Capitalized word pairs, capitalized words, currency amounts, percentages
const ENTITY_REGEX: &str =
    r"\b[A-Z][a-z]+ [A-Z][a-z]+\b|\b[A-Z][a-z]+\b|\$\d+(?:\.\d+)?[KMB]?|\d+%";

static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ENTITY_REGEX).expect("valid entity regex"));

static LONG_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[a-zA-Z]{5,}\b")
        .expect("long word pattern is valid")
});

static TOPIC_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[a-zA-Z]{4,}\b")
        .expect("topic word pattern is valid")
});

/// Keyword-heuristic analyzer
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAnalyzer;

impl MockAnalyzer {
    /// Create a new MockAnalyzer
    pub fn new() -> Self {
        Self
    }

    /// Generate an analysis object for the text
    pub fn generate(&self, text: &str) -> Value {
        let topics = topics(text);
        let entities = entities(text);

        debug!(
            "Heuristic analysis: topics={:?}, entities={:?}",
            topics, entities
        );

        json!({
            "topics": topics,
            "entities": entities,
            "summary": format!("{}{}", SUMMARY_PREFIX, summary(text)),
            "sentiment": sentiment(text),
        })
    }
}

#[async_trait]
impl Analyzer for MockAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Value, AnalyzerError> {
        info!(
            "Generating heuristic analysis for {} chars",
            text.chars().count()
        );
        Ok(self.generate(text))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn summary(text: &str) -> String {
    if text.chars().count() > SUMMARY_CHARS {
        let head: String = text.chars().take(SUMMARY_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn sentiment(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    let count = |words: &[&str]| words.iter().filter(|w| lower.contains(*w)).count();

    let positive = count(POSITIVE_WORDS);
    let negative = count(NEGATIVE_WORDS);

    if positive > negative {
        "positive"
    } else if negative > positive {
        "negative"
    } else {
        "neutral"
    }
}

fn entities(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in ENTITY_PATTERN.find_iter(text) {
        if found.len() == MAX_ENTITIES {
            break;
        }
        if !found.iter().any(|e| e == m.as_str()) {
            found.push(m.as_str().to_string());
        }
    }

    if found.is_empty() {
        found = LONG_WORD
            .find_iter(text)
            .take(3)
            .map(|m| capitalize(m.as_str()))
            .collect();
    }

    if found.is_empty() {
        found = DEFAULT_ENTITIES.iter().map(|s| s.to_string()).collect();
    }

    found
}

fn topics(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();

    // First-appearance order breaks ties in the stable sort below
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for m in TOPIC_WORD.find_iter(&lower) {
        let count = counts.entry(m.as_str()).or_insert(0);
        if *count == 0 {
            order.push(m.as_str());
        }
        *count += 1;
    }

    if order.is_empty() {
        return DEFAULT_TOPICS.iter().map(|s| s.to_string()).collect();
    }

    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order
        .into_iter()
        .take(MAX_TOPICS)
        .map(str::to_string)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest: String = chars.flat_map(char::to_lowercase).collect();
    format!("{}{}", first.to_uppercase(), rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_sentiment() {
        let text = "We are pleased with the excellent profit.";
        assert_eq!(sentiment(text), "positive");
    }

    #[test]
    fn test_negative_sentiment() {
        let text = "A complaint about the loss and the problem.";
        assert_eq!(sentiment(text), "negative");
    }

    #[test]
    fn test_balanced_sentiment_is_neutral() {
        assert_eq!(sentiment("Good news and bad news."), "neutral");
        assert_eq!(sentiment("The sky is blue."), "neutral");
    }

    #[test]
    fn test_entities_in_order_of_appearance() {
        let found = entities("John Smith met Jane Doe in Paris. Sales grew 15% to $2.5M.");
        assert_eq!(
            found,
            vec!["John Smith", "Jane Doe", "Paris", "Sales", "15%"]
        );
    }

    #[test]
    fn test_entities_are_unique() {
        let found = entities("Paris and Paris and Paris.");
        assert_eq!(found, vec!["Paris"]);
    }

    #[test]
    fn test_entities_fall_back_to_long_words() {
        let found = entities("the quick brown foxes jumped");
        assert_eq!(found, vec!["Quick", "Brown", "Foxes"]);
    }

    #[test]
    fn test_entities_fall_back_to_defaults() {
        assert_eq!(entities("a b c"), vec!["Document", "Content", "Analysis"]);
    }

    #[test]
    fn test_topics_by_frequency() {
        let found = topics("data pipeline data storage data pipeline rust");
        assert_eq!(found, vec!["data", "pipeline", "storage"]);
    }

    #[test]
    fn test_topics_fall_back_to_defaults() {
        assert_eq!(topics("a b c"), vec!["document", "analysis", "content"]);
    }

    #[test]
    fn test_summary_truncation() {
        let short = "Short document.";
        assert_eq!(summary(short), short);

        let long = "x".repeat(250);
        let s = summary(&long);
        assert_eq!(s.chars().count(), SUMMARY_CHARS + 3);
        assert!(s.ends_with("..."));
    }

    #[test]
    fn test_generate_shape() {
        let text = "We are pleased to announce our quarterly earnings of $2.5M.";
        let value = MockAnalyzer::new().generate(text);
        assert_eq!(value["sentiment"], "positive");
        let summary = value["summary"].as_str().unwrap();
        assert!(summary.starts_with(SUMMARY_PREFIX));
        assert_eq!(value["entities"], json!(["We", "$2.5M"]));
        assert_eq!(value["topics"], json!(["pleased", "announce", "quarterly"]));
    }

    #[tokio::test]
    async fn test_analyze_never_fails() {
        let analyzer = MockAnalyzer::new();
        let result = analyzer.analyze("").await.unwrap();
        assert_eq!(result["summary"], SUMMARY_PREFIX);
        assert_eq!(analyzer.name(), "mock");
    }
}
