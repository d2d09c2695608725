//! Chat messages for document analysis

use serde::Serialize;

/// A single chat-completions message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`
    pub role: &'static str,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

const ANALYSIS_INSTRUCTIONS: &str = r#"You analyze documents and extract structured metadata.
For the document you are given, identify:
- the main topics and themes
- the key entities mentioned
- a summary of the content (at most three paragraphs)
- the overall sentiment: "positive", "negative" or "neutral"

Reply with a single JSON object with the fields "topics" (array of strings),
"entities" (array of strings), "summary" (string), "sentiment" (string) and,
if you can estimate it, "confidence" (number between 0 and 1).
Do not add any text outside the JSON object."#;

const FEW_SHOT_EXAMPLES: &str = r#"Example 1:
Input: "We are pleased to announce our quarterly earnings of $2.5M, which exceeded expectations."
Output: {"topics": ["financial", "earnings report"], "entities": ["quarterly earnings", "$2.5M"], "summary": "The document announces quarterly earnings of $2.5M that exceeded expectations.", "sentiment": "positive"}

Example 2:
Input: "Customer complaints have increased by 15% this quarter, primarily regarding shipping delays."
Output: {"topics": ["customer service", "complaints", "logistics"], "entities": ["shipping delays", "15% increase"], "summary": "Customer complaints increased by 15% this quarter. The main issue is shipping delays.", "sentiment": "negative"}"#;

/// Build the message list sent for one document
///
/// Instructions first, then the worked examples, then the document itself.
pub fn build_messages(document: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(ANALYSIS_INSTRUCTIONS),
        ChatMessage::user(FEW_SHOT_EXAMPLES),
        ChatMessage::user(format!("Document to analyze: {}", document)),
    ]
}
