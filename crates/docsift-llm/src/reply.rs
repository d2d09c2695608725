//! Turn a model reply into a JSON value

use regex::Regex;
use serde_json::{json, Value};
use std::sync::LazyLock;
use tracing::warn;

/// First `{` to last `}`, across lines
static OBJECT_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid object regex"));

/// Parse the text of a model reply
///
/// Tries, in order: the whole reply as JSON, the body of a markdown code
/// fence, and the outermost `{...}` span. When nothing parses, returns an
/// object carrying an `error` and the `raw_response`; that object still flows
/// through normalization, which drops both keys and keeps schema defaults.
pub fn parse_reply(reply: &str) -> Value {
    let body = strip_code_fence(reply);

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return value;
    }

    if let Some(span) = OBJECT_SPAN.find(body) {
        if let Ok(value) = serde_json::from_str::<Value>(span.as_str()) {
            return value;
        }
    }

    warn!(
        "Could not parse model reply as JSON ({} chars)",
        reply.len()
    );
    json!({
        "error": "Failed to parse AI response",
        "raw_response": reply,
    })
}

/// Remove a surrounding markdown code fence, if any
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    // Drop the opening fence line (```json or ```) and the closing fence
    let without_open = match trimmed.find('\n') {
        Some(idx) => &trimmed[idx + 1..],
        None => return "",
    };
    without_open
        .trim_end()
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}
