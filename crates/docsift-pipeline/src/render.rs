//! Textual rendering of JSON values

use serde_json::Value;

/// Render a value as display text
///
/// Strings render bare, sequences as `[a, b]` with elements rendered the same
/// way, and everything else (numbers, booleans, null, objects) as compact JSON.
pub fn render_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(render_text).collect();
            format!("[{}]", parts.join(", "))
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_scalars() {
        assert_eq!(render_text(&json!("plain")), "plain");
        assert_eq!(render_text(&json!(42)), "42");
        assert_eq!(render_text(&json!(true)), "true");
        assert_eq!(render_text(&json!(null)), "null");
    }

    #[test]
    fn test_render_sequences() {
        assert_eq!(render_text(&json!(["a", "b"])), "[a, b]");
        assert_eq!(render_text(&json!([])), "[]");
        assert_eq!(render_text(&json!([1, ["x", 2]])), "[1, [x, 2]]");
    }

    #[test]
    fn test_render_object_as_json() {
        assert_eq!(render_text(&json!({"k": "v"})), r#"{"k":"v"}"#);
    }
}
