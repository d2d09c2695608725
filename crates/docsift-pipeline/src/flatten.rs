//! Flatten nested JSON into a single-level record
//!
//! Keys of nested mappings are joined with a separator (`_` by default):
//!
//! ```text
//! {"person": {"address": {"street": "123 Main St"}}}  →  {"person_address_street": "123 Main St"}
//! {"people": [{"name": "John"}, {"name": "Jane"}]}    →  {"people_0_name": "John", "people_1_name": "Jane"}
//! {"topics": ["finance", "business"]}                 →  {"topics": "[finance, business]"}
//! ```
//!
//! A sequence is expanded by index only when its first element is a mapping;
//! any other sequence is stored as one text value. `serde_json::Value` is a
//! tree, so there is no cycle handling.

use crate::render::render_text;
use docsift_domain::{FlatRecord, FlatValue};
use serde_json::{Map, Value};

/// Default key separator
pub const DEFAULT_SEPARATOR: &str = "_";

/// Flatten a mapping with no prefix and the default separator
pub fn flatten(map: &Map<String, Value>) -> FlatRecord {
    flatten_with(map, "", DEFAULT_SEPARATOR)
}

/// Flatten a mapping, prefixing every key with `prefix` (if non-empty)
///
/// Entries are visited in input order, so on a key collision the entry that
/// appears later in the input wins.
pub fn flatten_with(map: &Map<String, Value>, prefix: &str, separator: &str) -> FlatRecord {
    let mut out = FlatRecord::new();
    flatten_map(map, prefix, separator, &mut out);
    out
}

fn flatten_map(map: &Map<String, Value>, prefix: &str, separator: &str, out: &mut FlatRecord) {
    for (key, value) in map {
        let child_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}{}{}", prefix, separator, key)
        };
        flatten_value(&child_key, value, separator, out);
    }
}

fn flatten_value(key: &str, value: &Value, separator: &str, out: &mut FlatRecord) {
    match value {
        Value::Object(map) => flatten_map(map, key, separator, out),
        Value::Array(items) if items.first().is_some_and(Value::is_object) => {
            for (index, item) in items.iter().enumerate() {
                let indexed = format!("{}{}{}", key, separator, index);
                flatten_value(&indexed, item, separator, out);
            }
        }
        _ => {
            let flat = FlatValue::from_scalar(value)
                .unwrap_or_else(|| FlatValue::Text(render_text(value)));
            out.insert(key, flat);
        }
    }
}
