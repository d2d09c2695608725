//! Single-level records for document-database storage

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// A scalar value in a [`FlatRecord`]
///
/// Serializes as the bare JSON scalar, so a `FlatRecord` round-trips through
/// JSON as an ordinary object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlatValue {
    /// JSON null
    Null,
    /// Boolean
    Bool(bool),
    /// Integer or float
    Number(Number),
    /// Text, including stringified lists
    Text(String),
}

impl FlatValue {
    /// Convert a JSON scalar; returns `None` for arrays and objects
    pub fn from_scalar(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(FlatValue::Null),
            Value::Bool(b) => Some(FlatValue::Bool(*b)),
            Value::Number(n) => Some(FlatValue::Number(n.clone())),
            Value::String(s) => Some(FlatValue::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Text content, if this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlatValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content as f64, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FlatValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

impl From<FlatValue> for Value {
    fn from(value: FlatValue) -> Self {
        match value {
            FlatValue::Null => Value::Null,
            FlatValue::Bool(b) => Value::Bool(b),
            FlatValue::Number(n) => Value::Number(n),
            FlatValue::Text(s) => Value::String(s),
        }
    }
}

impl From<&str> for FlatValue {
    fn from(s: &str) -> Self {
        FlatValue::Text(s.to_string())
    }
}

impl From<String> for FlatValue {
    fn from(s: String) -> Self {
        FlatValue::Text(s)
    }
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatValue::Null => write!(f, "null"),
            FlatValue::Bool(b) => write!(f, "{}", b),
            FlatValue::Number(n) => write!(f, "{}", n),
            FlatValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A mapping from key to scalar with no nesting
///
/// Keys are kept sorted so that serialized records are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatRecord(BTreeMap<String, FlatValue>);

impl FlatRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FlatValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&FlatValue> {
        self.0.get(key)
    }

    /// Whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, FlatValue> {
        self.0.iter()
    }

    /// Keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Convert back into a JSON object
    pub fn to_json_map(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.clone())))
            .collect()
    }
}

impl IntoIterator for FlatRecord {
    type Item = (String, FlatValue);
    type IntoIter = btree_map::IntoIter<String, FlatValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatRecord {
    type Item = (&'a String, &'a FlatValue);
    type IntoIter = btree_map::Iter<'a, String, FlatValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<FlatRecord> for Value {
    fn from(record: FlatRecord) -> Self {
        Value::Object(record.to_json_map())
    }
}
