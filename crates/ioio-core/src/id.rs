//! # Record Identifiers
//!
//! Ids are assigned by the Record Store and are opaque to this service. A
//! hosted store hands out either integer identity columns or text keys, so
//! [`RecordId`] accepts both and serializes back in the shape it was given.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque record identifier assigned by the Record Store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Integer identity column.
    Int(i64),
    /// Text key (uuid or any other string).
    Text(String),
}

impl RecordId {
    /// Parse an id from a URL path segment. Decimal integers become
    /// [`RecordId::Int`], everything else is kept as text.
    pub fn from_path(segment: &str) -> Self {
        match segment.parse::<i64>() {
            Ok(n) => Self::Int(n),
            Err(_) => Self::Text(segment.to_string()),
        }
    }

    /// True if this id equals the JSON value stored in a row's `id` field.
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match (self, value) {
            (Self::Int(n), serde_json::Value::Number(v)) => v.as_i64() == Some(*n),
            (Self::Int(n), serde_json::Value::String(s)) => s == &n.to_string(),
            (Self::Text(t), serde_json::Value::String(s)) => s == t,
            (Self::Text(t), serde_json::Value::Number(v)) => v.to_string() == *t,
            _ => false,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}
