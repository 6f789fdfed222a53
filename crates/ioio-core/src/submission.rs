//! # Submissions
//!
//! A [`Submission`] is the flat key-value payload of a form post, either a
//! JSON object or urlencoded pairs. It answers two questions per field: is it
//! present, and what is its textual value.
//!
//! ## Presence rules
//!
//! | Raw value                    | Classified as            |
//! |------------------------------|--------------------------|
//! | absent, `null`, `false`, `0` | [`FieldValue::Missing`]  |
//! | string, empty after trimming | [`FieldValue::Missing`]  |
//! | other string                 | [`FieldValue::Text`]     |
//! | non-zero number, `true`      | [`FieldValue::Text`] (stringified) |
//! | array, object                | [`FieldValue::Invalid`]  |

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::SubmissionError;

/// Classification of a single submitted field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Absent or empty.
    Missing,
    /// A usable scalar, as text.
    Text(String),
    /// Present but not a scalar.
    Invalid(&'static str),
}

/// A flat key-value request payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    fields: BTreeMap<String, Value>,
}

impl Submission {
    /// Build a submission from a parsed JSON value. Only objects are accepted.
    pub fn from_json(value: Value) -> Result<Self, SubmissionError> {
        match value {
            Value::Object(map) => Ok(Self {
                fields: map.into_iter().collect(),
            }),
            Value::Null => Err(SubmissionError::NotAnObject("null")),
            Value::Bool(_) => Err(SubmissionError::NotAnObject("a boolean")),
            Value::Number(_) => Err(SubmissionError::NotAnObject("a number")),
            Value::String(_) => Err(SubmissionError::NotAnObject("a string")),
            Value::Array(_) => Err(SubmissionError::NotAnObject("an array")),
        }
    }

    /// Parse a JSON request body.
    ///
    /// An empty body is treated as an empty object so that every required
    /// field is reported as missing rather than failing the parse.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, SubmissionError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_json(value)
    }

    /// Build a submission from decoded urlencoded pairs. Later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        }
    }

    /// Classify one field.
    pub fn field(&self, name: &str) -> FieldValue {
        match self.fields.get(name) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => FieldValue::Missing,
            Some(Value::String(s)) if s.trim().is_empty() => FieldValue::Missing,
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => FieldValue::Missing,
            Some(Value::String(s)) => FieldValue::Text(s.clone()),
            Some(Value::Number(n)) => FieldValue::Text(n.to_string()),
            Some(Value::Bool(true)) => FieldValue::Text("true".to_string()),
            Some(Value::Array(_)) => FieldValue::Invalid("expected a single value, got a list"),
            Some(Value::Object(_)) => FieldValue::Invalid("expected a single value, got an object"),
        }
    }

    /// True if the field is absent or empty.
    pub fn is_missing(&self, name: &str) -> bool {
        self.field(name) == FieldValue::Missing
    }

    /// Names from `required` that are missing, in the order given.
    pub fn missing_fields(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| self.is_missing(name))
            .map(|name| (*name).to_string())
            .collect()
    }

    /// Parse a field as a signed integer.
    ///
    /// JSON integers are taken as-is; strings must contain nothing but an
    /// optionally signed decimal integer (surrounding whitespace allowed).
    pub fn integer(&self, name: &str) -> Result<i64, String> {
        match self.fields.get(name) {
            Some(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| format!("must be an integer, got {n}")),
            Some(Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("must be an integer, got {s:?}")),
            Some(_) => Err("must be an integer".to_string()),
            None => Err("is required".to_string()),
        }
    }

    /// Raw view of the submitted fields.
    pub fn as_map(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Number of submitted keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
