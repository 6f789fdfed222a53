//! Optional inquiry fields whose store column may be text or numeric.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A scalar that round-trips in the shape it was received.
///
/// `bedrooms` may come back from the store as `3` or `"3"` depending on the
/// column type; both decode, and both serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    /// A JSON number.
    Number(Number),
    /// A JSON string.
    Text(String),
}

impl TextOrNumber {
    /// Numeric view, if the value is a number or a string holding one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for TextOrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TextOrNumber {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for TextOrNumber {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}
