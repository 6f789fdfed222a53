//! Record Store error types.

use ioio_core::{RecordId, RecordKind};
use serde::{Deserialize, Serialize};

/// Error body returned by the store's REST layer.
///
/// Every field is optional; a non-JSON body ends up in `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl StoreErrorBody {
    /// Parse a response body, keeping the raw text when it is not the
    /// expected JSON shape.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<StoreErrorBody>(raw) {
            Ok(body) if !body.message.is_empty() => body,
            _ => Self {
                message: raw.trim().to_string(),
                ..Self::default()
            },
        }
    }
}

/// Errors from Record Store calls.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The store returned a non-2xx status.
    #[error("{} ({endpoint} returned {status})", .body.message)]
    Api {
        endpoint: String,
        status: u16,
        body: StoreErrorBody,
    },
    /// A row returned by the store could not be read.
    #[error("failed to decode {kind} row from {endpoint}: {reason}")]
    Decode {
        endpoint: String,
        kind: RecordKind,
        reason: String,
    },
    /// An insert did not come back as exactly one row.
    #[error("expected exactly one {kind} row from {endpoint}, got {count}")]
    UnexpectedRowCount {
        endpoint: String,
        kind: RecordKind,
        count: usize,
    },
    /// No row with the given id.
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: RecordId },
    /// Client configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl StoreError {
    /// The message a caller should surface: the store's own message for API
    /// errors, the display form otherwise.
    pub fn store_message(&self) -> String {
        match self {
            Self::Api { body, .. } => body.message.clone(),
            other => other.to_string(),
        }
    }

    /// Structured diagnostic detail for the error, if any.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Api { status, body, .. } => {
                let mut value = serde_json::to_value(body).ok()?;
                if let Some(obj) = value.as_object_mut() {
                    obj.insert("status".to_string(), serde_json::Value::from(*status));
                }
                Some(value)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rest_error_body() {
        let body = StoreErrorBody::parse(
            r#"{"message":"null value in column \"email\"","code":"23502","details":null,"hint":null}"#,
        );
        assert_eq!(body.code.as_deref(), Some("23502"));
        assert!(body.message.contains("email"));
    }

    #[test]
    fn non_json_body_becomes_message() {
        let body = StoreErrorBody::parse("  upstream timeout \n");
        assert_eq!(body.message, "upstream timeout");
        assert!(body.code.is_none());
    }

    #[test]
    fn store_message_prefers_api_message() {
        let err = StoreError::Api {
            endpoint: "POST /rest/v1/properties".into(),
            status: 400,
            body: StoreErrorBody::parse(r#"{"message":"bad column"}"#),
        };
        assert_eq!(err.store_message(), "bad column");
        let details = err.details().unwrap();
        assert_eq!(details["status"], 400);
        assert_eq!(details["message"], "bad column");
    }

    #[test]
    fn not_found_has_no_details() {
        let err = StoreError::NotFound {
            kind: RecordKind::Service,
            id: RecordId::Int(3),
        };
        assert_eq!(err.to_string(), "service 3 not found");
        assert!(err.details().is_none());
    }
}
