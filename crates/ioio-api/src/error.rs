//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every failure answers with the same JSON shape: `success: false`, a
//! human-readable `message`, and whichever of `missingFields`,
//! `invalidFields`, `error`, `details` and `requestData` apply.
//!
//! | Variant       | Status | Message                                |
//! |---------------|--------|----------------------------------------|
//! | `Validation`  | 400    | `Missing required fields` / `Invalid field values` |
//! | `NotFound`    | 404    | `<Kind> not found`                     |
//! | `Store`       | 500    | `Error submitting <kind>` / `Error fetching <kinds>` / `Error deleting <kind>` |
//! | `Unexpected`  | 500    | `Unexpected error <operation> <kind(s)>` |

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ioio_core::{InvalidField, RecordId, RecordKind, ValidationError};
use ioio_store_client::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Every absent required field (validation failures).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
    /// Fields whose values could not be used (validation failures).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub invalid_fields: Option<Vec<InvalidField>>,
    /// Underlying error message (store and unexpected failures).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Structured store diagnostics, when the store supplied them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
    /// The row that the store rejected (service submissions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub request_data: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            missing_fields: None,
            invalid_fields: None,
            error: None,
            details: None,
            request_data: None,
        }
    }
}

/// What a handler was doing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Creating a record.
    Submit,
    /// Listing records.
    Fetch,
    /// Deleting a record.
    Delete,
}

impl Operation {
    /// Phrase used in messages: "submitting property", "fetching properties".
    fn phrase(self, kind: RecordKind) -> String {
        match self {
            Self::Submit => format!("submitting {}", kind.singular()),
            Self::Fetch => format!("fetching {}", kind.plural()),
            Self::Delete => format!("deleting {}", kind.singular()),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit => f.write_str("submit"),
            Self::Fetch => f.write_str("fetch"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The submission is missing required fields or carries unusable values (400).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No record with the given id (404).
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: RecordId },

    /// The Record Store rejected or failed the operation (500).
    #[error("store error during {operation} {kind}: {source}")]
    Store {
        kind: RecordKind,
        operation: Operation,
        source: StoreError,
        request_data: Option<serde_json::Value>,
    },

    /// Anything else, e.g. an unreadable request body (500).
    #[error("unexpected error during {operation} {kind}: {message}")]
    Unexpected {
        kind: RecordKind,
        operation: Operation,
        message: String,
    },
}

impl ApiError {
    /// Wrap a store failure, turning `NotFound` into [`ApiError::NotFound`].
    pub fn from_store(kind: RecordKind, operation: Operation, source: StoreError) -> Self {
        match source {
            StoreError::NotFound { kind, id } => Self::NotFound { kind, id },
            source => Self::Store {
                kind,
                operation,
                source,
                request_data: None,
            },
        }
    }

    /// Attach the rejected row to a store error. Other variants are unchanged.
    pub fn with_request_data(self, data: Option<serde_json::Value>) -> Self {
        match self {
            Self::Store {
                kind,
                operation,
                source,
                ..
            } => Self::Store {
                kind,
                operation,
                source,
                request_data: data,
            },
            other => other,
        }
    }

    /// Return the HTTP status code for this error.
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store { .. } | Self::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the response body for this error.
    fn body(&self) -> ErrorResponse {
        match self {
            Self::Validation(ValidationError::MissingFields(fields)) => ErrorResponse {
                missing_fields: Some(fields.clone()),
                ..ErrorResponse::new("Missing required fields")
            },
            Self::Validation(ValidationError::InvalidFields(fields)) => ErrorResponse {
                invalid_fields: Some(fields.clone()),
                ..ErrorResponse::new("Invalid field values")
            },
            Self::NotFound { kind, .. } => ErrorResponse::new(format!("{} not found", kind.title())),
            Self::Store {
                kind,
                operation,
                source,
                request_data,
            } => ErrorResponse {
                error: Some(source.store_message()),
                details: source.details(),
                request_data: request_data.clone(),
                ..ErrorResponse::new(format!("Error {}", operation.phrase(*kind)))
            },
            Self::Unexpected {
                kind,
                operation,
                message,
            } => ErrorResponse {
                error: Some(message.clone()),
                ..ErrorResponse::new(format!("Unexpected error {}", operation.phrase(*kind)))
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server-side failures for operator visibility.
        match &self {
            Self::Store { source, .. } => {
                tracing::error!(error = %self, store_message = %source.store_message(), "record store error");
            }
            Self::Unexpected { .. } => tracing::error!(error = %self, "unexpected error"),
            Self::Validation(_) | Self::NotFound { .. } => tracing::info!(error = %self, "request rejected"),
        }

        (status, Json(self.body())).into_response()
    }
}
