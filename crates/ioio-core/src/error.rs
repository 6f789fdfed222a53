//! # Error Types
//!
//! Structured errors for submission handling, built with `thiserror`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A submission field whose value is present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidField {
    /// Field name as submitted.
    pub field: String,
    /// Human-readable reason.
    pub reason: String,
}

/// A submission that cannot become a record. Client-correctable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields were absent or empty. Lists every one of
    /// them in the kind's reporting order.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// All required fields were present but some values could not be used.
    #[error("invalid field values: {}", describe(.0))]
    InvalidFields(Vec<InvalidField>),
}

fn describe(fields: &[InvalidField]) -> String {
    fields
        .iter()
        .map(|f| format!("{} ({})", f.field, f.reason))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The request body could not be read as a flat key-value payload at all.
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// The body was JSON but not an object.
    #[error("request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// The body was not valid JSON.
    #[error("malformed JSON body: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// The body was not a valid urlencoded form.
    #[error("malformed form body: {0}")]
    MalformedForm(String),
}
