//! Success envelopes shared by the handlers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message reported by the health endpoint.
pub const HEALTH_MESSAGE: &str = "IOIO Backend is running!";

/// `{ success: true, message?, data }` wrapper around a payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Always `true`.
    pub success: bool,
    /// Present on writes ("Property submitted", "Service deleted").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The record or records.
    pub data: T,
}

impl<T> Envelope<T> {
    /// Envelope without a message, used by list responses.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    /// Envelope with a message.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `true`.
    pub success: bool,
    /// Fixed liveness message.
    pub message: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            success: true,
            message: HEALTH_MESSAGE.to_string(),
        }
    }
}
