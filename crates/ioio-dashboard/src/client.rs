//! HTTP client for the Submission API's list and delete endpoints.

use ioio_core::{RecordId, RecordKind};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

/// Default API base when `IOIO_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";

/// One record as returned by the API. Kept as a field map so filtering and
/// the detail view see every field, including ones added later.
pub type Row = Map<String, Value>;

/// Errors talking to the Submission API.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The configured API base is not a usable URL.
    #[error("invalid API URL '{0}': {1}")]
    InvalidBaseUrl(String, String),

    /// Transport failure (connection refused, DNS, reset).
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a failure.
    #[error("{endpoint} returned {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The API answered 2xx with a body that is not the expected envelope.
    #[error("unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

impl DashboardError {
    /// Short message suitable for showing to a user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// `{ success, message?, data? }` envelope used by every API response.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    data: Option<T>,
}

/// Client for the Submission API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the API rooted at `base`, e.g. `http://localhost:5001/api`.
    pub fn new(base: &str) -> Result<Self, DashboardError> {
        let base_url = Url::parse(base)
            .map_err(|e| DashboardError::InvalidBaseUrl(base.to_string(), e.to_string()))?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|source| DashboardError::Http {
                endpoint: "client_init".into(),
                source,
            })?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, kind: RecordKind) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            kind.api_segment()
        )
    }

    /// All records of a kind, newest first.
    pub async fn list(&self, kind: RecordKind) -> Result<Vec<Row>, DashboardError> {
        let endpoint = self.endpoint(kind);
        let resp = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|source| DashboardError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;
        let envelope: Envelope<Vec<Row>> = Self::read(&endpoint, resp).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Delete one record and return it.
    pub async fn delete(&self, kind: RecordKind, id: &RecordId) -> Result<Row, DashboardError> {
        let endpoint = format!("{}/{id}", self.endpoint(kind));
        let resp = self
            .http
            .delete(&endpoint)
            .send()
            .await
            .map_err(|source| DashboardError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;
        let envelope: Envelope<Row> = Self::read(&endpoint, resp).await?;
        envelope.data.ok_or_else(|| DashboardError::Decode {
            endpoint,
            reason: "response carries no deleted record".into(),
        })
    }

    /// Decode an envelope, turning failure statuses and `success: false`
    /// into [`DashboardError::Api`].
    async fn read<T: serde::de::DeserializeOwned>(
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<Envelope<T>, DashboardError> {
        let status = resp.status();
        let text = resp.text().await.map_err(|source| DashboardError::Http {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let parsed = serde_json::from_str::<Envelope<T>>(&text);
        match parsed {
            Ok(envelope) if status.is_success() && envelope.success => Ok(envelope),
            Ok(envelope) => Err(DashboardError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: match (envelope.message, envelope.error) {
                    (Some(message), Some(error)) => format!("{message}: {error}"),
                    (Some(message), None) => message,
                    (None, Some(error)) => error,
                    (None, None) => format!("request failed with status {status}"),
                },
            }),
            Err(_) if !status.is_success() => Err(DashboardError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: if text.trim().is_empty() {
                    format!("request failed with status {status}")
                } else {
                    text
                },
            }),
            Err(e) => Err(DashboardError::Decode {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
