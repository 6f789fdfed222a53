//! Hosted Record Store client (REST layer).
//!
//! ## Paths
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/rest/v1/{collection}` | Insert one row (`Prefer: return=representation`) |
//! | GET    | `/rest/v1/{collection}?select=*&order=created_at.desc` | List newest first |
//! | DELETE | `/rest/v1/{collection}?id=eq.{id}` | Delete by id (`Prefer: return=representation`) |
//!
//! Every request carries the access key twice: as the `apikey` header and as
//! a bearer token.

use async_trait::async_trait;
use ioio_core::{RecordId, RecordKind};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use crate::config::{ConfigError, StoreConfig};
use crate::error::{StoreError, StoreErrorBody};
use crate::RecordStore;

/// REST path prefix below the store's base URL.
const REST_PREFIX: &str = "rest/v1";

/// Asks the store to echo affected rows back.
const RETURN_REPRESENTATION: &str = "return=representation";

/// Client for the hosted Record Store.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    http: reqwest::Client,
    base_url: url::Url,
}

impl HttpRecordStore {
    /// Create a client from configuration.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(config.api_key.as_str())
            .map_err(|_| StoreError::Config(ConfigError::InvalidKey))?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key.as_str()))
            .map_err(|_| StoreError::Config(ConfigError::InvalidKey))?;
        bearer.set_sensitive(true);
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| StoreError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.url,
        })
    }

    fn table_url(&self, kind: RecordKind) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            REST_PREFIX,
            kind.collection()
        )
    }

    /// Turn a response into rows, mapping non-2xx statuses to
    /// [`StoreError::Api`].
    async fn read_rows(
        endpoint: &str,
        kind: RecordKind,
        resp: reqwest::Response,
    ) -> Result<Vec<Value>, StoreError> {
        let status = resp.status();
        let text = resp.text().await.map_err(|e| StoreError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })?;

        if !status.is_success() {
            return Err(StoreError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: StoreErrorBody::parse(&text),
            });
        }

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(rows)) => Ok(rows),
            Ok(Value::Null) => Ok(Vec::new()),
            Ok(single @ Value::Object(_)) => Ok(vec![single]),
            Ok(other) => Err(StoreError::Decode {
                endpoint: endpoint.to_string(),
                kind,
                reason: format!("expected an array of rows, got {other}"),
            }),
            Err(e) => Err(StoreError::Decode {
                endpoint: endpoint.to_string(),
                kind,
                reason: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn insert(&self, kind: RecordKind, row: Value) -> Result<Value, StoreError> {
        let endpoint = format!("POST /{REST_PREFIX}/{}", kind.collection());
        let url = self.table_url(kind);

        tracing::debug!(%kind, "inserting row into record store");
        let resp = self
            .http
            .post(&url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&[row])
            .send()
            .await
            .map_err(|e| StoreError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let mut rows = Self::read_rows(&endpoint, kind, resp).await?;
        if rows.len() != 1 {
            return Err(StoreError::UnexpectedRowCount {
                endpoint,
                kind,
                count: rows.len(),
            });
        }
        Ok(rows.remove(0))
    }

    async fn list(&self, kind: RecordKind) -> Result<Vec<Value>, StoreError> {
        let endpoint = format!("GET /{REST_PREFIX}/{}", kind.collection());
        let url = self.table_url(kind);

        let resp = self
            .http
            .get(&url)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(|e| StoreError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        Self::read_rows(&endpoint, kind, resp).await
    }

    async fn delete(&self, kind: RecordKind, id: &RecordId) -> Result<Value, StoreError> {
        let endpoint = format!("DELETE /{REST_PREFIX}/{}", kind.collection());
        let url = self.table_url(kind);

        let resp = self
            .http
            .delete(&url)
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(|e| StoreError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let mut rows = Self::read_rows(&endpoint, kind, resp).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound {
                kind,
                id: id.clone(),
            });
        }
        Ok(rows.swap_remove(0))
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_handles_trailing_slashes_and_paths() {
        let store =
            HttpRecordStore::new(StoreConfig::new("https://abc.example.com", "k").unwrap()).unwrap();
        assert_eq!(
            store.table_url(RecordKind::Property),
            "https://abc.example.com/rest/v1/properties"
        );

        let nested =
            HttpRecordStore::new(StoreConfig::new("https://abc.example.com/db/", "k").unwrap())
                .unwrap();
        assert_eq!(
            nested.table_url(RecordKind::Service),
            "https://abc.example.com/db/rest/v1/services"
        );
    }

    #[test]
    fn key_with_newline_is_rejected() {
        let config = StoreConfig::new("https://abc.example.com", "bad\nkey").unwrap();
        assert!(matches!(
            HttpRecordStore::new(config),
            Err(StoreError::Config(ConfigError::InvalidKey))
        ));
    }
}
