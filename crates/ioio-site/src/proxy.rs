//! # `/api` Reverse Proxy
//!
//! Forwards every request under `/api` to the Submission API so that the
//! site's scripts can address it with relative paths.
//!
//! - Method, path, query and body are forwarded unchanged.
//! - Hop-by-hop headers and `Host` are dropped in both directions; the
//!   upstream sees its own host.
//! - Upstream status, headers and body are relayed as-is, including error
//!   statuses. Redirects are relayed, not followed.

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap, HeaderName};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http_body_util::LengthLimitError;
use thiserror::Error;
use url::Url;

/// Largest request body the proxy will buffer.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Headers that describe a single connection and must not be forwarded.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// Errors raised while forwarding a request.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The HTTP client could not be built.
    #[error("failed to build proxy client: {0}")]
    Client(#[source] reqwest::Error),

    /// The incoming body exceeded [`MAX_BODY_BYTES`].
    #[error("request body exceeds the proxy limit")]
    TooLarge,

    /// The incoming body could not be read, e.g. the client disconnected.
    #[error("request body unreadable: {0}")]
    Body(String),

    /// The backend could not be reached or did not answer.
    #[error("backend request to {url} failed: {source}")]
    Upstream {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::TooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large"),
            Self::Body(_) => (StatusCode::BAD_REQUEST, "Invalid request body"),
            Self::Client(_) | Self::Upstream { .. } => {
                (StatusCode::BAD_GATEWAY, "Backend unavailable")
            }
        };
        match &self {
            Self::TooLarge | Self::Body(_) => tracing::info!(error = %self, "request rejected"),
            Self::Client(_) | Self::Upstream { .. } => tracing::error!(error = %self, "proxy error"),
        }
        let body = serde_json::json!({
            "success": false,
            "message": message,
            "error": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

/// Shared proxy state: one pooled client and the target base URL.
#[derive(Debug, Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    backend: Url,
}

impl ProxyState {
    /// Build a proxy targeting `backend`.
    pub fn new(backend: Url) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(ProxyError::Client)?;
        Ok(Self { client, backend })
    }

    /// Target URL for an incoming path and query.
    pub fn target_url(&self, path_and_query: &str) -> String {
        format!(
            "{}{}",
            self.backend.as_str().trim_end_matches('/'),
            path_and_query
        )
    }
}

/// Map a body read failure: only the length limit is a 413.
fn body_error(err: axum::Error) -> ProxyError {
    let inner = err.into_inner();
    let mut cause: Option<&(dyn std::error::Error + 'static)> = Some(inner.as_ref());
    while let Some(e) = cause {
        if e.is::<LengthLimitError>() {
            return ProxyError::TooLarge;
        }
        cause = e.source();
    }
    ProxyError::Body(inner.to_string())
}

/// Copy headers, leaving out hop-by-hop headers, `Host` and `Content-Length`
/// (the client recomputes it from the buffered body).
pub fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_hop_by_hop(name) || name == header::HOST || name == header::CONTENT_LENGTH {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Forward one request to the backend and relay its answer.
pub async fn forward(
    State(proxy): State<ProxyState>,
    request: Request,
) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = proxy.target_url(path_and_query);

    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(body_error)?;

    tracing::debug!(method = %parts.method, %url, "forwarding to backend");
    let upstream = proxy
        .client
        .request(parts.method.clone(), &url)
        .headers(forwardable_headers(&parts.headers))
        .body(body)
        .send()
        .await
        .map_err(|source| ProxyError::Upstream {
            url: url.clone(),
            source,
        })?;

    let status = upstream.status();
    let headers = forwardable_headers(upstream.headers());
    let bytes = upstream
        .bytes()
        .await
        .map_err(|source| ProxyError::Upstream { url, source })?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
