//! # Cross-Origin Resource Sharing
//!
//! The marketing site and the dashboard may be served from other origins.
//! Any origin is accepted and reflected back, with credentials allowed.

use axum::http::Method;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

/// Build the permissive CORS layer.
///
/// A wildcard origin cannot be combined with credentials, so the request's
/// own `Origin` and requested headers are mirrored instead.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
}
