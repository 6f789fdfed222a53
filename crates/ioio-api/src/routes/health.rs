//! Liveness probe.

use axum::routing::get;
use axum::{Json, Router};

use crate::response::HealthResponse;
use crate::state::AppState;

/// Build the health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

/// Report that the process is serving. Never touches the Record Store.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Backend is running", body = HealthResponse),
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
