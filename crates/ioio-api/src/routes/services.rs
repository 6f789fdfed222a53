//! # Service Inquiries
//!
//! | Method | Path               | Handler            |
//! |--------|--------------------|--------------------|
//! | POST   | `/api/service`     | [`create_service`] |
//! | GET    | `/api/service`     | [`list_services`]  |
//! | DELETE | `/api/service/:id` | [`delete_service`] |
//!
//! Records live in the `services` collection; the path keeps its singular
//! form for compatibility with the published site.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{delete, get};
use axum::{Json, Router};
use ioio_core::ServiceInquiry;

use super::inquiries;
use crate::error::{ApiError, ErrorResponse};
use crate::response::Envelope;
use crate::state::AppState;

/// Build the service inquiry router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/service", get(list_services).post(create_service))
        .route("/api/service/:id", delete(delete_service))
}

/// POST /api/service: Submit a service inquiry.
///
/// Accepts JSON or urlencoded form bodies. `age` must be an integer;
/// `beauty_type` is optional.
#[utoipa::path(
    post,
    path = "/api/service",
    responses(
        (status = 200, description = "Service submitted; `data` is the stored record", body = ServiceInquiry),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Record Store error", body = ErrorResponse),
    ),
    tag = "services"
)]
pub async fn create_service(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Envelope<ServiceInquiry>>, ApiError> {
    inquiries::create::<ServiceInquiry>(&state, &headers, &body).await
}

/// GET /api/service: List service inquiries, newest first.
#[utoipa::path(
    get,
    path = "/api/service",
    responses(
        (status = 200, description = "All service inquiries in `data`", body = [ServiceInquiry]),
        (status = 500, description = "Record Store error", body = ErrorResponse),
    ),
    tag = "services"
)]
pub async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<ServiceInquiry>>>, ApiError> {
    inquiries::list::<ServiceInquiry>(&state).await
}

/// DELETE /api/service/:id: Remove one service inquiry.
#[utoipa::path(
    delete,
    path = "/api/service/:id",
    params(("id" = String, Path, description = "Record id")),
    responses(
        (status = 200, description = "Service deleted; `data` is the removed record", body = ServiceInquiry),
        (status = 404, description = "Service not found", body = ErrorResponse),
        (status = 500, description = "Record Store error", body = ErrorResponse),
    ),
    tag = "services"
)]
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<ServiceInquiry>>, ApiError> {
    inquiries::delete::<ServiceInquiry>(&state, &id).await
}
