//! # Property Inquiries
//!
//! | Method | Path                  | Handler             |
//! |--------|-----------------------|---------------------|
//! | POST   | `/api/properties`     | [`create_property`] |
//! | GET    | `/api/properties`     | [`list_properties`] |
//! | DELETE | `/api/properties/:id` | [`delete_property`] |

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{delete, get};
use axum::{Json, Router};
use ioio_core::PropertyInquiry;

use super::inquiries;
use crate::error::{ApiError, ErrorResponse};
use crate::response::Envelope;
use crate::state::AppState;

/// Build the property inquiry router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/properties", get(list_properties).post(create_property))
        .route("/api/properties/:id", delete(delete_property))
}

/// POST /api/properties: Submit a property inquiry.
///
/// Accepts JSON or urlencoded form bodies. `age` must be an integer;
/// `bedrooms` and `rooms` are optional.
#[utoipa::path(
    post,
    path = "/api/properties",
    responses(
        (status = 200, description = "Property submitted; `data` is the stored record", body = PropertyInquiry),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Record Store error", body = ErrorResponse),
    ),
    tag = "properties"
)]
pub async fn create_property(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Envelope<PropertyInquiry>>, ApiError> {
    inquiries::create::<PropertyInquiry>(&state, &headers, &body).await
}

/// GET /api/properties: List property inquiries, newest first.
#[utoipa::path(
    get,
    path = "/api/properties",
    responses(
        (status = 200, description = "All property inquiries in `data`", body = [PropertyInquiry]),
        (status = 500, description = "Record Store error", body = ErrorResponse),
    ),
    tag = "properties"
)]
pub async fn list_properties(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<PropertyInquiry>>>, ApiError> {
    inquiries::list::<PropertyInquiry>(&state).await
}

/// DELETE /api/properties/:id: Remove one property inquiry.
#[utoipa::path(
    delete,
    path = "/api/properties/:id",
    params(("id" = String, Path, description = "Record id")),
    responses(
        (status = 200, description = "Property deleted; `data` is the removed record", body = PropertyInquiry),
        (status = 404, description = "Property not found", body = ErrorResponse),
        (status = 500, description = "Record Store error", body = ErrorResponse),
    ),
    tag = "properties"
)]
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<PropertyInquiry>>, ApiError> {
    inquiries::delete::<PropertyInquiry>(&state, &id).await
}
