//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the Submission API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "IOIO Submission API",
        version = "0.1.0",
        description = "Intake and listing of property and service inquiries for the IOIO marketing site.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::health::health,
        crate::routes::properties::create_property,
        crate::routes::properties::list_properties,
        crate::routes::properties::delete_property,
        crate::routes::services::create_service,
        crate::routes::services::list_services,
        crate::routes::services::delete_service,
    ),
    components(schemas(
        ioio_core::PropertyInquiry,
        ioio_core::ServiceInquiry,
        crate::response::HealthResponse,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "properties", description = "Property inquiries"),
        (name = "services", description = "Service inquiries"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
