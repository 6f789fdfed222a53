//! # ioio-api -- Submission API for the IOIO marketing site
//!
//! Receives property and service inquiries from the public site, validates
//! them, and stores them in the Record Store. Lists and deletes them for
//! the dashboard.
//!
//! ## API Surface
//!
//! | Path                    | Methods      | Module                 |
//! |-------------------------|--------------|------------------------|
//! | `/api/health`           | GET          | [`routes::health`]     |
//! | `/api/properties`       | GET, POST    | [`routes::properties`] |
//! | `/api/properties/:id`   | DELETE       | [`routes::properties`] |
//! | `/api/service`          | GET, POST    | [`routes::services`]   |
//! | `/api/service/:id`      | DELETE       | [`routes::services`]   |
//! | `/openapi.json`         | GET          | [`openapi`]            |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → CorsLayer → Handler
//! ```
//!
//! Every response body is JSON: `{ success: true, ... }` on success and the
//! [`error::ErrorResponse`] shape otherwise.

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::properties::router())
        .merge(routes::services::router())
        .merge(openapi::router())
        .layer(middleware::cors::layer())
        .layer(middleware::tracing_layer::layer())
        .with_state(state)
}

/// Resolve when the process receives Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
