//! # ioio-api -- Binary Entry Point
//!
//! Starts the Axum HTTP server for the Submission API.
//! Binds to `PORT` (default 5001) on all interfaces.

use ioio_api::state::{AppConfig, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Values from a local .env file never override the real environment.
    dotenvy::dotenv().ok();

    // Initialize structured tracing.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Build configuration from environment.
    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Record Store configuration invalid: {e}");
        e
    })?;

    if config.store.is_none() {
        tracing::warn!(
            "Record Store not configured (set RECORD_STORE_URL and RECORD_STORE_KEY). \
             Using in-memory store; submissions are lost on restart."
        );
    }

    let store = ioio_store_client::connect(config.store.clone()).map_err(|e| {
        tracing::error!("Failed to create Record Store client: {e}");
        e
    })?;
    tracing::info!(backend = store.backend_name(), "Record Store ready");

    let port = config.port;
    let app = ioio_api::app(AppState::with_store(config, store));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("IOIO API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(ioio_api::shutdown_signal())
        .await?;

    tracing::info!("IOIO API stopped");
    Ok(())
}
