//! # ioio-site -- Static site server with an `/api` reverse proxy
//!
//! Serves the built marketing site from a directory and forwards everything
//! under `/api` to the Submission API. Browser code therefore talks to the
//! API through relative URLs, whichever host actually serves it.
//!
//! | Path             | Handling                                               |
//! |------------------|--------------------------------------------------------|
//! | `/api`, `/api/*` | [`proxy::forward`] to `BACKEND_URL`                    |
//! | anything else    | file from `SITE_DIR`, else `SITE_DIR/index.html` (200) |

pub mod config;
pub mod proxy;

use axum::routing::any;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::proxy::{ProxyError, ProxyState};

/// Assemble the site router: proxy routes first, static files as fallback.
pub fn app(config: &SiteConfig) -> Result<Router, ProxyError> {
    let proxy = ProxyState::new(config.backend_url.clone())?;

    // Client-side routes have no file of their own; they get the entry page.
    let index = config.site_dir.join("index.html");
    let static_files = ServeDir::new(&config.site_dir).fallback(ServeFile::new(index));

    Ok(Router::new()
        .route("/api", any(proxy::forward))
        .route("/api/*rest", any(proxy::forward))
        .with_state(proxy)
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http()))
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
