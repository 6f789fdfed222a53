//! # ioio-site -- Binary Entry Point
//!
//! Serves `SITE_DIR` on `SITE_PORT` (default 3000) and proxies `/api` to
//! `BACKEND_URL`.

use ioio_site::config::SiteConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = SiteConfig::from_env().map_err(|e| {
        tracing::error!("Site configuration invalid: {e}");
        e
    })?;

    if !config.site_dir.join("index.html").is_file() {
        tracing::warn!(
            site_dir = %config.site_dir.display(),
            "index.html not found; unmatched routes will answer 404"
        );
    }

    let app = ioio_site::app(&config)?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(backend = %config.backend_url, "IOIO site listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(ioio_site::shutdown_signal())
        .await?;

    tracing::info!("IOIO site stopped");
    Ok(())
}
