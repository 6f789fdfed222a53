//! Site server configuration.

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default proxy target.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5001";

/// Default static asset directory.
pub const DEFAULT_SITE_DIR: &str = "site";

/// Errors from reading site configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `BACKEND_URL` is not an absolute http(s) URL.
    #[error("invalid BACKEND_URL '{0}': {1}")]
    InvalidBackendUrl(String, String),
}

/// Runtime configuration for the site server.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Port to bind to.
    pub port: u16,
    /// Base URL requests under `/api` are forwarded to.
    pub backend_url: Url,
    /// Directory holding the built site; `index.html` is the entry page.
    pub site_dir: PathBuf,
}

impl SiteConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    ///
    /// `SITE_PORT` takes precedence over `PORT` so both servers can share one
    /// environment file.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = get("SITE_PORT")
            .or_else(|| get("PORT"))
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let raw = get("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = parse_backend_url(raw.trim())?;

        let site_dir = get("SITE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SITE_DIR));

        Ok(Self {
            port,
            backend_url,
            site_dir,
        })
    }
}

fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidBackendUrl(raw.to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidBackendUrl(
            raw.to_string(),
            format!("unsupported scheme '{other}'"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = SiteConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.backend_url.as_str(), "http://localhost:5001/");
        assert_eq!(config.site_dir, PathBuf::from("site"));
    }

    #[test]
    fn site_port_wins_over_port() {
        let config =
            SiteConfig::from_lookup(lookup(&[("PORT", "4000"), ("SITE_PORT", "4100")])).unwrap();
        assert_eq!(config.port, 4100);

        let config = SiteConfig::from_lookup(lookup(&[("PORT", "4000")])).unwrap();
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn rejects_non_http_backend() {
        let err = SiteConfig::from_lookup(lookup(&[("BACKEND_URL", "ftp://x")])).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
        assert!(SiteConfig::from_lookup(lookup(&[("BACKEND_URL", "not a url")])).is_err());
    }
}
