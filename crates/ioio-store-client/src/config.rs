//! Record Store client configuration.
//!
//! The store is reached at a single base URL with a single access key. Both
//! come from the environment; the legacy `SUPABASE_*` names are accepted as
//! fallbacks so existing deployments keep working.

use url::Url;
use zeroize::Zeroizing;

/// Configuration for connecting to the Record Store.
///
/// Custom `Debug` implementation redacts the `api_key` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the store, e.g. `https://abc.supabase.co`.
    pub url: Url,
    /// Access key, sent both as `apikey` and as a bearer token.
    pub api_key: Zeroizing<String>,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl StoreConfig {
    /// Build a configuration from explicit values.
    pub fn new(url: &str, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let url = Url::parse(url)
            .map_err(|e| ConfigError::InvalidUrl(url.to_string(), e.to_string()))?;
        Ok(Self {
            url,
            api_key: Zeroizing::new(api_key.into()),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `RECORD_STORE_URL` (fallback `SUPABASE_URL`)
    /// - `RECORD_STORE_KEY` (fallback `SUPABASE_KEY`)
    ///
    /// Returns `Ok(None)` when neither is set, so callers can choose an
    /// in-memory store for local development. Setting only one of the two is
    /// an error.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`StoreConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        let get = |primary: &str, fallback: &str| {
            lookup(primary)
                .or_else(|| lookup(fallback))
                .filter(|v| !v.trim().is_empty())
        };
        let url = get("RECORD_STORE_URL", "SUPABASE_URL");
        let key = get("RECORD_STORE_KEY", "SUPABASE_KEY");

        match (url, key) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::MissingKey),
            (None, Some(_)) => Err(ConfigError::MissingUrl),
            (Some(url), Some(key)) => Self::new(url.trim(), key).map(Some),
        }
    }

    /// Create a configuration pointing at a local mock server (for testing).
    pub fn local_mock(base: &str, key: &str) -> Result<Self, ConfigError> {
        Self::new(base, key)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("RECORD_STORE_KEY is required when RECORD_STORE_URL is set")]
    MissingKey,
    #[error("RECORD_STORE_URL is required when RECORD_STORE_KEY is set")]
    MissingUrl,
    #[error("invalid URL {0:?}: {1}")]
    InvalidUrl(String, String),
    #[error("access key is not a valid header value")]
    InvalidKey,
}
