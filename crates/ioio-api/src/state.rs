//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The state holds no records itself. Property and service inquiries live in
//! the Record Store and are reached through the [`SharedStore`] handle.

use ioio_core::Inquiry;
use ioio_store_client::{Collection, ConfigError, InMemoryRecordStore, SharedStore, StoreConfig};
use std::sync::Arc;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5001;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Hosted store settings. `None` selects the in-memory store.
    pub store: Option<StoreConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            store: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    ///
    /// `PORT` falls back to 5001 when absent or unparsable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let store = StoreConfig::from_lookup(&lookup)?;
        Ok(Self { port, store })
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Runtime configuration.
    pub config: AppConfig,
    /// The Record Store every handler reads and writes.
    pub store: SharedStore,
}

impl AppState {
    /// State with default configuration over an empty in-memory store.
    pub fn new() -> Self {
        Self::with_store(AppConfig::default(), Arc::new(InMemoryRecordStore::new()))
    }

    /// State over an explicit store.
    pub fn with_store(config: AppConfig, store: SharedStore) -> Self {
        Self { config, store }
    }

    /// Typed handle on the collection holding `R`.
    pub fn collection<R: Inquiry>(&self) -> Collection<R> {
        Collection::new(Arc::clone(&self.store))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
