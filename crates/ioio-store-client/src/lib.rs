//! # ioio-store-client -- Typed Rust client for the Record Store
//!
//! The Record Store is a hosted relational database exposed over a REST
//! layer. It owns persistence, id generation and the two collections this
//! service writes to:
//! - **properties**: property inquiries
//! - **services**: service inquiries
//!
//! ## Architecture
//!
//! [`RecordStore`] is the access contract: insert one row, list all rows
//! newest-first, delete one row. Two implementations exist:
//! - [`HttpRecordStore`] talks to the hosted store (production).
//! - [`InMemoryRecordStore`] keeps rows in process memory (development and
//!   tests; data is lost on restart).
//!
//! Handlers do not touch JSON rows directly; they go through
//! [`Collection`], which converts between rows and the typed records of
//! `ioio-core`.
//!
//! Every call is a single round trip. Failures are returned immediately,
//! never retried.

pub mod collection;
pub mod config;
pub mod error;
pub mod http;
pub mod memory;

pub use collection::Collection;
pub use config::{ConfigError, StoreConfig};
pub use error::{StoreError, StoreErrorBody};
pub use http::HttpRecordStore;
pub use memory::InMemoryRecordStore;

use std::sync::Arc;

use async_trait::async_trait;
use ioio_core::{RecordId, RecordKind};
use serde_json::Value;

/// Access contract for the Record Store.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// async tasks behind an `Arc`. The trait is object-safe to support
/// runtime backend selection (in-memory vs. hosted).
#[async_trait]
pub trait RecordStore: Send + Sync + std::fmt::Debug {
    /// Insert exactly one row into the kind's collection and return the
    /// stored representation, including the store-assigned `id`.
    async fn insert(&self, kind: RecordKind, row: Value) -> Result<Value, StoreError>;

    /// All rows of the kind, ordered by `created_at` descending.
    async fn list(&self, kind: RecordKind) -> Result<Vec<Value>, StoreError>;

    /// Remove the row with the given id and return it.
    async fn delete(&self, kind: RecordKind, id: &RecordId) -> Result<Value, StoreError>;

    /// Human-readable backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}

/// Process-wide handle to the configured store.
pub type SharedStore = Arc<dyn RecordStore>;

/// Build the store a server should use.
///
/// A configuration selects the hosted store; `None` selects the in-memory
/// store.
pub fn connect(config: Option<StoreConfig>) -> Result<SharedStore, StoreError> {
    match config {
        Some(config) => Ok(Arc::new(HttpRecordStore::new(config)?)),
        None => Ok(Arc::new(InMemoryRecordStore::new())),
    }
}
