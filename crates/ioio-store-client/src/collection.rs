//! Typed access to one collection.
//!
//! [`Collection<R>`] converts between the store's JSON rows and the record
//! type `R`, so callers never handle raw rows.

use std::marker::PhantomData;

use ioio_core::{Inquiry, RecordId};
use serde_json::Value;

use crate::error::StoreError;
use crate::SharedStore;

/// Typed handle on the collection holding records of type `R`.
#[derive(Debug, Clone)]
pub struct Collection<R> {
    store: SharedStore,
    _record: PhantomData<fn() -> R>,
}

impl<R: Inquiry> Collection<R> {
    /// Wrap a store.
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Insert one draft and return the stored record.
    pub async fn create(&self, draft: &R::Draft) -> Result<R, StoreError> {
        let row = serde_json::to_value(draft).map_err(|e| StoreError::Decode {
            endpoint: "encode draft".into(),
            kind: R::KIND,
            reason: e.to_string(),
        })?;
        let stored = self.store.insert(R::KIND, row).await?;
        Self::decode("insert", stored)
    }

    /// All records, newest first.
    pub async fn list(&self) -> Result<Vec<R>, StoreError> {
        self.store
            .list(R::KIND)
            .await?
            .into_iter()
            .map(|row| Self::decode("list", row))
            .collect()
    }

    /// Delete one record by id and return it.
    pub async fn delete(&self, id: &RecordId) -> Result<R, StoreError> {
        let row = self.store.delete(R::KIND, id).await?;
        Self::decode("delete", row)
    }

    fn decode(operation: &str, row: Value) -> Result<R, StoreError> {
        serde_json::from_value(row).map_err(|e| StoreError::Decode {
            endpoint: format!("{operation} {}", R::KIND.collection()),
            kind: R::KIND,
            reason: e.to_string(),
        })
    }
}
