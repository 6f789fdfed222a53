//! In-memory Record Store.
//!
//! One row vector per kind behind a `parking_lot::RwLock`. Ids come from a
//! single monotonically increasing sequence and are never reused. Storage is
//! not persisted; data is lost on restart.

use std::cmp::Reverse;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ioio_core::record::timestamp;
use ioio_core::{RecordId, RecordKind};
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::StoreError;
use crate::RecordStore;

/// Process-local store for development and tests.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    properties: RwLock<Vec<Value>>,
    services: RwLock<Vec<Value>>,
    last_id: AtomicI64,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self, kind: RecordKind) -> &RwLock<Vec<Value>> {
        match kind {
            RecordKind::Property => &self.properties,
            RecordKind::Service => &self.services,
        }
    }

    /// Number of rows held for a kind.
    pub fn len(&self, kind: RecordKind) -> usize {
        self.rows(kind).read().len()
    }

    /// True if no rows are held for a kind.
    pub fn is_empty(&self, kind: RecordKind) -> bool {
        self.len(kind) == 0
    }
}

fn created_at(row: &Value) -> Option<DateTime<Utc>> {
    row.get("created_at")
        .and_then(Value::as_str)
        .and_then(|raw| timestamp::parse(raw).ok())
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert(&self, kind: RecordKind, row: Value) -> Result<Value, StoreError> {
        let Value::Object(mut fields) = row else {
            return Err(StoreError::Decode {
                endpoint: "memory insert".into(),
                kind,
                reason: "row must be a JSON object".into(),
            });
        };

        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        fields.insert("id".into(), Value::from(id));
        if !fields.contains_key("created_at") {
            fields.insert("created_at".into(), Value::from(Utc::now().to_rfc3339()));
        }

        let stored = Value::Object(fields);
        self.rows(kind).write().push(stored.clone());
        Ok(stored)
    }

    async fn list(&self, kind: RecordKind) -> Result<Vec<Value>, StoreError> {
        let mut rows: Vec<Value> = self.rows(kind).read().iter().rev().cloned().collect();
        // Stable sort on a newest-first copy: equal timestamps stay in
        // reverse insertion order.
        rows.sort_by_key(|row| Reverse(created_at(row)));
        Ok(rows)
    }

    async fn delete(&self, kind: RecordKind, id: &RecordId) -> Result<Value, StoreError> {
        let mut rows = self.rows(kind).write();
        let position = rows
            .iter()
            .position(|row| row.get("id").is_some_and(|v| id.matches(v)));
        match position {
            Some(index) => Ok(rows.remove(index)),
            None => Err(StoreError::NotFound {
                kind,
                id: id.clone(),
            }),
        }
    }

    fn backend_name(&self) -> &'static str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_assigns_unique_increasing_ids() {
        let store = InMemoryRecordStore::new();
        let a = store.insert(RecordKind::Property, json!({"name": "a"})).await.unwrap();
        let b = store.insert(RecordKind::Service, json!({"name": "b"})).await.unwrap();
        let c = store.insert(RecordKind::Property, json!({"name": "c", "id": 1})).await.unwrap();
        assert_eq!(a["id"], json!(1));
        assert_eq!(b["id"], json!(2));
        assert_eq!(c["id"], json!(3), "caller-supplied ids are replaced");
    }

    #[tokio::test]
    async fn insert_stamps_created_at_when_absent() {
        let store = InMemoryRecordStore::new();
        let row = store.insert(RecordKind::Property, json!({})).await.unwrap();
        assert!(created_at(&row).is_some());
    }

    #[tokio::test]
    async fn insert_rejects_non_objects() {
        let store = InMemoryRecordStore::new();
        let err = store.insert(RecordKind::Property, json!([1])).await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
        assert!(store.is_empty(RecordKind::Property));
    }

    #[tokio::test]
    async fn list_is_newest_first_and_per_kind() {
        let store = InMemoryRecordStore::new();
        for (name, ts) in [
            ("old", "2026-01-01T00:00:00Z"),
            ("new", "2026-01-03T00:00:00Z"),
            ("mid", "2026-01-02T00:00:00Z"),
        ] {
            store
                .insert(RecordKind::Property, json!({"name": name, "created_at": ts}))
                .await
                .unwrap();
        }
        store.insert(RecordKind::Service, json!({"name": "svc"})).await.unwrap();

        let names: Vec<_> = store
            .list(RecordKind::Property)
            .await
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["new", "mid", "old"]);
        assert_eq!(store.len(RecordKind::Service), 1);
    }

    #[tokio::test]
    async fn equal_timestamps_list_in_reverse_insertion_order() {
        let store = InMemoryRecordStore::new();
        for name in ["first", "second", "third"] {
            store
                .insert(
                    RecordKind::Service,
                    json!({"name": name, "created_at": "2026-01-01T00:00:00Z"}),
                )
                .await
                .unwrap();
        }
        let rows = store.list(RecordKind::Service).await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn empty_list_is_ok() {
        let store = InMemoryRecordStore::new();
        assert!(store.list(RecordKind::Property).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_row() {
        let store = InMemoryRecordStore::new();
        let a = store.insert(RecordKind::Property, json!({"name": "a"})).await.unwrap();
        store.insert(RecordKind::Property, json!({"name": "b"})).await.unwrap();

        let removed = store.delete(RecordKind::Property, &RecordId::Int(1)).await.unwrap();
        assert_eq!(removed, a);
        assert_eq!(store.len(RecordKind::Property), 1);

        let err = store.delete(RecordKind::Property, &RecordId::Int(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryRecordStore::new();
        store.insert(RecordKind::Property, json!({})).await.unwrap();
        store.delete(RecordKind::Property, &RecordId::Int(1)).await.unwrap();
        let next = store.insert(RecordKind::Property, json!({})).await.unwrap();
        assert_eq!(next["id"], json!(2));
    }
}
