//! Contract tests for HttpRecordStore against the store's REST layer.
//!
//! These tests use wiremock to simulate the hosted store. Paths, headers and
//! query strings are the ones the REST layer expects.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/rest/v1/{collection}` | `insert_*` |
//! | GET    | `/rest/v1/{collection}` | `list_*` |
//! | DELETE | `/rest/v1/{collection}` | `delete_*` |

use std::sync::Arc;

use chrono::Utc;
use ioio_core::{
    Inquiry, PropertyInquiry, RecordId, RecordKind, ServiceInquiry, Submission, TextOrNumber,
};
use ioio_store_client::{Collection, HttpRecordStore, RecordStore, StoreConfig, StoreError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build an HttpRecordStore pointed at a wiremock server.
fn test_store(mock_server: &MockServer) -> HttpRecordStore {
    let config = StoreConfig::local_mock(&mock_server.uri(), "test-key").unwrap();
    HttpRecordStore::new(config).unwrap()
}

fn property_row(id: i64, name: &str, created_at: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "age": 30,
        "email": "a@x.com",
        "phone": "555",
        "property_type": "house",
        "bedrooms": null,
        "rooms": null,
        "message": "hi",
        "created_at": created_at
    })
}

// ── POST /rest/v1/{collection} ───────────────────────────────────────

#[tokio::test]
async fn insert_sends_auth_headers_and_single_row_array() {
    let mock_server = MockServer::start().await;
    let row = json!({"name": "A", "age": 30});

    Mock::given(method("POST"))
        .and(path("/rest/v1/properties"))
        .and(header("apikey", "test-key"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("prefer", "return=representation"))
        .and(body_json(json!([{"name": "A", "age": 30}])))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([{"id": 1, "name": "A", "age": 30}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = test_store(&mock_server);
    let stored = store.insert(RecordKind::Property, row).await.unwrap();
    assert_eq!(stored["id"], json!(1));
}

#[tokio::test]
async fn insert_maps_rest_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "PGRST204",
            "details": null,
            "hint": null,
            "message": "Could not find the 'beauty_type' column of 'services'"
        })))
        .mount(&mock_server)
        .await;

    let store = test_store(&mock_server);
    let err = store
        .insert(RecordKind::Service, json!({"name": "B"}))
        .await
        .unwrap_err();

    match &err {
        StoreError::Api { status, body, .. } => {
            assert_eq!(*status, 400);
            assert_eq!(body.code.as_deref(), Some("PGRST204"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert!(err.store_message().contains("beauty_type"));
}

#[tokio::test]
async fn insert_with_empty_representation_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/properties"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let store = test_store(&mock_server);
    let err = store
        .insert(RecordKind::Property, json!({"name": "A"}))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UnexpectedRowCount { count: 0, .. }));
}

#[tokio::test]
async fn insert_against_unreachable_store_is_http_error() {
    let config = StoreConfig::local_mock("http://127.0.0.1:1", "k").unwrap();
    let store = HttpRecordStore::new(config).unwrap();
    let err = store
        .insert(RecordKind::Property, json!({"name": "A"}))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Http { .. }));
}

#[tokio::test]
async fn create_and_list_decode_integer_columns() {
    let mock_server = MockServer::start().await;
    let mut stored = property_row(5, "A", "2026-02-01T10:00:00+00:00");
    stored["bedrooms"] = json!(3);

    Mock::given(method("POST"))
        .and(path("/rest/v1/properties"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([stored.clone()])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([stored])))
        .mount(&mock_server)
        .await;

    let store: Arc<dyn RecordStore> = Arc::new(test_store(&mock_server));
    let properties = Collection::<PropertyInquiry>::new(store);
    let submission = Submission::from_json(json!({
        "name": "A",
        "age": 30,
        "email": "a@x.com",
        "phone": "555",
        "property_type": "house",
        "bedrooms": "3",
        "message": "hi"
    }))
    .unwrap();
    let draft = PropertyInquiry::draft_from_submission(&submission, Utc::now()).unwrap();

    let created = properties.create(&draft).await.unwrap();
    assert_eq!(created.bedrooms, Some(TextOrNumber::from(3)));
    let listed = properties.list().await.unwrap();
    assert_eq!(listed[0].bedrooms, Some(TextOrNumber::from(3)));
}

// ── GET /rest/v1/{collection} ────────────────────────────────────────

#[tokio::test]
async fn list_requests_all_columns_newest_first() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/properties"))
        .and(query_param("select", "*"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            property_row(2, "newer", "2026-02-02T10:00:00+00:00"),
            property_row(1, "older", "2026-02-01T10:00:00+00:00"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store: Arc<dyn RecordStore> = Arc::new(test_store(&mock_server));
    let properties = Collection::<PropertyInquiry>::new(store);
    let records = properties.list().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "newer");
    assert_eq!(records[1].id, RecordId::Int(1));
    assert!(records[0].created_at > records[1].created_at);
}

#[tokio::test]
async fn list_of_empty_collection_is_empty_vec() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let store: Arc<dyn RecordStore> = Arc::new(test_store(&mock_server));
    let services = Collection::<ServiceInquiry>::new(store);
    assert!(services.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_handles_server_error_with_plain_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
        .mount(&mock_server)
        .await;

    let store = test_store(&mock_server);
    let err = store.list(RecordKind::Service).await.unwrap_err();
    assert_eq!(err.store_message(), "service unavailable");
}

// ── DELETE /rest/v1/{collection} ─────────────────────────────────────

#[tokio::test]
async fn delete_filters_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/properties"))
        .and(query_param("id", "eq.7"))
        .and(header("prefer", "return=representation"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([property_row(7, "gone", "2026-02-01T10:00:00Z")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let store: Arc<dyn RecordStore> = Arc::new(test_store(&mock_server));
    let properties = Collection::<PropertyInquiry>::new(store);
    let deleted = properties.delete(&RecordId::Int(7)).await.unwrap();
    assert_eq!(deleted.name, "gone");
}

#[tokio::test]
async fn delete_of_unknown_id_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let store = test_store(&mock_server);
    let err = store
        .delete(RecordKind::Service, &RecordId::Text("abc".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}
