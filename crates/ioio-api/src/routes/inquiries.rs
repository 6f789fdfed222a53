//! Handlers shared by both inquiry kinds.

use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use ioio_core::{Inquiry, RecordId, RecordKind};

use crate::error::{ApiError, Operation};
use crate::extractors::parse_submission;
use crate::response::Envelope;
use crate::state::AppState;

/// Validate a submission and insert it.
pub(crate) async fn create<R: Inquiry>(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Json<Envelope<R>>, ApiError> {
    let kind = R::KIND;
    let submission = parse_submission(headers, body).map_err(|e| ApiError::Unexpected {
        kind,
        operation: Operation::Submit,
        message: e.to_string(),
    })?;
    tracing::debug!(%kind, fields = submission.len(), "received submission");

    let draft = R::draft_from_submission(&submission, Utc::now())?;

    tracing::info!(%kind, backend = state.store.backend_name(), "inserting inquiry");
    let record = state.collection::<R>().create(&draft).await.map_err(|e| {
        // Service failures echo the rejected row back to the caller.
        let request_data = match kind {
            RecordKind::Service => serde_json::to_value(&draft).ok(),
            RecordKind::Property => None,
        };
        ApiError::from_store(kind, Operation::Submit, e).with_request_data(request_data)
    })?;

    tracing::info!(%kind, id = %record.id(), "inquiry stored");
    Ok(Json(Envelope::with_message(
        format!("{} submitted", kind.title()),
        record,
    )))
}

/// All records of one kind, newest first.
pub(crate) async fn list<R: Inquiry>(state: &AppState) -> Result<Json<Envelope<Vec<R>>>, ApiError> {
    let records = state
        .collection::<R>()
        .list()
        .await
        .map_err(|e| ApiError::from_store(R::KIND, Operation::Fetch, e))?;
    tracing::debug!(kind = %R::KIND, count = records.len(), "listed inquiries");
    Ok(Json(Envelope::data(records)))
}

/// Delete one record by the id taken from the path.
pub(crate) async fn delete<R: Inquiry>(
    state: &AppState,
    raw_id: &str,
) -> Result<Json<Envelope<R>>, ApiError> {
    let kind = R::KIND;
    let id = RecordId::from_path(raw_id);
    let record = state
        .collection::<R>()
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_store(kind, Operation::Delete, e))?;

    tracing::info!(%kind, %id, "inquiry deleted");
    Ok(Json(Envelope::with_message(
        format!("{} deleted", kind.title()),
        record,
    )))
}
