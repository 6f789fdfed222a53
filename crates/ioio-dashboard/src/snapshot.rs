//! One fetch of both collections, with per-section failure and statistics.

use chrono::{DateTime, Duration, Utc};
use ioio_core::record::timestamp;
use ioio_core::RecordKind;
use serde_json::Value;

use crate::client::{ApiClient, Row};
use crate::filter;

/// Records of one kind, or the reason they could not be loaded.
#[derive(Debug, Clone)]
pub struct Section {
    /// Which collection this section shows.
    pub kind: RecordKind,
    /// Rows newest first, or the error message.
    pub rows: Result<Vec<Row>, String>,
}

impl Section {
    /// Rows for statistics; a failed section counts as empty.
    pub fn rows_or_empty(&self) -> &[Row] {
        self.rows.as_deref().unwrap_or(&[])
    }

    /// A copy of this section keeping only rows that match `term`.
    pub fn filtered(&self, term: &str) -> Section {
        Section {
            kind: self.kind,
            rows: self
                .rows
                .as_ref()
                .map(|rows| filter::filter_rows(rows, term))
                .map_err(Clone::clone),
        }
    }
}

/// Totals and recent activity across both kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of property inquiries.
    pub total_properties: usize,
    /// Number of service inquiries.
    pub total_services: usize,
    /// Inquiries of either kind created within the last 24 hours.
    pub recent: usize,
}

/// Both sections as fetched at one moment.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Property inquiries.
    pub properties: Section,
    /// Service inquiries.
    pub services: Section,
}

impl Snapshot {
    /// Fetch both kinds concurrently. A failure in one does not affect the other.
    pub async fn fetch(client: &ApiClient) -> Self {
        let (properties, services) = tokio::join!(
            client.list(RecordKind::Property),
            client.list(RecordKind::Service)
        );
        Self {
            properties: section(RecordKind::Property, properties),
            services: section(RecordKind::Service, services),
        }
    }

    /// Statistics at `now`, over the unfiltered rows.
    pub fn stats(&self, now: DateTime<Utc>) -> Stats {
        let cutoff = now - Duration::hours(24);
        let properties = self.properties.rows_or_empty();
        let services = self.services.rows_or_empty();
        Stats {
            total_properties: properties.len(),
            total_services: services.len(),
            recent: properties
                .iter()
                .chain(services)
                .filter(|row| created_at(row).is_some_and(|at| at > cutoff))
                .count(),
        }
    }

    /// Both sections narrowed to rows matching `term`.
    pub fn filtered(&self, term: &str) -> Snapshot {
        Snapshot {
            properties: self.properties.filtered(term),
            services: self.services.filtered(term),
        }
    }
}

fn section<E: std::fmt::Display>(kind: RecordKind, result: Result<Vec<Row>, E>) -> Section {
    let rows = result.map_err(|e| {
        tracing::warn!(%kind, error = %e, "failed to load section");
        e.to_string()
    });
    Section { kind, rows }
}

/// A row's creation time, if it has a readable one.
pub fn created_at(row: &Row) -> Option<DateTime<Utc>> {
    row.get("created_at")
        .and_then(Value::as_str)
        .and_then(|raw| timestamp::parse(raw).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    fn snapshot(properties: Result<Vec<Row>, String>, services: Result<Vec<Row>, String>) -> Snapshot {
        Snapshot {
            properties: Section {
                kind: RecordKind::Property,
                rows: properties,
            },
            services: Section {
                kind: RecordKind::Service,
                rows: services,
            },
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn recent_counts_both_kinds_strictly_inside_window() {
        let snap = snapshot(
            Ok(vec![
                row(json!({"id": 1, "created_at": "2026-03-10T11:00:00Z"})),
                row(json!({"id": 2, "created_at": "2026-03-09T12:00:00Z"})),
                row(json!({"id": 3, "created_at": "2026-03-01T00:00:00Z"})),
            ]),
            Ok(vec![
                row(json!({"id": 4, "created_at": "2026-03-09T12:00:01Z"})),
                row(json!({"id": 5})),
            ]),
        );
        let stats = snap.stats(now());
        assert_eq!(stats.total_properties, 3);
        assert_eq!(stats.total_services, 2);
        // Exactly 24h old is outside the window.
        assert_eq!(stats.recent, 2);
    }

    #[test]
    fn failed_section_counts_as_empty() {
        let snap = snapshot(
            Err("connection refused".into()),
            Ok(vec![row(json!({"id": 1, "created_at": "2026-03-10T09:00:00Z"}))]),
        );
        let stats = snap.stats(now());
        assert_eq!(stats.total_properties, 0);
        assert_eq!(stats.total_services, 1);
        assert_eq!(stats.recent, 1);
    }

    #[test]
    fn filtering_keeps_errors_and_narrows_rows() {
        let snap = snapshot(
            Err("boom".into()),
            Ok(vec![
                row(json!({"id": 1, "name": "Ann"})),
                row(json!({"id": 2, "name": "Bob"})),
            ]),
        );
        let filtered = snap.filtered("bob");
        assert_eq!(filtered.properties.rows, Err("boom".to_string()));
        assert_eq!(filtered.services.rows_or_empty().len(), 1);
        // Statistics are taken from the unfiltered snapshot.
        assert_eq!(snap.stats(now()).total_services, 2);
    }
}
