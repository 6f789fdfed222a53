//! # ioio-dashboard -- Terminal dashboard for IOIO inquiries
//!
//! Reads both inquiry lists from the Submission API and renders:
//! - totals per kind and the number of inquiries from the last 24 hours,
//! - one table per kind, optionally narrowed by a free-text filter,
//! - a detail view of a single record.
//!
//! Each kind is fetched independently; if one list fails its table shows
//! an error while the other still renders.
//!
//! Records can also be deleted through the API's delete endpoints.

pub mod client;
pub mod commands;
pub mod filter;
pub mod render;
pub mod snapshot;

pub use client::{ApiClient, DashboardError, Row, DEFAULT_API_URL};
pub use snapshot::{Section, Snapshot, Stats};
