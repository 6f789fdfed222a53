#![deny(missing_docs)]

//! # ioio-core -- Foundational Types for the IOIO Inquiry Service
//!
//! Every other crate in the workspace depends on this one. It has no internal
//! crate dependencies and does no I/O.
//!
//! ## Design Principles
//!
//! 1. **One [`RecordKind`] enum.** Property and service inquiries share a
//!    shape; the kind decides the required fields, the collection name and
//!    every user-facing label. `match` on it is exhaustive everywhere.
//!
//! 2. **Submissions are validated once, at the edge.** A [`Submission`] is the
//!    flat key-value payload of an HTTP form post. [`Inquiry::draft_from_submission`]
//!    either yields a typed draft or a [`ValidationError`] naming every
//!    offending field; nothing half-validated reaches the store.
//!
//! 3. **Optional fields are `Option<TextOrNumber>`.** No sentinel values: an
//!    absent `bedrooms` serializes as `null`, and a present one keeps the
//!    text or numeric shape the store column gives it.

pub mod error;
pub mod field;
pub mod id;
pub mod kind;
pub mod record;
pub mod submission;

pub use error::{InvalidField, SubmissionError, ValidationError};
pub use field::TextOrNumber;
pub use id::RecordId;
pub use kind::RecordKind;
pub use record::{
    Inquiry, NewPropertyInquiry, NewServiceInquiry, PropertyInquiry, ServiceInquiry,
};
pub use submission::{FieldValue, Submission};
