//! # API Route Modules
//!
//! - `health`: liveness probe at `/api/health`.
//! - `properties`: property inquiries at `/api/properties`.
//! - `services`: service inquiries at `/api/service`.
//!
//! `properties` and `services` are thin, documented wrappers around the
//! shared handlers in `inquiries`, which work for any
//! [`Inquiry`](ioio_core::Inquiry) type.

pub mod health;
pub(crate) mod inquiries;
pub mod properties;
pub mod services;
