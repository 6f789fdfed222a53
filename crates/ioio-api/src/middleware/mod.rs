//! # HTTP Middleware
//!
//! Layers applied to every route: request tracing and CORS.

pub mod cors;
pub mod tracing_layer;
