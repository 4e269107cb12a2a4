//! HTTP middleware for the API layer.

pub mod tracing;
