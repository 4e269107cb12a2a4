//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP handlers
//! and the admin CLI.
//!
//! - [`services::shortening_service::ShorteningService`] - Mapping creation
//!   (code extraction, URL validation, uniqueness, persistence)

pub mod services;
