//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization. Request DTOs expose explicit
//! `validate` methods that run before any domain object is built.

pub mod health;
pub mod shorten;
