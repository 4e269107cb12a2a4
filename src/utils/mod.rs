//! Utility functions for short code extraction, URL validation and error classification.
//!
//! - [`code_extractor`] - Short code derivation from a raw "shortened URL"
//! - [`url_validator`] - Destination URL validation
//! - [`db_error`] - PostgreSQL error classification

pub mod code_extractor;
pub mod db_error;
pub mod url_validator;
