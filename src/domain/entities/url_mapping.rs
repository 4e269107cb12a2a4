//! UrlMapping entity representing a short code to destination URL association.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::error::AppError;

/// Maximum short code length, in characters.
pub const MAX_SHORT_CODE_LEN: usize = 255;

/// Maximum destination URL length, in characters.
pub const MAX_ORIGINAL_URL_LEN: usize = 2048;

/// A persisted short code mapping.
///
/// `id`, `short_code` and `created_at` never change after insertion.
/// `click_count`, `expires_at` and `is_active` are owned by collaborators
/// outside the creation path (click tracking, expiry, redirects).
#[derive(Debug, Clone, PartialEq)]
pub struct UrlMapping {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_count: i64,
    pub is_active: bool,
}

impl UrlMapping {
    /// Creates a freshly inserted mapping with default counters and flags.
    pub fn new(id: i64, short_code: String, original_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            short_code,
            original_url,
            created_at,
            updated_at: created_at,
            expires_at: None,
            click_count: 0,
            is_active: true,
        }
    }
}

/// Input data for creating a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub short_code: String,
    pub original_url: String,
}

impl NewUrlMapping {
    pub fn new(short_code: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
            original_url: original_url.into(),
        }
    }

    /// Enforces the column bounds every store applies on its write path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the short code is not 1-255 characters
    /// or the URL is not 1-2048 characters.
    pub fn check_bounds(&self) -> Result<(), AppError> {
        let code_len = self.short_code.chars().count();
        if code_len == 0 || code_len > MAX_SHORT_CODE_LEN {
            return Err(AppError::invalid_input(
                format!("short code must be 1-{MAX_SHORT_CODE_LEN} characters"),
                json!({ "provided_length": code_len }),
            ));
        }

        let url_len = self.original_url.chars().count();
        if url_len == 0 || url_len > MAX_ORIGINAL_URL_LEN {
            return Err(AppError::invalid_input(
                format!("original URL must be 1-{MAX_ORIGINAL_URL_LEN} characters"),
                json!({ "provided_length": url_len }),
            ));
        }

        Ok(())
    }
}
