//! DTOs for the mapping creation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::application::services::MappingConfirmation;
use crate::error::AppError;

/// Request to map a short code to a destination URL.
///
/// Both fields are optional at the serde level so that missing fields reach
/// validation and are reported in the regular error payload.
///
/// # Rules
///
/// - `shortenedUrl`: required, not blank, at most 255 characters
/// - `redirectedLink`: required, not blank, at most 2048 characters
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenUrlRequest {
    /// Full short URL (`https://short.ly/promo`) or bare code (`promo`).
    #[serde(default)]
    #[validate(
        required(message = "shortenedUrl is required"),
        length(max = 255, message = "shortenedUrl must not exceed 255 characters"),
        custom(function = "not_blank", message = "shortenedUrl must not be blank")
    )]
    pub shortened_url: Option<String>,

    /// Destination URL (must be HTTP/HTTPS).
    #[serde(default)]
    #[validate(
        required(message = "redirectedLink is required"),
        length(max = 2048, message = "redirectedLink must not exceed 2048 characters"),
        custom(function = "not_blank", message = "redirectedLink must not be blank")
    )]
    pub redirected_link: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// A request whose fields passed boundary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedShortenUrlRequest {
    pub shortened_url: String,
    pub redirected_link: String,
}

impl ShortenUrlRequest {
    /// Validates the request and unwraps both fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] listing every failing field in `details`.
    pub fn into_validated(self) -> Result<ValidatedShortenUrlRequest, AppError> {
        self.validate()?;

        match (self.shortened_url, self.redirected_link) {
            (Some(shortened_url), Some(redirected_link)) => Ok(ValidatedShortenUrlRequest {
                shortened_url,
                redirected_link,
            }),
            _ => Err(AppError::invalid_input(
                "Request validation failed",
                serde_json::json!({}),
            )),
        }
    }
}

/// Confirmation returned with `201 Created`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenUrlResponse {
    pub shortened_url: String,
    pub redirected_link: String,
    pub created_at: DateTime<Utc>,
    pub message: String,
}

impl From<MappingConfirmation> for ShortenUrlResponse {
    fn from(confirmation: MappingConfirmation) -> Self {
        Self {
            shortened_url: confirmation.shortened_url,
            redirected_link: confirmation.redirected_link,
            created_at: confirmation.created_at,
            message: confirmation.message,
        }
    }
}
