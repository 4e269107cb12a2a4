//! Short code mapping creation service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::NewUrlMapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::code_extractor::extract_short_code;
use crate::utils::url_validator::{UrlValidationError, validate_destination_url};

/// Message returned on every successful creation.
pub const CREATED_MESSAGE: &str = "URL mapping created successfully";

/// Outcome of a successful mapping creation.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingConfirmation {
    /// The shortened URL exactly as the caller submitted it (not the derived code).
    pub shortened_url: String,
    pub redirected_link: String,
    /// Creation timestamp assigned by the store.
    pub created_at: DateTime<Utc>,
    pub message: String,
}

/// Service that turns a (shortened URL, destination) pair into a stored mapping.
///
/// Generic over the repository so handlers can share a trait object while unit
/// tests plug in a mock.
pub struct ShorteningService<R: MappingRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: MappingRepository + ?Sized> ShorteningService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a new mapping.
    ///
    /// # Flow
    ///
    /// 1. Derive the short code from `raw_shortened_url`
    /// 2. Validate `destination_url`
    /// 3. Reject codes that already exist
    /// 4. Persist the mapping
    ///
    /// Step 3 and 4 are not atomic. A concurrent request may claim the code in
    /// between; the store rejects the second insert and it is reported exactly
    /// like a pre-check conflict.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the input is blank or the destination
    /// is not an `http`/`https` URL.
    /// Returns [`AppError::Conflict`] if the short code is taken.
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    pub async fn create_short_mapping(
        &self,
        raw_shortened_url: &str,
        destination_url: &str,
    ) -> Result<MappingConfirmation, AppError> {
        let short_code = extract_short_code(raw_shortened_url).map_err(|e| {
            AppError::invalid_input(e.to_string(), json!({ "field": "shortenedUrl" }))
        })?;

        validate_destination_url(destination_url).map_err(|e| {
            let details = match &e {
                UrlValidationError::Empty => json!({ "field": "redirectedLink" }),
                UrlValidationError::InvalidFormat(url) => {
                    json!({ "field": "redirectedLink", "url": url })
                }
            };
            AppError::invalid_input(e.to_string(), details)
        })?;

        if self.repository.exists(&short_code).await? {
            metrics::counter!("url_mapping_conflicts_total", "stage" => "pre_check").increment(1);
            tracing::info!(short_code = %short_code, "Short code already exists");
            return Err(duplicate_code(&short_code));
        }

        let new_mapping = NewUrlMapping::new(short_code.clone(), destination_url);

        let mapping = match self.repository.save(new_mapping).await {
            Ok(mapping) => mapping,
            Err(e) if e.is_conflict() => {
                metrics::counter!("url_mapping_conflicts_total", "stage" => "on_write")
                    .increment(1);
                tracing::info!(short_code = %short_code, "Short code claimed concurrently");
                return Err(duplicate_code(&short_code));
            }
            Err(e) => return Err(e),
        };

        metrics::counter!("url_mappings_created_total").increment(1);
        tracing::info!(
            id = mapping.id,
            short_code = %mapping.short_code,
            "URL mapping created"
        );

        Ok(MappingConfirmation {
            shortened_url: raw_shortened_url.to_string(),
            redirected_link: destination_url.to_string(),
            created_at: mapping.created_at,
            message: CREATED_MESSAGE.to_string(),
        })
    }

    /// Probes the underlying store.
    ///
    /// # Errors
    ///
    /// Returns the store error if it cannot be reached.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

fn duplicate_code(short_code: &str) -> AppError {
    AppError::conflict(
        format!("short code already exists: {short_code}"),
        json!({ "short_code": short_code }),
    )
}
