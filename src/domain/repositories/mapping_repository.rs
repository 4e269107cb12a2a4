//! Repository trait for short code mapping storage.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short code mappings.
///
/// Implementations must enforce short code uniqueness themselves: callers check
/// [`exists`](MappingRepository::exists) first, but that check is not atomic with
/// [`save`](MappingRepository::save), so a concurrent writer can still win the race.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Returns true if a mapping with exactly this code exists, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn exists(&self, short_code: &str) -> Result<bool, AppError>;

    /// Inserts a new mapping as one atomic unit of work.
    ///
    /// The store assigns `id`, `created_at` and `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::InvalidInput`] if the code or URL exceeds its length bound.
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn save(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Finds a mapping by its short code regardless of `is_active`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Finds a mapping by its short code, only if it is active.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn find_active_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<UrlMapping>, AppError>;

    /// Counts all stored mappings.
    async fn count(&self) -> Result<i64, AppError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
