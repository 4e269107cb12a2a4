//! In-memory implementation of the mapping repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::db_error::SHORT_CODE_UNIQUE_CONSTRAINT;

/// Process-local mapping store backed by a [`DashMap`].
///
/// `save` claims the short code through the map's entry API, which holds the
/// shard lock for the whole check-and-insert, so concurrent saves of the same
/// code behave like a unique index: exactly one wins.
///
/// Data is lost on restart. Intended for local runs (`STORAGE_BACKEND=memory`)
/// and tests.
#[derive(Debug)]
pub struct InMemoryMappingRepository {
    storage: DashMap<String, UrlMapping>,
    next_id: AtomicI64,
}

impl InMemoryMappingRepository {
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryMappingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn exists(&self, short_code: &str) -> Result<bool, AppError> {
        Ok(self.storage.contains_key(short_code))
    }

    async fn save(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        new_mapping.check_bounds()?;

        match self.storage.entry(new_mapping.short_code) {
            Entry::Occupied(occupied) => Err(AppError::conflict(
                "Unique constraint violation",
                json!({
                    "constraint": SHORT_CODE_UNIQUE_CONSTRAINT,
                    "short_code": occupied.key(),
                }),
            )),
            Entry::Vacant(vacant) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let mapping = UrlMapping::new(
                    id,
                    vacant.key().clone(),
                    new_mapping.original_url,
                    Utc::now(),
                );
                vacant.insert(mapping.clone());
                Ok(mapping)
            }
        }
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        Ok(self.storage.get(short_code).map(|entry| entry.value().clone()))
    }

    async fn find_active_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        Ok(self
            .storage
            .get(short_code)
            .filter(|entry| entry.is_active)
            .map(|entry| entry.value().clone()))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.storage.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_save_assigns_id_and_timestamps() {
        let repo = InMemoryMappingRepository::new();

        let first = repo
            .save(NewUrlMapping::new("promo", "https://example.com/landing"))
            .await
            .unwrap();
        let second = repo
            .save(NewUrlMapping::new("other", "https://example.com"))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.short_code, "promo");
        assert_eq!(first.created_at, first.updated_at);
        assert!(first.is_active);
        assert_eq!(first.click_count, 0);
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_code() {
        let repo = InMemoryMappingRepository::new();
        repo.save(NewUrlMapping::new("promo", "https://first.com"))
            .await
            .unwrap();

        let result = repo
            .save(NewUrlMapping::new("promo", "https://second.com"))
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
        assert_eq!(repo.count().await.unwrap(), 1);
        let stored = repo.find_by_short_code("promo").await.unwrap().unwrap();
        assert_eq!(stored.original_url, "https://first.com");
    }

    #[tokio::test]
    async fn test_save_rejects_oversized_code() {
        let repo = InMemoryMappingRepository::new();

        let result = repo
            .save(NewUrlMapping::new("x".repeat(256), "https://example.com"))
            .await;

        assert!(matches!(result, Err(AppError::InvalidInput { .. })));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_exists_is_exact_match() {
        let repo = InMemoryMappingRepository::new();
        repo.save(NewUrlMapping::new("Promo", "https://example.com"))
            .await
            .unwrap();

        assert!(repo.exists("Promo").await.unwrap());
        assert!(!repo.exists("promo").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_active_skips_inactive() {
        let repo = InMemoryMappingRepository::new();
        repo.save(NewUrlMapping::new("old", "https://example.com"))
            .await
            .unwrap();
        repo.storage.get_mut("old").unwrap().is_active = false;

        assert!(repo.find_by_short_code("old").await.unwrap().is_some());
        assert!(repo.find_active_by_short_code("old").await.unwrap().is_none());
        assert!(repo.exists("old").await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_single_winner() {
        let repo = Arc::new(InMemoryMappingRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.save(NewUrlMapping::new("race", format!("https://example.com/{i}")))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(AppError::Conflict { .. }) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
