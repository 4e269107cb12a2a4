//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::db_error::{SHORT_CODE_UNIQUE_CONSTRAINT, is_unique_violation_on_short_code};

const SELECT_COLUMNS: &str = "id, short_code, original_url, created_at, updated_at, \
                              expires_at, click_count, is_active";

/// Row shape of the `url_mappings` table.
#[derive(sqlx::FromRow)]
struct UrlMappingRow {
    id: i64,
    short_code: String,
    original_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    click_count: i64,
    is_active: bool,
}

impl From<UrlMappingRow> for UrlMapping {
    fn from(row: UrlMappingRow) -> Self {
        Self {
            id: row.id,
            short_code: row.short_code,
            original_url: row.original_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
            expires_at: row.expires_at,
            click_count: row.click_count,
            is_active: row.is_active,
        }
    }
}

/// PostgreSQL repository for short code mappings.
///
/// Uniqueness is guarded by the `url_mappings_short_code_key` constraint, so two
/// concurrent inserts of the same code cannot both commit.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn exists(&self, short_code: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM url_mappings WHERE short_code = $1)")
                .bind(short_code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn save(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        new_mapping.check_bounds()?;

        // Dropping `tx` on any early return rolls the insert back.
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UrlMappingRow>(&format!(
            "INSERT INTO url_mappings (short_code, original_url) VALUES ($1, $2) \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&new_mapping.short_code)
        .bind(&new_mapping.original_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation_on_short_code(&e) {
                AppError::conflict(
                    "Unique constraint violation",
                    json!({
                        "constraint": SHORT_CODE_UNIQUE_CONSTRAINT,
                        "short_code": new_mapping.short_code,
                    }),
                )
            } else {
                AppError::from(e)
            }
        })?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM url_mappings WHERE short_code = $1"
        ))
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn find_active_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM url_mappings WHERE short_code = $1 AND is_active"
        ))
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
