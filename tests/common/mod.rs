#![allow(dead_code)]

use axum::Router;
use axum::extract::Request;
use axum::routing::IntoMakeService;
use sqlx::PgPool;
use std::sync::Arc;
use axum::ServiceExt;
use tower_http::normalize_path::NormalizePath;
use url_mapper::infrastructure::persistence::{InMemoryMappingRepository, PgMappingRepository};
use url_mapper::routes::app_router;
use url_mapper::state::AppState;

pub fn create_memory_state() -> (AppState, Arc<InMemoryMappingRepository>) {
    let repo = Arc::new(InMemoryMappingRepository::new());
    let state = AppState::new(repo.clone());
    (state, repo)
}

pub fn create_pg_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(PgMappingRepository::new(Arc::new(pool))))
}

/// The production router, middleware included.
pub fn test_app(state: AppState) -> IntoMakeService<NormalizePath<Router>> {
    ServiceExt::<Request>::into_make_service(app_router(state))
}

pub async fn insert_mapping(pool: &PgPool, code: &str, url: &str, is_active: bool) {
    sqlx::query("INSERT INTO url_mappings (short_code, original_url, is_active) VALUES ($1, $2, $3)")
        .bind(code)
        .bind(url)
        .bind(is_active)
        .execute(pool)
        .await
        .unwrap();
}
