//! PostgreSQL repository tests.
//!
//! Each test gets a fresh database with `./migrations` applied; `DATABASE_URL`
//! must point at a reachable server.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use url_mapper::AppError;
use url_mapper::domain::entities::NewUrlMapping;
use url_mapper::domain::repositories::MappingRepository;
use url_mapper::infrastructure::persistence::PgMappingRepository;

#[sqlx::test]
async fn test_save_mapping(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));

    let mapping = repo
        .save(NewUrlMapping::new("promo", "https://example.com/landing"))
        .await
        .unwrap();

    assert!(mapping.id > 0);
    assert_eq!(mapping.short_code, "promo");
    assert_eq!(mapping.original_url, "https://example.com/landing");
    assert_eq!(mapping.click_count, 0);
    assert!(mapping.is_active);
    assert!(mapping.expires_at.is_none());
}

#[sqlx::test]
async fn test_save_duplicate_code_is_conflict(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));

    repo.save(NewUrlMapping::new("taken", "https://first.com"))
        .await
        .unwrap();

    let result = repo
        .save(NewUrlMapping::new("taken", "https://second.com"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test]
async fn test_save_oversized_code_is_invalid_input(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));

    let result = repo
        .save(NewUrlMapping::new("x".repeat(300), "https://example.com"))
        .await;

    assert!(matches!(result, Err(AppError::InvalidInput { .. })));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[sqlx::test]
async fn test_exists_and_find(pool: PgPool) {
    common::insert_mapping(&pool, "live", "https://example.com/live", true).await;
    common::insert_mapping(&pool, "retired", "https://example.com/old", false).await;

    let repo = PgMappingRepository::new(Arc::new(pool));

    assert!(repo.exists("live").await.unwrap());
    assert!(repo.exists("retired").await.unwrap());
    assert!(!repo.exists("missing").await.unwrap());

    let live = repo.find_by_short_code("live").await.unwrap().unwrap();
    assert_eq!(live.original_url, "https://example.com/live");

    assert!(repo.find_by_short_code("retired").await.unwrap().is_some());
    assert!(
        repo.find_active_by_short_code("retired")
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        repo.find_active_by_short_code("live")
            .await
            .unwrap()
            .is_some()
    );
}

#[sqlx::test]
async fn test_short_code_is_immutable(pool: PgPool) {
    common::insert_mapping(&pool, "fixed", "https://example.com", true).await;

    let result = sqlx::query("UPDATE url_mappings SET short_code = 'moved' WHERE short_code = 'fixed'")
        .execute(&pool)
        .await;

    assert!(result.is_err());
}

#[sqlx::test]
async fn test_update_refreshes_updated_at(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool.clone()));
    let created = repo
        .save(NewUrlMapping::new("clicked", "https://example.com"))
        .await
        .unwrap();

    sqlx::query("UPDATE url_mappings SET click_count = click_count + 1 WHERE short_code = 'clicked'")
        .execute(&pool)
        .await
        .unwrap();

    let updated = repo.find_by_short_code("clicked").await.unwrap().unwrap();
    assert_eq!(updated.click_count, 1);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test]
async fn test_concurrent_creates_single_winner(pool: PgPool) {
    let state = common::create_pg_state(pool.clone());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let state = state.clone();
            tokio::spawn(async move {
                state
                    .shortening_service
                    .create_short_mapping("https://short.ly/race", &format!("https://example.com/{i}"))
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) => assert!(e.is_conflict(), "unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings WHERE short_code = 'race'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test]
async fn test_shorten_endpoint_against_postgres(pool: PgPool) {
    let state = common::create_pg_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let body = json!({
        "shortenedUrl": "https://short.ly/promo",
        "redirectedLink": "https://example.com/landing"
    });

    server
        .post("/api/shortenUrl")
        .json(&body)
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.post("/api/shortenUrl").json(&body).await;
    response.assert_status(StatusCode::CONFLICT);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["message"], "short code already exists: promo");
}
