//! Handler for the mapping creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::shorten::{ShortenUrlRequest, ShortenUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Maps a short code to a destination URL.
///
/// # Endpoint
///
/// `POST /api/shortenUrl`
///
/// # Request Body
///
/// ```json
/// {
///   "shortenedUrl": "https://short.ly/promo",
///   "redirectedLink": "https://example.com/landing"
/// }
/// ```
///
/// # Response
///
/// `201 Created`:
///
/// ```json
/// {
///   "shortenedUrl": "https://short.ly/promo",
///   "redirectedLink": "https://example.com/landing",
///   "createdAt": "2025-01-01T12:00:00Z",
///   "message": "URL mapping created successfully"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request` - malformed body, missing/blank/oversized field, invalid URL
/// - `409 Conflict` - the derived short code already exists
/// - `503 Service Unavailable` - storage failure
pub async fn shorten_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenUrlResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::invalid_input(
            "Malformed request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    let request = payload.into_validated()?;

    let confirmation = state
        .shortening_service
        .create_short_mapping(&request.shortened_url, &request.redirected_link)
        .await?;

    Ok((StatusCode::CREATED, Json(confirmation.into())))
}
