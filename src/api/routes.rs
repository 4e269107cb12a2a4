//! API route configuration.

use crate::api::handlers::shorten_url_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// All API routes.
///
/// # Endpoints
///
/// - `POST /shortenUrl` - Create a short code mapping
pub fn routes() -> Router<AppState> {
    Router::new().route("/shortenUrl", post(shorten_url_handler))
}
