//! HTTP request handlers for API endpoints.

pub mod health;
pub mod shorten;

pub use health::health_handler;
pub use shorten::shorten_url_handler;
