//! Application error type and its HTTP representation.
//!
//! Every failure the service can report falls into one of three kinds:
//!
//! - [`AppError::InvalidInput`] - malformed request fields or destination URL (400)
//! - [`AppError::Conflict`] - short code already taken (409)
//! - [`AppError::StorageUnavailable`] - persistence failure unrelated to uniqueness (503)

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::db_error::{is_unique_violation, is_value_too_long};

/// JSON body returned for every error response.
///
/// ```json
/// {
///   "error": "conflict",
///   "message": "short code already exists: promo",
///   "details": { "short_code": "promo" },
///   "timestamp": "2025-01-01T12:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    pub details: Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    InvalidInput { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    StorageUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn storage_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code used in the `error` field of the response.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput { .. } => "invalid_input",
            AppError::Conflict { .. } => "conflict",
            AppError::StorageUnavailable { .. } => "storage_unavailable",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::StorageUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict { .. })
    }

    /// Builds the serializable error body, stamped with the current time.
    pub fn to_error_body(&self) -> ErrorBody {
        let (message, details) = match self {
            AppError::InvalidInput { message, details }
            | AppError::Conflict { message, details }
            | AppError::StorageUnavailable { message, details } => (message, details),
        };

        ErrorBody {
            error: self.code(),
            message: message.clone(),
            details: details.clone(),
            timestamp: Utc::now(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_error_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Request validation failures, keyed by the camelCase JSON field name.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map_or_else(|| e.code.to_string(), |m| m.to_string())
                    })
                    .unwrap_or_default();
                (to_camel_case(&field), Value::String(message))
            })
            .collect();

        AppError::invalid_input("Request validation failed", json!({ "fields": fields }))
    }
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Classifies a database error.
///
/// Unique violations become [`AppError::Conflict`] carrying the constraint name,
/// oversized values become [`AppError::InvalidInput`], and anything else is logged
/// and reported as [`AppError::StorageUnavailable`] without leaking driver details.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        let constraint = e
            .as_database_error()
            .and_then(|db| db.constraint())
            .map(str::to_owned);
        return AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": constraint }),
        );
    }

    if is_value_too_long(&e) {
        return AppError::invalid_input("Value exceeds column length", json!({}));
    }

    tracing::error!(error = %e, "Database error");
    AppError::storage_unavailable("Storage is unavailable", json!({}))
}
