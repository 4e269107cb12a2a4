//! Helpers for classifying PostgreSQL errors surfaced through SQLx.

/// Name of the unique constraint guarding `url_mappings.short_code`.
pub const SHORT_CODE_UNIQUE_CONSTRAINT: &str = "url_mappings_short_code_key";

/// SQLSTATE `string_data_right_truncation`, raised when a value exceeds a `VARCHAR(n)`.
const VALUE_TOO_LONG: &str = "22001";

pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

pub fn is_unique_violation_on_short_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_CODE_UNIQUE_CONSTRAINT))
}

pub fn is_value_too_long(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == VALUE_TOO_LONG)
}
