//! Destination URL validation.

use url::Url;

/// Errors that can occur during destination URL validation.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("redirected link cannot be empty")]
    Empty,

    #[error("invalid URL format: {0}")]
    InvalidFormat(String),
}

/// Checks that `input` is an absolute `http` or `https` URL.
///
/// Validation is pass/fail only: the caller keeps using the original string.
/// Any other scheme (`ftp:`, `javascript:`, `data:`...) is reported the same way
/// as an unparsable URL, with the offending value embedded in the message.
///
/// # Errors
///
/// Returns [`UrlValidationError::Empty`] for blank input.
/// Returns [`UrlValidationError::InvalidFormat`] for malformed URLs or other schemes.
pub fn validate_destination_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(input).map_err(|_| UrlValidationError::InvalidFormat(input.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(UrlValidationError::InvalidFormat(input.to_string())),
    }
}
