//! Short code extraction from a client-submitted "shortened URL".
//!
//! Clients may send either a full URL (`https://short.ly/promo`) or a bare path
//! (`promo`, `/promo`). Both forms resolve to the same short code.

use url::Url;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodeExtractionError {
    #[error("shortened URL cannot be empty")]
    Empty,
}

/// Derives the canonical short code from a raw input string.
///
/// # Rules
///
/// 1. Blank input (after trimming) is rejected
/// 2. Absolute URL: the path without its leading `/` is the code
/// 3. Absolute URL with an empty path (domain root): the whole raw input is the code
/// 4. Anything else: the trimmed input without its leading `/` is the code
///
/// Only hierarchical URLs (`scheme://...`) count as absolute. Inputs such as
/// `localhost:8080/x` parse as opaque URLs and take the bare-path branch.
/// The path is taken from the input text as written, so it is neither
/// percent-encoded nor dot-segment normalised: `https://short.ly/café` and
/// `café` resolve to the same code. `Url::parse` only decides whether the
/// input is absolute.
///
/// No character-set or length restriction is applied here; the storage layer
/// enforces the length bound.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_short_code("https://short.ly/promo").unwrap(), "promo");
/// assert_eq!(extract_short_code("/abc").unwrap(), "abc");
/// assert_eq!(extract_short_code("https://example.com").unwrap(), "https://example.com");
/// ```
pub fn extract_short_code(raw: &str) -> Result<String, CodeExtractionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CodeExtractionError::Empty);
    }

    match Url::parse(raw) {
        Ok(url) if !url.cannot_be_a_base() => {
            let path = strip_leading_slash(raw_path(trimmed));
            // Domain root: the raw input itself becomes the code.
            if path.is_empty() {
                Ok(raw.to_string())
            } else {
                Ok(path.to_string())
            }
        }
        _ => Ok(strip_leading_slash(trimmed).to_string()),
    }
}

/// Path of an absolute URL as it appears in `input`: the text after
/// `scheme:` and an optional `//authority`, up to the first `?` or `#`.
fn raw_path(input: &str) -> &str {
    let after_scheme = input.split_once(':').map_or(input, |(_, rest)| rest);

    let path_and_rest = match after_scheme.strip_prefix("//") {
        Some(authority_and_path) => authority_and_path
            .find(['/', '?', '#'])
            .map_or("", |i| &authority_and_path[i..]),
        None => after_scheme,
    };

    path_and_rest
        .find(['?', '#'])
        .map_or(path_and_rest, |i| &path_and_rest[..i])
}

fn strip_leading_slash(s: &str) -> &str {
    s.strip_prefix('/').unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_path_becomes_code() {
        assert_eq!(extract_short_code("https://short.ly/promo").unwrap(), "promo");
        assert_eq!(extract_short_code("http://example.com/foo").unwrap(), "foo");
    }

    #[test]
    fn test_nested_path_is_kept() {
        assert_eq!(
            extract_short_code("https://short.ly/campaign/2025").unwrap(),
            "campaign/2025"
        );
    }

    #[test]
    fn test_query_and_fragment_are_ignored() {
        assert_eq!(
            extract_short_code("https://short.ly/promo?utm=x#top").unwrap(),
            "promo"
        );
    }

    #[test]
    fn test_domain_root_falls_back_to_raw_input() {
        assert_eq!(
            extract_short_code("https://example.com").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            extract_short_code("https://example.com/").unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_bare_code() {
        assert_eq!(extract_short_code("abc").unwrap(), "abc");
        assert_eq!(extract_short_code("abc123").unwrap(), "abc123");
    }

    #[test]
    fn test_bare_path_strips_single_slash() {
        assert_eq!(extract_short_code("/abc").unwrap(), "abc");
        assert_eq!(extract_short_code("  /abc  ").unwrap(), "abc");
        assert_eq!(extract_short_code("//abc").unwrap(), "/abc");
    }

    #[test]
    fn test_opaque_url_takes_bare_path_branch() {
        assert_eq!(
            extract_short_code("localhost:8080/x").unwrap(),
            "localhost:8080/x"
        );
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(extract_short_code(""), Err(CodeExtractionError::Empty));
        assert_eq!(extract_short_code("   \t"), Err(CodeExtractionError::Empty));
        assert_eq!(
            CodeExtractionError::Empty.to_string(),
            "shortened URL cannot be empty"
        );
    }

    #[test]
    fn test_deterministic() {
        let first = extract_short_code("https://short.ly/same").unwrap();
        let second = extract_short_code("https://short.ly/same").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_ascii_path_is_not_percent_encoded() {
        assert_eq!(extract_short_code("https://short.ly/café").unwrap(), "café");
        assert_eq!(
            extract_short_code("https://short.ly/café").unwrap(),
            extract_short_code("café").unwrap()
        );
    }

    #[test]
    fn test_space_in_path_is_kept() {
        assert_eq!(
            extract_short_code("https://short.ly/summer sale").unwrap(),
            "summer sale"
        );
    }

    #[test]
    fn test_dot_segments_are_kept() {
        assert_eq!(extract_short_code("https://short.ly/a/../b").unwrap(), "a/../b");
        assert_eq!(extract_short_code("https://short.ly/./x").unwrap(), "./x");
    }

    #[test]
    fn test_code_never_longer_than_input() {
        let raw = format!("https://s.ly/{}", "é".repeat(240));
        let code = extract_short_code(&raw).unwrap();

        assert_eq!(code, "é".repeat(240));
        assert!(code.chars().count() <= raw.chars().count());
    }

    #[test]
    fn test_authority_with_port_and_userinfo() {
        assert_eq!(
            extract_short_code("http://user:pw@short.ly:8080/promo").unwrap(),
            "promo"
        );
        assert_eq!(
            extract_short_code("https://short.ly?promo=1").unwrap(),
            "https://short.ly?promo=1"
        );
    }

    #[test]
    fn test_mailto_takes_bare_path_branch() {
        assert_eq!(extract_short_code("mailto:promo").unwrap(), "mailto:promo");
    }
}
