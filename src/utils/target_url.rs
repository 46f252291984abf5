//! Well-formedness checks for submitted target URLs.
//!
//! Targets are stored exactly as submitted (minus surrounding whitespace);
//! nothing is rewritten, so a redirect always returns the URL the user gave.

use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Upper bound on stored target length.
pub const MAX_TARGET_LENGTH: usize = 2048;

/// Reasons a submitted target is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TargetUrlError {
    #[error("Target URL must not be empty")]
    Empty,

    #[error("Target URL is too long (max {MAX_TARGET_LENGTH} characters)")]
    TooLong,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS URLs can be shortened")]
    UnsupportedProtocol,

    #[error("Target URL has no host")]
    MissingHost,
}

impl From<TargetUrlError> for AppError {
    fn from(e: TargetUrlError) -> Self {
        AppError::bad_request(e.to_string(), json!({ "field": "url" }))
    }
}

/// Checks that `input` is an absolute `http`/`https` URL with a host.
///
/// Returns the trimmed input on success.
///
/// # Errors
///
/// - [`TargetUrlError::Empty`] for empty or whitespace-only input
/// - [`TargetUrlError::TooLong`] above [`MAX_TARGET_LENGTH`] characters
/// - [`TargetUrlError::InvalidFormat`] when the URL does not parse
/// - [`TargetUrlError::UnsupportedProtocol`] for `javascript:`, `data:`, `ftp:` …
/// - [`TargetUrlError::MissingHost`] for URLs like `http:///path`
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_target("  https://example.com/a ").unwrap(), "https://example.com/a");
/// assert!(validate_target("").is_err());
/// assert!(validate_target("javascript:alert(1)").is_err());
/// ```
pub fn validate_target(input: &str) -> Result<String, TargetUrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(TargetUrlError::Empty);
    }

    if trimmed.len() > MAX_TARGET_LENGTH {
        return Err(TargetUrlError::TooLong);
    }

    let url = Url::parse(trimmed).map_err(|e| TargetUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(TargetUrlError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(TargetUrlError::MissingHost);
    }

    Ok(trimmed.to_string())
}
