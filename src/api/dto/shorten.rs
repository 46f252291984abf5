//! DTOs for the shortening endpoint.

use serde::Deserialize;
use validator::Validate;

/// Request to shorten a single URL.
///
/// Only emptiness is checked here; the target is fully validated by
/// [`crate::application::services::MappingStore::put`].
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub url: String,
}
