//! Submission of new target URLs.

use std::sync::Arc;

use crate::application::services::MappingStore;
use crate::domain::entities::Mapping;
use crate::error::AppError;
use crate::utils::target_url::validate_target;

/// Accepts raw targets from the form and JSON endpoints.
///
/// Every accepted submission creates a new mapping: the same target submitted
/// twice gets two different codes.
pub struct SubmissionService {
    store: Arc<MappingStore>,
    base_url: String,
}

impl SubmissionService {
    /// Creates a submission service.
    ///
    /// `base_url` is the public origin used to build short URLs
    /// (e.g. `https://s.example.com`).
    pub fn new(store: Arc<MappingStore>, base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: base_url.into(),
        }
    }

    /// Validates `raw_target` and stores a new mapping for it.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the target is empty or not an http(s) URL;
    ///   nothing is written in that case
    /// - [`AppError::GenerationExhausted`] / [`AppError::Persistence`] from the store
    pub async fn submit(&self, raw_target: &str) -> Result<Mapping, AppError> {
        let target = validate_target(raw_target)?;
        self.store.put(&target).await
    }

    /// Builds the public short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
