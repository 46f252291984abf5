//! Mapping store: code allocation on top of a mapping repository.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::target_url::validate_target;

/// Default number of codes tried before giving up with `GenerationExhausted`.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Persists mappings and serves lookups.
///
/// Holds the process-wide repository handle. Code allocation is
/// insert-and-retry: a fresh code is inserted directly and a uniqueness
/// conflict triggers another attempt, so two concurrent submissions can never
/// end up sharing a code.
pub struct MappingStore {
    repository: Arc<dyn MappingRepository>,
    generator: Arc<dyn CodeGenerator>,
    max_attempts: usize,
}

impl MappingStore {
    /// Creates a store.
    ///
    /// `max_attempts` is clamped to at least 1.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        generator: Arc<dyn CodeGenerator>,
        max_attempts: usize,
    ) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Allocates a code for `target` and persists `{code, target, clicks: 0}`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `target` is empty or malformed
    /// - [`AppError::GenerationExhausted`] if every attempted code was taken
    /// - [`AppError::Persistence`] on storage failure
    pub async fn put(&self, target: &str) -> Result<Mapping, AppError> {
        let target = validate_target(target)?;

        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate();

            let new_mapping = NewMapping {
                code: code.clone(),
                target: target.clone(),
            };

            match self.repository.insert(new_mapping).await {
                Ok(mapping) => {
                    info!(code = %mapping.code, target = %mapping.target, "Mapping created");
                    return Ok(mapping);
                }
                Err(AppError::Conflict { .. }) => {
                    debug!(code = %code, attempt, "Code collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::generation_exhausted(
            "Failed to generate unique code",
            json!({ "attempts": self.max_attempts, "target": target }),
        ))
    }

    /// Looks a mapping up by code.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no mapping has this code
    /// - [`AppError::Persistence`] on storage failure
    pub async fn get_by_code(&self, code: &str) -> Result<Mapping, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Atomically adds one click to `code`.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no mapping has this code
    /// - [`AppError::Persistence`] on storage failure
    pub async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        if self.repository.increment_clicks(code).await? {
            Ok(())
        } else {
            Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ))
        }
    }

    /// Returns every mapping in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage failure.
    pub async fn list_all(&self) -> Result<Vec<Mapping>, AppError> {
        self.repository.list_all().await
    }

    /// Checks that the backing store is reachable.
    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }
}
