//! Repository trait for mapping storage.

use crate::domain::entities::{Mapping, NewMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage backend for short code mappings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryMappingRepository`] - in-process
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Inserts a mapping with `clicks = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already taken.
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, AppError>;

    /// Finds a mapping by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Mapping>, AppError>;

    /// Atomically adds one to the click counter of `code`.
    ///
    /// The increment happens inside the backend (a single `UPDATE` statement or
    /// an atomic integer), never as read-modify-write in the caller.
    ///
    /// Returns `Ok(false)` if no mapping has this code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError>;

    /// Returns every mapping in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn list_all(&self) -> Result<Vec<Mapping>, AppError>;

    /// Checks that the backend is reachable.
    async fn health_check(&self) -> bool;
}
