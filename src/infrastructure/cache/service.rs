//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache for code → target lookups on the redirect path.
///
/// Targets never change once a mapping exists and mappings are never deleted,
/// so an entry is valid for as long as it lives. Click counts are never cached.
///
/// Implementations fail open: backend errors are logged and reported as a miss.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached target for `code`, `Ok(None)` on miss.
    async fn get_target(&self, code: &str) -> CacheResult<Option<String>>;

    /// Stores `target` under `code`. `ttl_seconds = None` uses the backend default.
    async fn set_target(&self, code: &str, target: &str, ttl_seconds: Option<u64>)
    -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
