//! Redirect resolution with click counting.

use std::sync::Arc;

use serde_json::json;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, warn};

use crate::application::services::MappingStore;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::is_well_formed_code;

/// Default number of retries for a failed click increment.
pub const DEFAULT_CLICK_RETRIES: usize = 2;

/// Resolves short codes to targets and counts the click.
///
/// # Request Flow
///
/// 1. Reject codes that could never have been issued (404, no I/O)
/// 2. Look the target up in the cache, falling back to the store
/// 3. Populate the cache on a store hit
/// 4. Increment the click counter in the store, retrying transient failures
/// 5. Return the target
///
/// The increment is awaited before the target is returned. If it still fails
/// after the retries, the failure is logged with the code and counted in
/// `click_increment_failures_total`, and the redirect is served anyway.
pub struct RedirectResolver {
    store: Arc<MappingStore>,
    cache: Arc<dyn CacheService>,
    click_retries: usize,
}

impl RedirectResolver {
    pub fn new(store: Arc<MappingStore>, cache: Arc<dyn CacheService>, click_retries: usize) -> Self {
        Self {
            store,
            cache,
            click_retries,
        }
    }

    /// Returns the target for `code` and records one click.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code is unknown
    /// - [`AppError::Persistence`] if the lookup itself fails
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if !is_well_formed_code(code) {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        let target = self.lookup_target(code).await?;

        self.record_click(code).await;
        metrics::counter!("redirects_total").increment(1);

        Ok(target)
    }

    async fn lookup_target(&self, code: &str) -> Result<String, AppError> {
        match self.cache.get_target(code).await {
            Ok(Some(target)) => return Ok(target),
            Ok(None) => {}
            Err(e) => warn!(code, error = %e, "Cache lookup failed, falling back to store"),
        }

        let mapping = self.store.get_by_code(code).await?;

        let cache = self.cache.clone();
        let cached_code = mapping.code.clone();
        let cached_target = mapping.target.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.set_target(&cached_code, &cached_target, None).await {
                error!(code = %cached_code, error = %e, "Failed to cache target");
            }
        });

        Ok(mapping.target)
    }

    async fn record_click(&self, code: &str) {
        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(std::time::Duration::from_millis(200))
            .map(jitter)
            .take(self.click_retries);

        let mut attempt = 0usize;
        let result = Retry::start(strategy, || {
            attempt += 1;
            if attempt > 1 {
                debug!(code, attempt, "Retrying click increment");
            }
            self.store.increment_clicks(code)
        })
        .await;

        if let Err(e) = result {
            metrics::counter!("click_increment_failures_total").increment(1);
            error!(
                code,
                attempts = attempt,
                kind = e.kind(),
                error = %e,
                "Click increment failed, click not counted"
            );
        }
    }
}
