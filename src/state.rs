//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{MappingStore, RedirectResolver, SubmissionService};
use crate::infrastructure::cache::CacheService;

/// Handles to the services, built once at startup by [`crate::server::run`].
///
/// The store handle inside is the only connection to the backing storage;
/// cloning the state clones `Arc`s, never connections.
#[derive(Clone)]
pub struct AppState {
    pub mapping_store: Arc<MappingStore>,
    pub redirect_resolver: Arc<RedirectResolver>,
    pub submission_service: Arc<SubmissionService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Wires the services around a single store and cache.
    pub fn new(
        mapping_store: Arc<MappingStore>,
        cache: Arc<dyn CacheService>,
        base_url: impl Into<String>,
        click_retries: usize,
    ) -> Self {
        let redirect_resolver = Arc::new(RedirectResolver::new(
            mapping_store.clone(),
            cache.clone(),
            click_retries,
        ));
        let submission_service = Arc::new(SubmissionService::new(mapping_store.clone(), base_url));

        Self {
            mapping_store,
            redirect_resolver,
            submission_service,
            cache,
        }
    }
}
