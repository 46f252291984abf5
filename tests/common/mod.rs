#![allow(dead_code)]

use axum::extract::ConnectInfo;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower::Layer;

use snipurl::application::services::MappingStore;
use snipurl::domain::repositories::MappingRepository;
use snipurl::infrastructure::cache::{CacheService, NullCache};
use snipurl::infrastructure::persistence::MemoryMappingRepository;
use snipurl::state::AppState;
use snipurl::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

pub const BASE_URL: &str = "http://s.test";

/// Hands out the queued codes in order, then falls back to random ones.
pub struct SequenceCodeGenerator {
    codes: Mutex<VecDeque<String>>,
    fallback: RandomCodeGenerator,
}

impl SequenceCodeGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            fallback: RandomCodeGenerator::default(),
        }
    }
}

impl CodeGenerator for SequenceCodeGenerator {
    fn generate(&self) -> String {
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.generate())
    }
}

pub fn create_state_with(
    repository: Arc<dyn MappingRepository>,
    generator: Arc<dyn CodeGenerator>,
    cache: Arc<dyn CacheService>,
) -> AppState {
    let store = Arc::new(MappingStore::new(repository, generator, 10));
    AppState::new(store, cache, BASE_URL, 2)
}

/// In-memory state whose generator yields `codes` first.
pub fn create_test_state(codes: &[&str]) -> AppState {
    create_state_with(
        Arc::new(MemoryMappingRepository::new()),
        Arc::new(SequenceCodeGenerator::new(codes)),
        Arc::new(NullCache::new()),
    )
}

/// Inserts the peer address the rate limiter keys on.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
