mod common;

use async_trait::async_trait;
use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use std::sync::Arc;
use snipurl::api::handlers::health_handler;
use snipurl::infrastructure::cache::{CacheError, CacheResult, CacheService};
use snipurl::infrastructure::persistence::MemoryMappingRepository;
use snipurl::state::AppState;

struct UnreachableCache;

#[async_trait]
impl CacheService for UnreachableCache {
    async fn get_target(&self, _code: &str) -> CacheResult<Option<String>> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn set_target(
        &self,
        _code: &str,
        _target: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

fn test_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = test_server(common::create_test_state(&[]));

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = test_server(common::create_test_state(&[]));

    let json = server.get("/health").await.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("store").is_some());
    assert!(json["checks"].get("cache").is_some());
}

#[tokio::test]
async fn test_health_degraded_when_cache_unreachable() {
    let state = common::create_state_with(
        Arc::new(MemoryMappingRepository::new()),
        Arc::new(common::SequenceCodeGenerator::new(&[])),
        Arc::new(UnreachableCache),
    );
    let server = test_server(state);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "error");
}

#[tokio::test]
async fn test_redirect_survives_unreachable_cache() {
    let state = common::create_state_with(
        Arc::new(MemoryMappingRepository::new()),
        Arc::new(common::SequenceCodeGenerator::new(&["cache1"])),
        Arc::new(UnreachableCache),
    );

    state
        .submission_service
        .submit("https://example.com/no-cache")
        .await
        .unwrap();

    let target = state.redirect_resolver.resolve("cache1").await.unwrap();
    assert_eq!(target, "https://example.com/no-cache");

    let mapping = state.mapping_store.get_by_code("cache1").await.unwrap();
    assert_eq!(mapping.clicks, 1);
}
