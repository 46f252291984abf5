mod common;

use axum::Router;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use snipurl::routes::build_router;
use snipurl::state::AppState;

fn test_server(state: AppState, per_second: u64, burst: u32) -> TestServer {
    let app: Router = build_router(state, per_second, burst).layer(common::MockConnectInfoLayer);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_full_flow_through_router() {
    let server = test_server(common::create_test_state(&["abc123"]), 100, 100);

    let created = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/a" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    assert_eq!(created.json::<serde_json::Value>()["code"], "abc123");

    let redirect = server.get("/abc123").await;
    assert_eq!(redirect.status_code(), 307);
    assert_eq!(redirect.header("location"), "https://example.com/a");

    server.get("/zzz999").await.assert_status_not_found();
    server.get("/health").await.assert_status_ok();
    server.get("/").await.assert_status_ok();

    let list = server.get("/api/mappings").await.json::<serde_json::Value>();
    assert_eq!(list[0]["clicks"], 1);
}

#[tokio::test]
async fn test_fixed_routes_take_precedence_over_codes() {
    let server = test_server(common::create_test_state(&[]), 100, 100);

    let health = server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<serde_json::Value>()["status"], "healthy");
}

#[tokio::test]
async fn test_submission_routes_are_rate_limited() {
    let server = test_server(common::create_test_state(&[]), 1, 2);

    for _ in 0..2 {
        server
            .post("/api/shorten")
            .json(&json!({ "url": "https://example.com/limited" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let limited = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/limited" }))
        .await;
    assert_eq!(limited.status_code(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_redirects_are_not_rate_limited() {
    let state = common::create_test_state(&["free1"]);
    state
        .submission_service
        .submit("https://example.com/free")
        .await
        .unwrap();
    let server = test_server(state, 1, 1);

    for _ in 0..5 {
        assert_eq!(server.get("/free1").await.status_code(), 307);
    }
}
