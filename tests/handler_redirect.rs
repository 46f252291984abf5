mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;
use snipurl::api::handlers::{mappings_handler, redirect_handler, shorten_handler};
use snipurl::state::AppState;

fn test_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/api/shorten", axum::routing::post(shorten_handler))
        .route("/api/mappings", get(mappings_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

async fn clicks_of(server: &TestServer, code: &str) -> i64 {
    let list = server.get("/api/mappings").await.json::<serde_json::Value>();
    list.as_array()
        .unwrap()
        .iter()
        .find(|m| m["code"] == code)
        .map(|m| m["clicks"].as_i64().unwrap())
        .unwrap()
}

#[tokio::test]
async fn test_redirect_success() {
    let state = common::create_test_state(&["redirect1"]);
    let server = test_server(state);

    server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/target" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server.get("/redirect1").await;

    assert_eq!(response.status_code(), 307);
    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let server = test_server(common::create_test_state(&[]));

    let response = server.get("/notfound").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_malformed_code_is_not_found() {
    let server = test_server(common::create_test_state(&[]));

    let response = server.get("/not-a-code!").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_counts_clicks_scenario() {
    let state = common::create_test_state(&["abc123"]);
    let server = test_server(state);

    let created = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/a" }))
        .await
        .json::<serde_json::Value>();
    assert_eq!(created["code"], "abc123");
    assert_eq!(created["clicks"], 0);

    let first = server.get("/abc123").await;
    assert_eq!(first.status_code(), 307);
    assert_eq!(first.header("location"), "https://example.com/a");
    assert_eq!(clicks_of(&server, "abc123").await, 1);

    let second = server.get("/abc123").await;
    assert_eq!(second.status_code(), 307);
    assert_eq!(clicks_of(&server, "abc123").await, 2);

    server.get("/zzz999").await.assert_status_not_found();
    assert_eq!(clicks_of(&server, "abc123").await, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_redirects_count_every_click() {
    let state = common::create_test_state(&["hot1"]);
    state
        .submission_service
        .submit("https://example.com/hot")
        .await
        .unwrap();

    let resolver = Arc::clone(&state.redirect_resolver);
    let handles: Vec<_> = (0..100)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move { resolver.resolve("hot1").await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "https://example.com/hot");
    }

    let mapping = state.mapping_store.get_by_code("hot1").await.unwrap();
    assert_eq!(mapping.clicks, 100);
}
