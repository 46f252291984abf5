//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`              - Listing page with submission form
//! - `POST /shortUrls`     - Form submission (rate limited)
//! - `GET  /{code}`        - Short link redirect
//! - `GET  /health`        - Health check: store and cache
//! - `POST /api/shorten`   - JSON submission (rate limited)
//! - `GET  /api/mappings`  - JSON listing
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on submission routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router without path normalization.
///
/// `/{code}` is registered next to the static routes; axum matches static
/// segments first, so `/health` and `/shortUrls` never reach the redirect
/// handler.
pub fn build_router(state: AppState, per_second: u64, burst: u32) -> Router {
    let limiter = rate_limit::layer(per_second, burst);

    let api_router = api::routes::public_routes()
        .merge(api::routes::submission_routes().layer(limiter.clone()));

    let web_router = web::routes::public_routes()
        .merge(web::routes::submission_routes().layer(limiter));

    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .merge(web_router)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `per_second`, `burst` - token bucket parameters for submission routes
pub fn app_router(state: AppState, per_second: u64, burst: u32) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, per_second, burst))
}
