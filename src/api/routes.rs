//! API route configuration.

use crate::api::handlers::{mappings_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Read-only API routes.
///
/// # Endpoints
///
/// - `GET  /mappings` - All mappings in insertion order
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/mappings", get(mappings_handler))
}

/// API routes that create mappings; rate limited by the caller.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a mapping for one URL
pub fn submission_routes() -> Router<AppState> {
    Router::new().route("/shorten", post(shorten_handler))
}
