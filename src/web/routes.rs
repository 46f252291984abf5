//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::{index_handler, submit_form_handler};
use axum::{
    Router,
    routing::{get, post},
};

/// Read-only pages.
///
/// # Endpoints
///
/// - `GET /` - Listing of all mappings with the submission form
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/", get(index_handler))
}

/// Routes that create mappings; rate limited by the caller.
///
/// # Endpoints
///
/// - `POST /shortUrls` - Form submission, redirects back to `/`
pub fn submission_routes() -> Router<AppState> {
    Router::new().route("/shortUrls", post(submit_form_handler))
}
