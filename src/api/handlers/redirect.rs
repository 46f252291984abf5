//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// See [`crate::application::services::RedirectResolver`] for the cache and
/// click counting flow.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 if the store cannot be read.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target = state.redirect_resolver.resolve(&code).await?;

    Ok(Redirect::temporary(&target))
}
