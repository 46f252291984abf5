//! Handler for the shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::mapping::MappingResponse;
use crate::api::dto::shorten::ShortenRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a mapping for one URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/a" }
/// ```
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "code": "abc123",
///   "target": "https://example.com/a",
///   "clicks": 0,
///   "short_url": "http://localhost:3000/abc123",
///   "created_at": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON, lacks `url`, or the URL is
/// empty or malformed.
/// Returns 500 if the store fails or no free code could be found.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MappingResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let mapping = state.submission_service.submit(&payload.url).await?;
    let short_url = state.submission_service.short_url(&mapping.code);

    Ok((
        StatusCode::CREATED,
        Json(MappingResponse::new(mapping, short_url)),
    ))
}
