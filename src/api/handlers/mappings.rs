//! Handler for the mapping listing endpoint.

use axum::{Json, extract::State};

use crate::api::dto::mapping::MappingResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every mapping in insertion order.
///
/// # Endpoint
///
/// `GET /api/mappings`
///
/// # Errors
///
/// Returns 500 if the store cannot be read.
pub async fn mappings_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<MappingResponse>>, AppError> {
    let mappings = state
        .mapping_store
        .list_all()
        .await?
        .into_iter()
        .map(|mapping| {
            let short_url = state.submission_service.short_url(&mapping.code);
            MappingResponse::new(mapping, short_url)
        })
        .collect();

    Ok(Json(mappings))
}
