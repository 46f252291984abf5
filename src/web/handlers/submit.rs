//! Form submission handler.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use super::index::IndexTemplate;
use crate::error::AppError;
use crate::state::AppState;

/// Body of the listing page form.
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(rename = "fullUrl", default)]
    pub full_url: String,
}

/// Creates a mapping from the listing page form.
///
/// # Endpoint
///
/// `POST /shortUrls` (`application/x-www-form-urlencoded`, field `fullUrl`)
///
/// # Responses
///
/// - **303 See Other** to `/` on success
/// - **400 Bad Request** with the listing page and an error message if the
///   URL is empty or malformed
/// - **500** on storage or code generation failure
pub async fn submit_form_handler(
    State(state): State<AppState>,
    Form(form): Form<SubmitForm>,
) -> Result<Response, AppError> {
    match state.submission_service.submit(&form.full_url).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(err @ AppError::Validation { .. }) => {
            err.log();
            let page = IndexTemplate::load(&state, Some(err.to_string()), form.full_url).await?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(err) => Err(err),
    }
}
