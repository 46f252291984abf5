//! Listing page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::domain::entities::Mapping;
use crate::error::AppError;
use crate::state::AppState;

/// One table row on the listing page.
pub struct MappingRow {
    pub code: String,
    pub target: String,
    pub clicks: i64,
    pub short_url: String,
}

/// Template for the listing page.
///
/// Renders `templates/index.html` with the submission form, an optional
/// validation error, and every mapping in insertion order.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub mappings: Vec<MappingRow>,
    pub error: Option<String>,
    pub submitted: String,
}

impl IndexTemplate {
    /// Loads all mappings and builds the page.
    pub async fn load(
        state: &AppState,
        error: Option<String>,
        submitted: String,
    ) -> Result<Self, AppError> {
        let mappings = state
            .mapping_store
            .list_all()
            .await?
            .into_iter()
            .map(|m: Mapping| MappingRow {
                short_url: state.submission_service.short_url(&m.code),
                code: m.code,
                target: m.target,
                clicks: m.clicks,
            })
            .collect();

        Ok(Self {
            mappings,
            error,
            submitted,
        })
    }
}

/// Renders the listing page.
///
/// # Endpoint
///
/// `GET /`
///
/// # Errors
///
/// Returns 500 if the store cannot be read.
pub async fn index_handler(State(state): State<AppState>) -> Result<IndexTemplate, AppError> {
    IndexTemplate::load(&state, None, String::new()).await
}
