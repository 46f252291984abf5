//! DTO for a mapping as returned by the API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Mapping;

/// A mapping with its absolute short URL.
#[derive(Debug, Serialize)]
pub struct MappingResponse {
    pub code: String,
    pub target: String,
    pub clicks: i64,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl MappingResponse {
    pub fn new(mapping: Mapping, short_url: String) -> Self {
        Self {
            code: mapping.code,
            target: mapping.target,
            clicks: mapping.clicks,
            short_url,
            created_at: mapping.created_at,
        }
    }
}
