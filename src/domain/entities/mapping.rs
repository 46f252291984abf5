//! Mapping entity representing a shortened URL.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A short code bound to its target URL, with a click counter.
///
/// `code` and `target` never change after creation. `clicks` only grows, and
/// only through [`crate::domain::repositories::MappingRepository::increment_clicks`].
/// `id` is assigned by the store in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mapping {
    pub id: i64,
    pub code: String,
    pub target: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(
        id: i64,
        code: String,
        target: String,
        clicks: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            target,
            clicks,
            created_at,
        }
    }
}

/// Input data for creating a new mapping. The click counter always starts at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub code: String,
    pub target: String,
}
