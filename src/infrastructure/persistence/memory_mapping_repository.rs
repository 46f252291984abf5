//! In-process mapping repository backed by a sharded concurrent map.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

struct StoredMapping {
    id: i64,
    code: String,
    target: String,
    clicks: AtomicI64,
    created_at: DateTime<Utc>,
}

impl StoredMapping {
    fn snapshot(&self) -> Mapping {
        Mapping::new(
            self.id,
            self.code.clone(),
            self.target.clone(),
            self.clicks.load(Ordering::Acquire),
            self.created_at,
        )
    }
}

/// Mapping repository that keeps everything in memory.
///
/// Entries live in a [`DashMap`], so lookups and increments only touch the
/// shard holding the code. Each click counter is an [`AtomicI64`]; concurrent
/// increments on one code are all applied. Data is lost when the process exits.
pub struct MemoryMappingRepository {
    entries: DashMap<String, StoredMapping>,
    next_id: AtomicI64,
}

impl MemoryMappingRepository {
    pub fn new() -> Self {
        debug!("Using in-memory mapping store (not persistent)");
        Self {
            entries: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryMappingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MappingRepository for MemoryMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, AppError> {
        match self.entries.entry(new_mapping.code) {
            Entry::Occupied(occupied) => Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "mappings_code_key", "code": occupied.key() }),
            )),
            Entry::Vacant(vacant) => {
                let stored = StoredMapping {
                    id: self.next_id.fetch_add(1, Ordering::AcqRel),
                    code: vacant.key().clone(),
                    target: new_mapping.target,
                    clicks: AtomicI64::new(0),
                    created_at: Utc::now(),
                };
                let mapping = stored.snapshot();
                vacant.insert(stored);
                Ok(mapping)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Mapping>, AppError> {
        Ok(self.entries.get(code).map(|entry| entry.snapshot()))
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError> {
        match self.entries.get(code) {
            Some(entry) => {
                entry.clicks.fetch_add(1, Ordering::AcqRel);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_all(&self) -> Result<Vec<Mapping>, AppError> {
        let mut mappings: Vec<Mapping> = self
            .entries
            .iter()
            .map(|entry| entry.value().snapshot())
            .collect();
        mappings.sort_by_key(|m| m.id);
        Ok(mappings)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
