//! Domain layer containing business entities and storage contracts.
//!
//! This module has no dependencies on infrastructure or presentation layers.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives `GET /{code}`
//! 2. [`crate::application::services::RedirectResolver`] looks the code up
//!    (cache first, then [`repositories::MappingRepository`])
//! 3. The click counter is incremented atomically by the repository
//! 4. The handler answers with a temporary redirect to the target

pub mod entities;
pub mod repositories;
