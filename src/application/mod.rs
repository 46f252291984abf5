//! Application layer services implementing business logic.
//!
//! Services consume the repository and cache traits and expose the operations
//! HTTP handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::mapping_store::MappingStore`] - Code allocation, lookups, click increments
//! - [`services::redirect_resolver::RedirectResolver`] - Code → target resolution with click counting
//! - [`services::submission_service::SubmissionService`] - Validation and creation of new mappings

pub mod services;
