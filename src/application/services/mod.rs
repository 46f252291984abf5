//! Business logic services for the application layer.

pub mod mapping_store;
pub mod redirect_resolver;
pub mod submission_service;

pub use mapping_store::MappingStore;
pub use redirect_resolver::RedirectResolver;
pub use submission_service::SubmissionService;
