//! Browser-facing pages.
//!
//! Server-side rendered with Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering and form handlers
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod routes;
