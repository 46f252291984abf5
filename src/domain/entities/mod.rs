//! Core domain entities.
//!
//! - [`Mapping`] - A persisted short code → target URL association
//! - [`NewMapping`] - Input for creating a mapping

pub mod mapping;

pub use mapping::{Mapping, NewMapping};
