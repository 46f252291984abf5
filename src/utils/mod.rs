//! Helper functions used across the application.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`target_url`] - Target URL well-formedness checks

pub mod code_generator;
pub mod target_url;
