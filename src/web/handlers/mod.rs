//! HTML handlers for the browser-facing pages.

mod index;
mod submit;

pub use index::{IndexTemplate, index_handler};
pub use submit::submit_form_handler;
