//! AI-assisted study-notes generation: topics in, paginated PDF out.
//!
//! The crate is organized as a small pipeline:
//!
//! - [`prompt`] turns a topic plus style selections into a completion prompt,
//! - [`client`] sends the prompt to an OpenAI-compatible chat endpoint,
//! - [`sanitize`] strips inline emphasis the model emits anyway,
//! - [`layout`] paginates the question/answer pairs into positioned text runs,
//! - [`render`] serializes the laid-out pages into PDF bytes,
//! - [`pipeline`] drives the whole sequence and writes the file.

pub mod client;
pub mod error;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod sanitize;

pub use error::{NotegenError, Result};
