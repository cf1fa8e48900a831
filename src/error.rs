//! Error types for the notes generation pipeline.

use thiserror::Error;

/// Errors that can occur while generating a notes document.
#[derive(Error, Debug)]
pub enum NotegenError {
    /// The topic list was empty after trimming blank lines.
    #[error("no topics provided; enter at least one topic")]
    EmptyTopics,

    /// The completion service returned a non-success status.
    ///
    /// The message carries the most specific description available: the
    /// service-provided error text when the response body contains one,
    /// otherwise `API error: {status}`.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The HTTP request itself failed (connection, timeout, TLS, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The completion service answered with a payload we could not use.
    #[error("malformed completion response: {0}")]
    ResponseParse(String),

    /// PDF serialization failed.
    #[error("PDF rendering failed: {0}")]
    Render(String),

    /// IO error while writing the output file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for notegen operations.
pub type Result<T> = std::result::Result<T, NotegenError>;
