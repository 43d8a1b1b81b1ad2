//! Error types for document decoding.
//!
//! Uses [`thiserror`] for ergonomic error derivation.

use std::sync::Arc;

use thiserror::Error;

/// Error type for turning document bytes into page content.
///
/// A decode failure is terminal for the load attempt that produced it.
/// Errors are cheap to clone so one failed attempt can be reported to every
/// caller that waited on it.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    /// Error parsing PDF structure, syntax or content streams.
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading document data.
    #[error("I/O error: {0}")]
    Io(#[source] Arc<std::io::Error>),

    /// The document is encrypted.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The requested page does not exist.
    #[error("page {index} not found (document has {count} pages)")]
    PageNotFound { index: usize, count: usize },

    /// The background decode task did not complete.
    #[error("decode task failed: {0}")]
    Task(String),
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError::Io(Arc::new(err))
    }
}

impl From<lopdf::Error> for DecodeError {
    fn from(err: lopdf::Error) -> Self {
        DecodeError::Parse(err.to_string())
    }
}
