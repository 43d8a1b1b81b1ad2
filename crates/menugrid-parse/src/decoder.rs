//! Document decoder interface.
//!
//! Defines the [`DocumentDecoder`] trait that turns raw document bytes into
//! the [`PageContent`] the grid pipeline consumes, and [`DocumentSource`],
//! the two ways a document can be handed to a parser.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use menugrid_core::PageContent;

use crate::error::DecodeError;

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// A file on disk, read when the parser first loads.
    Path(PathBuf),
    /// An in-memory document.
    Bytes(Arc<[u8]>),
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Path(path) => write!(f, "{}", path.display()),
            DocumentSource::Bytes(bytes) => write!(f, "<{} bytes in memory>", bytes.len()),
        }
    }
}

impl From<PathBuf> for DocumentSource {
    fn from(path: PathBuf) -> Self {
        DocumentSource::Path(path)
    }
}

impl From<&Path> for DocumentSource {
    fn from(path: &Path) -> Self {
        DocumentSource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for DocumentSource {
    fn from(bytes: Vec<u8>) -> Self {
        DocumentSource::Bytes(bytes.into())
    }
}

impl From<&[u8]> for DocumentSource {
    fn from(bytes: &[u8]) -> Self {
        DocumentSource::Bytes(bytes.into())
    }
}

impl From<Arc<[u8]>> for DocumentSource {
    fn from(bytes: Arc<[u8]>) -> Self {
        DocumentSource::Bytes(bytes)
    }
}

/// Trait abstracting document decoding.
///
/// A decoder receives the complete document bytes and returns the fills and
/// text items of one page in page units with a top-left origin. Decoding is
/// synchronous and CPU-bound; callers run it off the async executor.
///
/// # Errors
///
/// Implementations return [`DecodeError`] when the bytes are not a supported
/// document or the expected page is absent.
pub trait DocumentDecoder: Send + Sync + 'static {
    fn decode(&self, bytes: &[u8]) -> Result<PageContent, DecodeError>;
}
