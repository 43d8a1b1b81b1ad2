//! PDF decoding for menugrid.
//!
//! Turns document bytes into the [`PageContent`](menugrid_core::PageContent)
//! the grid pipeline consumes: filled rectangles and positioned text runs of
//! a single page, in page units with a top-left origin.
//!
//! The [`DocumentDecoder`] trait is the seam between the async parser and the
//! synchronous decoding work; [`LopdfDecoder`] is the implementation used by
//! default.

pub mod cmap;
pub mod content;
pub mod decoder;
pub mod error;
pub mod font;
pub mod lopdf_decoder;

pub use cmap::ToUnicodeMap;
pub use content::{ContentHandler, FillEvent, TextEvent, interpret};
pub use decoder::{DocumentDecoder, DocumentSource};
pub use error::DecodeError;
pub use font::PageFont;
pub use lopdf_decoder::{LopdfDecoder, POINTS_PER_UNIT};
