//! menugrid-core: Backend-independent grid reconstruction and cell text binding.
//!
//! This crate turns the flat drawing primitives of a page into a grid of cell
//! rectangles and assigns positioned text to those cells. It performs no I/O;
//! decoding a document into [`PageContent`] is the job of `menugrid-parse`.
//!
//! # Pipeline
//!
//! ```text
//! fills → extract_segments → ProximityGraph → largest_component → assemble_grid → Grid
//! text items → text_runs → find_text_in_cell(Grid cell) → split_items
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod grid;
pub mod normalize;
pub mod page;
pub mod segment;
pub mod text;

pub use config::{GridSize, LineBands, MenuProfile};
pub use error::GridError;
pub use geometry::{CellRect, Point, distance};
pub use graph::ProximityGraph;
pub use grid::{Grid, assemble_grid, expected_segment_count, load_grid};
pub use normalize::{collapse_whitespace, split_items};
pub use page::{Fill, PageContent, TextItem};
pub use segment::{Segment, extract_segments};
pub use text::{TextRun, cell_text, find_text_in_cell, text_runs};
