//! menugrid: recover a weekly menu table from a PDF page that has no table
//! markup, only filled rectangles and positioned text runs.
//!
//! This is the public API facade. It re-exports the core types and the
//! decoder interface, and provides [`MenuParser`], which loads a document
//! once and answers per-day, per-meal queries.
//!
//! # Architecture
//!
//! - **menugrid-core**: segment filter, proximity graph, grid assembly, text
//!   binding and normalization (pure, synchronous)
//! - **menugrid-parse**: PDF bytes to fills and text items
//! - **menugrid** (this crate): load-once orchestration
//!
//! # Example
//!
//! ```ignore
//! use menugrid::{MenuParser, MenuProfile};
//!
//! let parser = MenuParser::new(std::path::PathBuf::from("menu.pdf"), MenuProfile::martiri());
//! for dish in parser.get_menu(2, "lunch").await? {
//!     println!("{dish}");
//! }
//! ```

mod error;
mod meal;
mod parser;

pub use error::MenuError;
pub use meal::MealPeriod;
pub use parser::MenuParser;

pub use menugrid_core;
pub use menugrid_parse;

pub use menugrid_core::{CellRect, Grid, GridError, GridSize, LineBands, MenuProfile, PageContent};
pub use menugrid_parse::{DecodeError, DocumentDecoder, DocumentSource, LopdfDecoder};
