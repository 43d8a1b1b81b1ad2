//! Error type for grid reconstruction and cell lookup.
//!
//! Provides [`GridError`] for conditions where the page geometry does not
//! match the configured template or a cell lookup falls outside the grid.

use std::fmt;

/// Fatal errors raised while assembling or querying a [`Grid`](crate::Grid).
///
/// None of these are recoverable within a load: no partial grid is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The largest connected component does not hold exactly
    /// `rows * (2 * cols + 1) + cols` segments.
    ///
    /// An empty page (no segment survives filtering) reports `found == 0`.
    CardinalityMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        found: usize,
    },
    /// The four segments selected for a cell do not bound a rectangle with
    /// positive width and height.
    DegenerateCell { row: usize, col: usize },
    /// A cell lookup outside the assembled grid.
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::CardinalityMismatch {
                rows,
                cols,
                expected,
                found,
            } => write!(
                f,
                "not enough lines to extract a {rows} x {cols} grid: expected {expected} segments, found {found}"
            ),
            GridError::DegenerateCell { row, col } => {
                write!(f, "cell ({row}, {col}) has an empty or inverted rectangle")
            }
            GridError::CellOutOfRange {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "cell ({row}, {col}) is outside the {rows} x {cols} grid"
            ),
        }
    }
}

impl std::error::Error for GridError {}
