//! Grid assembly from the segments of the largest connected component.
//!
//! The assembler assumes one specific template layout. Sorted in reading
//! order (by `y`, then `x`), each grid row contributes `cols` top edges
//! followed by `cols + 1` vertical dividers, and the grid closes with the
//! `cols` bottom edges of the last row. A cell `(i, j)` is therefore bounded
//! by four sorted positions computed from `offset = i * (2 * cols + 1)`:
//!
//! | position                       | edge    | coordinate used |
//! |--------------------------------|---------|-----------------|
//! | `offset + j`                   | top     | `y_start`       |
//! | `offset + cols + j`            | left    | `x_start`       |
//! | `offset + cols + j + 1`        | right   | `x_end`         |
//! | `offset + 2 * cols + j + 1`    | bottom  | `y_end`         |
//!
//! Segments are thin lines, so the rectangle is read from these specific
//! corners rather than from a min/max bounding box.

use std::cmp::Ordering;

use crate::config::{GridSize, MenuProfile};
use crate::error::GridError;
use crate::geometry::CellRect;
use crate::graph::ProximityGraph;
use crate::page::Fill;
use crate::segment::{Segment, extract_segments};

/// A `rows × cols` matrix of cell rectangles, stored row-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellRect>,
}

impl Grid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The rectangle of cell `(row, col)`, or `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellRect> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Like [`cell`](Grid::cell), reporting out-of-range lookups as errors.
    pub fn checked_cell(&self, row: usize, col: usize) -> Result<&CellRect, GridError> {
        self.cell(row, col).ok_or(GridError::CellOutOfRange {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Cells of one row, left to right.
    pub fn row(&self, row: usize) -> Option<&[CellRect]> {
        if row < self.rows {
            Some(&self.cells[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    /// All rows, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellRect]> {
        self.cells.chunks(self.cols.max(1))
    }
}

/// Number of segments a `rows × cols` grid is drawn with.
pub fn expected_segment_count(size: GridSize) -> usize {
    size.rows * (2 * size.cols + 1) + size.cols
}

/// Assemble a grid from exactly the segments of the template layout.
///
/// # Errors
///
/// Returns [`GridError::CardinalityMismatch`] when the segment count does not
/// match [`expected_segment_count`] (or the grid has no cells), and
/// [`GridError::DegenerateCell`] when the selected corners do not bound a
/// positive-area rectangle.
pub fn assemble_grid(segments: &[Segment], size: GridSize) -> Result<Grid, GridError> {
    let GridSize { rows, cols } = size;
    let expected = expected_segment_count(size);
    if rows == 0 || cols == 0 || segments.len() != expected {
        return Err(GridError::CardinalityMismatch {
            rows,
            cols,
            expected,
            found: segments.len(),
        });
    }

    let mut sorted = segments.to_vec();
    sorted.sort_by(|a, b| coordinate_order(a.y, b.y).then_with(|| coordinate_order(a.x, b.x)));

    let mut cells = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        let offset = i * (2 * cols + 1);
        for j in 0..cols {
            let top = &sorted[offset + j];
            let left = &sorted[offset + cols + j];
            let right = &sorted[offset + cols + j + 1];
            let bottom = &sorted[offset + 2 * cols + j + 1];

            let rect = CellRect::new(left.x, top.y, right.x, bottom.y);
            if !rect.is_well_formed() {
                return Err(GridError::DegenerateCell { row: i, col: j });
            }
            cells.push(rect);
        }
    }

    Ok(Grid { rows, cols, cells })
}

/// Total order on coordinates in which `-0.0` and `0.0` tie.
fn coordinate_order(a: f64, b: f64) -> Ordering {
    // -0.0 + 0.0 is 0.0
    (a + 0.0).total_cmp(&(b + 0.0))
}

/// Run the full reconstruction over a page's fills.
///
/// Filters line-like fills, connects them into a proximity graph, keeps the
/// largest connected component and assembles it into a grid.
pub fn load_grid(fills: &[Fill], profile: &MenuProfile) -> Result<Grid, GridError> {
    let segments = extract_segments(fills, &profile.bands);
    let graph = ProximityGraph::build(&segments, profile.adjacency_tolerance);
    let component = graph.largest_component();
    let grid_segments = graph.segments_of(&component);
    assemble_grid(&grid_segments, profile.grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COL_WIDTH: f64 = 7.0;
    const ROW_HEIGHT: f64 = 9.0;
    const ORIGIN: f64 = 2.0;
    const THICKNESS: f64 = 0.1;

    fn col_x(j: usize) -> f64 {
        ORIGIN + COL_WIDTH * j as f64
    }

    fn row_y(i: usize) -> f64 {
        ORIGIN + ROW_HEIGHT * i as f64
    }

    /// Fills of a well-formed template grid.
    ///
    /// Horizontal lines are centered on the row boundary, so their top edge
    /// sits half a thickness above the vertical dividers they meet.
    fn template_fills(rows: usize, cols: usize) -> Vec<Fill> {
        let mut fills = Vec::new();
        for i in 0..=rows {
            for j in 0..cols {
                fills.push(Fill::new(
                    col_x(j),
                    row_y(i) - THICKNESS / 2.0,
                    COL_WIDTH,
                    THICKNESS,
                ));
            }
            if i < rows {
                for k in 0..=cols {
                    fills.push(Fill::new(col_x(k), row_y(i), THICKNESS, ROW_HEIGHT));
                }
            }
        }
        fills
    }

    fn segments_from(fills: &[Fill]) -> Vec<Segment> {
        fills
            .iter()
            .enumerate()
            .map(|(id, f)| Segment::new(id, f.x, f.y, f.w, f.h))
            .collect()
    }

    #[test]
    fn test_expected_segment_count() {
        assert_eq!(expected_segment_count(GridSize::new(2, 7)), 37);
        assert_eq!(expected_segment_count(GridSize::new(1, 1)), 4);
        assert_eq!(expected_segment_count(GridSize::new(3, 2)), 17);
    }

    #[test]
    fn test_assemble_two_by_seven() {
        let segments = segments_from(&template_fills(2, 7));
        assert_eq!(segments.len(), 37);

        let grid = assemble_grid(&segments, GridSize::new(2, 7)).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 7);

        for i in 0..2 {
            for j in 0..7 {
                let cell = grid.cell(i, j).unwrap();
                assert_eq!(cell.x_start, col_x(j));
                assert_eq!(cell.x_end, col_x(j + 1));
                assert_eq!(cell.y_start, row_y(i) - THICKNESS / 2.0);
                assert_eq!(cell.y_end, row_y(i + 1) - THICKNESS / 2.0);
            }
        }
    }

    #[test]
    fn test_assemble_is_independent_of_input_order() {
        let segments = segments_from(&template_fills(2, 3));
        let mut reversed = segments.clone();
        reversed.reverse();
        let a = assemble_grid(&segments, GridSize::new(2, 3)).unwrap();
        let b = assemble_grid(&reversed, GridSize::new(2, 3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_signed_zero_rows_tie_on_x() {
        let segments = vec![
            Segment::new(0, 1.0, -0.0, THICKNESS, ROW_HEIGHT),
            Segment::new(1, 0.5, 0.0, COL_WIDTH, THICKNESS),
            Segment::new(2, 8.0, 0.0, THICKNESS, ROW_HEIGHT),
            Segment::new(3, 0.5, ROW_HEIGHT, COL_WIDTH, THICKNESS),
        ];
        let grid = assemble_grid(&segments, GridSize::new(1, 1)).unwrap();
        let cell = grid.cell(0, 0).unwrap();
        assert_eq!(cell.x_start, 1.0);
        assert_eq!(cell.x_end, 8.0);
        assert_eq!(cell.y_end, ROW_HEIGHT);
    }

    #[test]
    fn test_cardinality_mismatch() {
        let segments = segments_from(&template_fills(2, 7));

        let err = assemble_grid(&segments[..36], GridSize::new(2, 7)).unwrap_err();
        assert_eq!(
            err,
            GridError::CardinalityMismatch {
                rows: 2,
                cols: 7,
                expected: 37,
                found: 36,
            }
        );

        let mut extra = segments.clone();
        extra.push(Segment::new(99, 40.0, 40.0, 7.0, THICKNESS));
        let err = assemble_grid(&extra, GridSize::new(2, 7)).unwrap_err();
        assert!(matches!(
            err,
            GridError::CardinalityMismatch { found: 38, .. }
        ));
    }

    #[test]
    fn test_empty_component_is_a_cardinality_mismatch() {
        let err = assemble_grid(&[], GridSize::new(2, 7)).unwrap_err();
        assert!(matches!(
            err,
            GridError::CardinalityMismatch { found: 0, .. }
        ));
    }

    #[test]
    fn test_zero_sized_grid_rejected() {
        // 0 rows expects `cols` segments; the count matches but no cell exists.
        let segments = segments_from(&template_fills(1, 3))[..3].to_vec();
        let err = assemble_grid(&segments, GridSize::new(0, 3)).unwrap_err();
        assert!(matches!(err, GridError::CardinalityMismatch { .. }));
    }

    #[test]
    fn test_degenerate_cell_detected() {
        // Every segment at the same point: right edge equals left edge.
        let segments: Vec<Segment> = (0..4).map(|id| Segment::new(id, 1.0, 1.0, 7.0, 0.1)).collect();
        let err = assemble_grid(&segments, GridSize::new(1, 1)).unwrap_err();
        assert_eq!(err, GridError::DegenerateCell { row: 0, col: 0 });
    }

    #[test]
    fn test_cell_lookup_bounds() {
        let grid = assemble_grid(&segments_from(&template_fills(2, 7)), GridSize::new(2, 7)).unwrap();
        assert!(grid.cell(1, 6).is_some());
        assert!(grid.cell(2, 0).is_none());
        assert!(grid.cell(0, 7).is_none());
        assert_eq!(
            grid.checked_cell(0, 7).unwrap_err(),
            GridError::CellOutOfRange {
                row: 0,
                col: 7,
                rows: 2,
                cols: 7,
            }
        );
    }

    #[test]
    fn test_rows_accessors() {
        let grid = assemble_grid(&segments_from(&template_fills(2, 3)), GridSize::new(2, 3)).unwrap();
        assert_eq!(grid.row(0).unwrap().len(), 3);
        assert_eq!(grid.row(1).unwrap()[0], *grid.cell(1, 0).unwrap());
        assert!(grid.row(2).is_none());
        assert_eq!(grid.iter_rows().count(), 2);
    }

    #[test]
    fn test_load_grid_ignores_noise() {
        let mut fills = vec![
            // Page border and a logo: rejected by the size bands.
            Fill::new(0.0, 0.0, 52.0, 36.0),
            Fill::new(45.0, 1.0, 4.0, 3.0),
        ];
        fills.extend(template_fills(2, 7));
        // A separate three-segment chain, far from the grid.
        fills.push(Fill::new(40.0, 40.0, 7.0, THICKNESS));
        fills.push(Fill::new(47.0, 40.0, 7.0, THICKNESS));
        fills.push(Fill::new(54.0, 40.0, 7.0, THICKNESS));
        // Two isolated lines.
        fills.push(Fill::new(40.0, 50.0, THICKNESS, 8.0));
        fills.push(Fill::new(50.0, 50.0, THICKNESS, 8.0));

        let grid = load_grid(&fills, &MenuProfile::martiri()).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 7);
        assert_eq!(grid.cell(0, 2).unwrap().x_start, col_x(2));
    }

    #[test]
    fn test_load_grid_without_lines() {
        let fills = vec![Fill::new(0.0, 0.0, 52.0, 36.0)];
        let err = load_grid(&fills, &MenuProfile::martiri()).unwrap_err();
        assert_eq!(
            err,
            GridError::CardinalityMismatch {
                rows: 2,
                cols: 7,
                expected: 37,
                found: 0,
            }
        );
    }

    #[test]
    fn test_load_grid_wrong_profile() {
        let fills = template_fills(2, 7);
        let profile = MenuProfile::martiri().with_grid(2, 6);
        let err = load_grid(&fills, &profile).unwrap_err();
        assert!(matches!(
            err,
            GridError::CardinalityMismatch {
                expected: 32,
                found: 37,
                ..
            }
        ));
    }
}
