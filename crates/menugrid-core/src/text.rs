//! Binding positioned text runs to grid cells.

use crate::geometry::{CellRect, Point};
use crate::page::TextItem;

/// A span of text at a position, aligned with the line layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextRun {
    pub x: f64,
    /// Vertical position including the profile's text offset.
    pub y: f64,
    pub w: f64,
    pub font_size: f64,
    pub text: String,
}

impl TextRun {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Convert decoded text items into runs, nudging each `y` by `y_offset`.
///
/// The text layer sits systematically above the line layer on the supported
/// template; the offset moves runs back into the rows they belong to.
pub fn text_runs(items: &[TextItem], y_offset: f64) -> Vec<TextRun> {
    items
        .iter()
        .map(|item| TextRun {
            x: item.x,
            y: item.y + y_offset,
            w: item.w,
            font_size: item.font_size,
            text: item.text.clone(),
        })
        .collect()
}

/// Runs positioned inside `cell` with a font size above `min_font_size`.
///
/// Bounds are inclusive. Runs keep their extraction order.
pub fn find_text_in_cell<'a>(
    runs: &'a [TextRun],
    cell: &CellRect,
    min_font_size: f64,
) -> Vec<&'a TextRun> {
    runs.iter()
        .filter(|run| cell.contains(run.position()) && run.font_size > min_font_size)
        .collect()
}

/// Concatenated text of the runs inside `cell`, with no separator.
pub fn cell_text(runs: &[TextRun], cell: &CellRect, min_font_size: f64) -> String {
    find_text_in_cell(runs, cell, min_font_size)
        .into_iter()
        .map(|run| run.text.as_str())
        .collect()
}
