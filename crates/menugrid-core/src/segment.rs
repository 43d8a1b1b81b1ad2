//! Grid line candidates selected from page fills.

use crate::config::LineBands;
use crate::geometry::{Point, distance};
use crate::page::Fill;

/// A line-like fill that may be part of the grid.
///
/// `id` is the fill's index in the page's unfiltered fill list. Ids are not
/// renumbered after filtering, so they may have gaps.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Segment {
    pub fn new(id: usize, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { id, x, y, w, h }
    }

    /// The `(x, y)` corner.
    pub fn start(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The corner diagonally opposite to [`start`](Segment::start).
    pub fn opposite(&self) -> Point {
        Point::new(self.x + self.w, self.y + self.h)
    }

    /// Whether the two segments touch within `tolerance`.
    ///
    /// Compares start/start, start/opposite, opposite/opposite and
    /// opposite/start. The comparison is strict, and symmetric in its
    /// arguments.
    pub fn is_adjacent(&self, other: &Segment, tolerance: f64) -> bool {
        let (a0, a1) = (self.start(), self.opposite());
        let (b0, b1) = (other.start(), other.opposite());
        distance(a0, b0) < tolerance
            || distance(a0, b1) < tolerance
            || distance(a1, b1) < tolerance
            || distance(a1, b0) < tolerance
    }
}

/// Select the fills that look like grid lines.
///
/// Decorative fills, borders and logos fail both size bands and are dropped.
pub fn extract_segments(fills: &[Fill], bands: &LineBands) -> Vec<Segment> {
    fills
        .iter()
        .enumerate()
        .filter(|(_, fill)| bands.accepts(fill.w, fill.h))
        .map(|(id, fill)| Segment::new(id, fill.x, fill.y, fill.w, fill.h))
        .collect()
}
