/// A point in page space (top-left origin, page units).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Axis-aligned rectangle bounding one grid cell.
///
/// Coordinates use the page's top-left origin:
/// - `x_start`: left edge
/// - `y_start`: top edge
/// - `x_end`: right edge
/// - `y_end`: bottom edge
///
/// A rectangle produced by the grid assembler always satisfies
/// `x_start < x_end` and `y_start < y_end`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRect {
    pub x_start: f64,
    pub y_start: f64,
    pub x_end: f64,
    pub y_end: f64,
}

impl CellRect {
    pub fn new(x_start: f64, y_start: f64, x_end: f64, y_end: f64) -> Self {
        Self {
            x_start,
            y_start,
            x_end,
            y_end,
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x_end - self.x_start
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.y_end - self.y_start
    }

    /// Whether both extents are strictly positive.
    pub fn is_well_formed(&self) -> bool {
        self.x_start < self.x_end && self.y_start < self.y_end
    }

    /// Whether the point lies inside the rectangle, edges included.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x_start && p.x <= self.x_end && p.y >= self.y_start && p.y <= self.y_end
    }
}
