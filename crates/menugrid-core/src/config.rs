//! Document template profiles.
//!
//! A [`MenuProfile`] carries everything the pipeline needs to know about one
//! document template: the grid dimensions, the size bands that identify grid
//! lines, and the thresholds used when binding text to cells. Grid dimensions
//! are never inferred from the document itself.

/// Number of rows and columns of the expected grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl GridSize {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

/// Inclusive size bands for line-like fills.
///
/// A fill is a grid line candidate when its width falls in `width` or its
/// height falls in `height`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineBands {
    pub width: (f64, f64),
    pub height: (f64, f64),
}

impl LineBands {
    /// Whether a fill of size `w` × `h` passes either band.
    pub fn accepts(&self, w: f64, h: f64) -> bool {
        let in_width = w >= self.width.0 && w <= self.width.1;
        let in_height = h >= self.height.0 && h <= self.height.1;
        in_width || in_height
    }
}

impl Default for LineBands {
    fn default() -> Self {
        Self {
            width: (6.0, 8.0),
            height: (6.0, 10.0),
        }
    }
}

/// Configuration for one document template.
///
/// Defaults to [`MenuProfile::martiri`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MenuProfile {
    /// Profile name used by [`MenuProfile::named`].
    pub name: String,
    /// Expected grid dimensions.
    pub grid: GridSize,
    /// Size bands selecting grid lines among the page fills.
    pub bands: LineBands,
    /// Corner distance below which two segments are connected.
    pub adjacency_tolerance: f64,
    /// Text runs at or below this font size are ignored.
    pub min_font_size: f64,
    /// Offset added to every text run's `y` to align the text layer with the
    /// line layer.
    pub text_y_offset: f64,
    /// Literal replacements applied before item splitting. All-caps words
    /// glued to the previous item are only split off once recased.
    pub case_fixups: Vec<(String, String)>,
}

impl MenuProfile {
    /// The weekly menu template: two meal rows by seven day columns.
    pub fn martiri() -> Self {
        Self {
            name: "martiri".to_string(),
            grid: GridSize::new(2, 7),
            bands: LineBands::default(),
            adjacency_tolerance: 0.4,
            min_font_size: 5.0,
            text_y_offset: 0.2,
            case_fixups: vec![
                ("PIZZA".to_string(), "Pizza".to_string()),
                ("CALZONE".to_string(), "Calzone".to_string()),
            ],
        }
    }

    /// Resolve a shipped profile by name.
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "martiri" => Some(Self::martiri()),
            _ => None,
        }
    }

    /// Replace the grid dimensions.
    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.grid = GridSize::new(rows, cols);
        self
    }
}

impl Default for MenuProfile {
    fn default() -> Self {
        Self::martiri()
    }
}
