//! Decoded page content: the contract between a document decoder and the
//! grid pipeline.
//!
//! All coordinates are in page units with a top-left origin.

/// A filled rectangle painted on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fill {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Fill {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// A span of decoded text at a position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextItem {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    /// Effective font size in points.
    pub font_size: f64,
    pub text: String,
}

/// Everything the pipeline consumes from one page, in extraction order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageContent {
    /// Page width in page units.
    pub width: f64,
    /// Page height in page units.
    pub height: f64,
    pub fills: Vec<Fill>,
    pub texts: Vec<TextItem>,
}
