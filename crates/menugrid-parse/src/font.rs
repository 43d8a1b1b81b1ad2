//! Font information needed to turn shown strings into text and advances.
//!
//! Only what text extraction needs is kept: a code-to-Unicode path and glyph
//! widths. Glyph outlines and embedded font programs are never read.

use encoding_rs::{Encoding, WINDOWS_1252};

use crate::cmap::ToUnicodeMap;

/// Advance assumed for glyphs without a width entry, in glyph space units
/// (1/1000 em).
pub const DEFAULT_GLYPH_WIDTH: f64 = 500.0;

/// A font from a page's `/Font` resources.
#[derive(Debug, Clone)]
pub struct PageFont {
    /// `/ToUnicode` table, preferred over the byte encoding when present.
    pub to_unicode: Option<ToUnicodeMap>,
    /// Composite (`/Type0`) fonts use two-byte codes.
    pub two_byte: bool,
    /// `/FirstChar` of the `/Widths` array.
    pub first_char: u32,
    /// `/Widths` in glyph space units.
    pub widths: Vec<f64>,
    /// Single-byte fallback encoding.
    pub encoding: &'static Encoding,
}

/// Result of showing one string with a font.
#[derive(Debug, Clone, PartialEq)]
pub struct Shown {
    pub text: String,
    /// Sum of glyph advances in glyph space units.
    pub advance: f64,
    pub glyphs: usize,
    /// Single-byte code 32 occurrences, which receive word spacing.
    pub spaces: usize,
}

impl Default for PageFont {
    fn default() -> Self {
        Self {
            to_unicode: None,
            two_byte: false,
            first_char: 0,
            widths: Vec::new(),
            encoding: WINDOWS_1252,
        }
    }
}

impl PageFont {
    pub fn show(&self, bytes: &[u8]) -> Shown {
        let codes: Vec<u32> = if self.two_byte {
            bytes
                .chunks(2)
                .map(|pair| pair.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b)))
                .collect()
        } else {
            bytes.iter().map(|b| u32::from(*b)).collect()
        };

        let mut shown = Shown {
            text: String::new(),
            advance: 0.0,
            glyphs: codes.len(),
            spaces: 0,
        };
        for code in codes {
            self.push_text(code, &mut shown.text);
            shown.advance += self.width(code);
            if !self.two_byte && code == 32 {
                shown.spaces += 1;
            }
        }
        shown
    }

    fn push_text(&self, code: u32, out: &mut String) {
        if let Some(mapped) = self.to_unicode.as_ref().and_then(|map| map.lookup(code)) {
            out.push_str(mapped);
        } else if self.two_byte {
            out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
        } else {
            let byte = [code as u8];
            let (decoded, _) = self.encoding.decode_without_bom_handling(&byte);
            out.push_str(&decoded);
        }
    }

    fn width(&self, code: u32) -> f64 {
        code.checked_sub(self.first_char)
            .and_then(|i| self.widths.get(i as usize))
            .copied()
            .unwrap_or(DEFAULT_GLYPH_WIDTH)
    }
}
