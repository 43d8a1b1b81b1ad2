//! lopdf-based decoder implementation.
//!
//! Opens the document with [`lopdf::Document::load_mem`], walks one page's
//! content stream through [`crate::content::interpret`] and converts the
//! resulting events into [`PageContent`] in page units with a top-left
//! origin.

use std::collections::{HashMap, HashSet};

use encoding_rs::{Encoding, MACINTOSH, WINDOWS_1252};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use menugrid_core::{Fill, PageContent, TextItem};
use tracing::{debug, warn};

use crate::cmap::ToUnicodeMap;
use crate::content::{ContentHandler, FillEvent, TextEvent, interpret, number};
use crate::decoder::DocumentDecoder;
use crate::error::DecodeError;
use crate::font::PageFont;

/// PDF points per page unit.
pub const POINTS_PER_UNIT: f64 = 16.0;

/// US Letter, used when no `/MediaBox` is found.
const DEFAULT_MEDIA_BOX: [f64; 4] = [0.0, 0.0, 612.0, 792.0];

/// The default [`DocumentDecoder`], backed by `lopdf`.
///
/// # Example
///
/// ```ignore
/// use menugrid_parse::{DocumentDecoder, LopdfDecoder};
///
/// let page = LopdfDecoder::default().decode(&std::fs::read("menu.pdf")?)?;
/// println!("{} fills, {} text items", page.fills.len(), page.texts.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LopdfDecoder {
    /// Zero-based page to decode.
    pub page_index: usize,
    /// Scale from PDF points to output units.
    pub points_per_unit: f64,
}

impl Default for LopdfDecoder {
    fn default() -> Self {
        Self {
            page_index: 0,
            points_per_unit: POINTS_PER_UNIT,
        }
    }
}

impl LopdfDecoder {
    pub fn with_page(page_index: usize) -> Self {
        Self {
            page_index,
            ..Self::default()
        }
    }
}

impl DocumentDecoder for LopdfDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<PageContent, DecodeError> {
        let doc = Document::load_mem(bytes)?;
        if doc.is_encrypted() {
            return Err(DecodeError::Encrypted);
        }

        let pages = doc.get_pages();
        let page_id = *pages
            .values()
            .nth(self.page_index)
            .ok_or(DecodeError::PageNotFound {
                index: self.page_index,
                count: pages.len(),
            })?;

        let media_box = page_media_box(&doc, page_id)?;
        let page_dict = doc.get_object(page_id)?.as_dict()?;
        let content = Content::decode(&page_content_bytes(&doc, page_dict)?)?;
        let fonts = match page_resources(&doc, page_id)? {
            Some(resources) => load_fonts(&doc, resources),
            None => HashMap::new(),
        };

        let mut collector = PageCollector::new(media_box, self.points_per_unit);
        interpret(&content.operations, &fonts, &mut collector);

        debug!(
            page = self.page_index,
            operations = content.operations.len(),
            fonts = fonts.len(),
            fills = collector.page.fills.len(),
            texts = collector.page.texts.len(),
            "decoded page"
        );
        Ok(collector.page)
    }
}

/// Maps user-space events onto the page's top-left unit grid.
struct PageCollector {
    left: f64,
    top: f64,
    unit: f64,
    page: PageContent,
}

impl PageCollector {
    fn new(media_box: [f64; 4], unit: f64) -> Self {
        let [x0, y0, x1, y1] = media_box;
        Self {
            left: x0,
            top: y1,
            unit,
            page: PageContent {
                width: (x1 - x0) / unit,
                height: (y1 - y0) / unit,
                ..PageContent::default()
            },
        }
    }
}

impl ContentHandler for PageCollector {
    fn on_fill(&mut self, fill: FillEvent) {
        self.page.fills.push(Fill::new(
            (fill.x0 - self.left) / self.unit,
            (self.top - fill.y1) / self.unit,
            (fill.x1 - fill.x0) / self.unit,
            (fill.y1 - fill.y0) / self.unit,
        ));
    }

    fn on_text(&mut self, text: TextEvent) {
        self.page.texts.push(TextItem {
            x: (text.x - self.left) / self.unit,
            y: (self.top - (text.y + text.font_size)) / self.unit,
            w: text.width / self.unit,
            font_size: text.font_size,
            text: text.text,
        });
    }
}

/// Follow an indirect reference, leaving direct objects untouched.
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Look up a key on the page, walking up `/Parent` links when absent.
fn resolve_inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>, DecodeError> {
    let mut current = page_id;
    let mut visited = HashSet::new();
    loop {
        if !visited.insert(current) {
            return Err(DecodeError::Parse(format!(
                "/Parent chain of page {} {} R loops back to {} {} R",
                page_id.0, page_id.1, current.0, current.1
            )));
        }
        let dict = doc.get_object(current)?.as_dict()?;
        if let Ok(value) = dict.get(key) {
            return Ok(Some(resolve(doc, value)));
        }
        match dict.get(b"Parent") {
            Ok(parent) => current = parent.as_reference()?,
            Err(_) => return Ok(None),
        }
    }
}

/// `[x0, y0, x1, y1]` normalized so that `x0 <= x1` and `y0 <= y1`.
fn page_media_box(doc: &Document, page_id: ObjectId) -> Result<[f64; 4], DecodeError> {
    let Some(obj) = resolve_inherited(doc, page_id, b"MediaBox")? else {
        return Ok(DEFAULT_MEDIA_BOX);
    };
    let values: Vec<f64> = obj
        .as_array()?
        .iter()
        .map(|v| number(resolve(doc, v)))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| DecodeError::Parse("/MediaBox has a non-numeric entry".to_string()))?;
    let [x0, y0, x1, y1] = values[..] else {
        return Err(DecodeError::Parse(format!(
            "expected 4-element /MediaBox, got {}",
            values.len()
        )));
    };
    Ok([x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)])
}

fn page_resources(doc: &Document, page_id: ObjectId) -> Result<Option<&Dictionary>, DecodeError> {
    match resolve_inherited(doc, page_id, b"Resources")? {
        Some(obj) => Ok(Some(obj.as_dict()?)),
        None => Ok(None),
    }
}

/// Concatenated, decompressed `/Contents` of a page.
fn page_content_bytes(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>, DecodeError> {
    let Ok(contents) = page_dict.get(b"Contents") else {
        return Ok(Vec::new());
    };
    match resolve(doc, contents) {
        Object::Stream(stream) => stream_bytes(stream),
        Object::Array(parts) => {
            let mut bytes = Vec::new();
            for part in parts {
                let stream = resolve(doc, part).as_stream()?;
                if !bytes.is_empty() {
                    bytes.push(b'\n');
                }
                bytes.extend_from_slice(&stream_bytes(stream)?);
            }
            Ok(bytes)
        }
        other => Err(DecodeError::Parse(format!(
            "/Contents is not a stream or array: {other:?}"
        ))),
    }
}

fn stream_bytes(stream: &lopdf::Stream) -> Result<Vec<u8>, DecodeError> {
    if stream.dict.get(b"Filter").is_ok() {
        Ok(stream.decompressed_content()?)
    } else {
        Ok(stream.content.clone())
    }
}

/// Fonts from a resource dictionary, keyed by resource name.
///
/// A font that cannot be read is skipped; text shown with it falls back to
/// the default single-byte font.
fn load_fonts(doc: &Document, resources: &Dictionary) -> HashMap<Vec<u8>, PageFont> {
    let Ok(font_dict) = resources
        .get(b"Font")
        .and_then(|obj| resolve(doc, obj).as_dict())
    else {
        return HashMap::new();
    };

    let mut fonts = HashMap::new();
    for (name, obj) in font_dict.iter() {
        match resolve(doc, obj).as_dict() {
            Ok(dict) => {
                fonts.insert(name.clone(), load_font(doc, dict));
            }
            Err(e) => warn!(
                font = %String::from_utf8_lossy(name),
                error = %e,
                "skipping unreadable font resource"
            ),
        }
    }
    fonts
}

fn load_font(doc: &Document, dict: &Dictionary) -> PageFont {
    let two_byte = dict
        .get(b"Subtype")
        .and_then(Object::as_name)
        .is_ok_and(|subtype| subtype == b"Type0");
    let first_char = dict
        .get(b"FirstChar")
        .ok()
        .and_then(|v| number(resolve(doc, v)))
        .map_or(0, |v| v.max(0.0) as u32);
    let widths = dict
        .get(b"Widths")
        .and_then(|v| resolve(doc, v).as_array())
        .map(|arr| {
            arr.iter()
                .map(|w| number(resolve(doc, w)).unwrap_or(0.0))
                .collect()
        })
        .unwrap_or_default();
    let to_unicode = dict
        .get(b"ToUnicode")
        .and_then(|v| resolve(doc, v).as_stream())
        .ok()
        .and_then(|stream| match stream_bytes(stream).and_then(|b| ToUnicodeMap::parse(&b)) {
            Ok(map) => Some(map),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable /ToUnicode CMap");
                None
            }
        });

    PageFont {
        to_unicode,
        two_byte,
        first_char,
        widths,
        encoding: font_encoding(doc, dict),
    }
}

/// Single-byte encoding named by `/Encoding` or its `/BaseEncoding`.
fn font_encoding(doc: &Document, dict: &Dictionary) -> &'static Encoding {
    let name = match dict.get(b"Encoding").map(|v| resolve(doc, v)) {
        Ok(Object::Name(name)) => Some(name.as_slice()),
        Ok(Object::Dictionary(enc)) => enc.get(b"BaseEncoding").and_then(Object::as_name).ok(),
        _ => None,
    };
    match name {
        Some(b"MacRomanEncoding") => MACINTOSH,
        _ => WINDOWS_1252,
    }
}
