//! Content stream interpretation.
//!
//! Walks the decoded operations of a page, tracking the graphics and text
//! state, and reports two kinds of events to a [`ContentHandler`]: filled
//! rectangles and shown text runs. Everything is reported in default user
//! space (points, bottom-left origin). Other painting operators, images and
//! form XObjects produce no events.

use std::collections::HashMap;

use lopdf::Object;
use lopdf::content::Operation;
use tracing::trace;

use crate::font::PageFont;

/// A 2D affine matrix `[a b c d e f]`.
pub type Matrix = [f64; 6];

pub const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// `m × n` in row-vector convention: apply `m`, then `n`.
pub fn multiply(m: &Matrix, n: &Matrix) -> Matrix {
    [
        m[0] * n[0] + m[1] * n[2],
        m[0] * n[1] + m[1] * n[3],
        m[2] * n[0] + m[3] * n[2],
        m[2] * n[1] + m[3] * n[3],
        m[4] * n[0] + m[5] * n[2] + n[4],
        m[4] * n[1] + m[5] * n[3] + n[5],
    ]
}

pub fn transform(m: &Matrix, x: f64, y: f64) -> (f64, f64) {
    (m[0] * x + m[2] * y + m[4], m[1] * x + m[3] * y + m[5])
}

fn translate(tx: f64, ty: f64) -> Matrix {
    [1.0, 0.0, 0.0, 1.0, tx, ty]
}

/// A filled rectangle, as its bounding box in user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillEvent {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// One shown string (`Tj`, `'`, `"`) or array (`TJ`).
#[derive(Debug, Clone, PartialEq)]
pub struct TextEvent {
    /// Baseline origin of the run in user space.
    pub x: f64,
    pub y: f64,
    /// Font size after the text and current transformation matrices.
    pub font_size: f64,
    /// Horizontal extent in user space.
    pub width: f64,
    pub text: String,
}

/// Receiver for interpretation events. Both methods default to no-ops.
pub trait ContentHandler {
    fn on_fill(&mut self, _fill: FillEvent) {}
    fn on_text(&mut self, _text: TextEvent) {}
}

/// State saved by `q` and restored by `Q`.
#[derive(Debug, Clone)]
struct GraphicsState {
    ctm: Matrix,
    font: Option<Vec<u8>>,
    font_size: f64,
    char_spacing: f64,
    word_spacing: f64,
    h_scaling: f64,
    leading: f64,
    rise: f64,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: IDENTITY,
            font: None,
            font_size: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            h_scaling: 1.0,
            leading: 0.0,
            rise: 0.0,
        }
    }
}

struct Interpreter<'a, H> {
    fonts: &'a HashMap<Vec<u8>, PageFont>,
    fallback_font: PageFont,
    handler: &'a mut H,
    gs: GraphicsState,
    stack: Vec<GraphicsState>,
    tm: Matrix,
    tlm: Matrix,
    rects: Vec<FillEvent>,
}

/// Interpret `operations` with the page `fonts`, keyed by resource name.
pub fn interpret<H: ContentHandler>(
    operations: &[Operation],
    fonts: &HashMap<Vec<u8>, PageFont>,
    handler: &mut H,
) {
    let mut interp = Interpreter {
        fonts,
        fallback_font: PageFont::default(),
        handler,
        gs: GraphicsState::default(),
        stack: Vec::new(),
        tm: IDENTITY,
        tlm: IDENTITY,
        rects: Vec::new(),
    };
    for op in operations {
        interp.apply(op);
    }
}

impl<H: ContentHandler> Interpreter<'_, H> {
    fn apply(&mut self, op: &Operation) {
        let operands = op.operands.as_slice();
        match op.operator.as_str() {
            "q" => self.stack.push(self.gs.clone()),
            "Q" => {
                if let Some(saved) = self.stack.pop() {
                    self.gs = saved;
                }
            }
            "cm" => {
                if let Some(m) = get_matrix(operands) {
                    self.gs.ctm = multiply(&m, &self.gs.ctm);
                }
            }

            // Paths: only rectangles can become fills.
            "re" => {
                if let [Some(x), Some(y), Some(w), Some(h)] =
                    [0, 1, 2, 3].map(|i| get_f64(operands, i))
                {
                    self.push_rect(x, y, w, h);
                }
            }
            "f" | "F" | "f*" | "B" | "B*" | "b" | "b*" => {
                for fill in std::mem::take(&mut self.rects) {
                    self.handler.on_fill(fill);
                }
            }
            "S" | "s" | "n" => self.rects.clear(),

            "BT" => {
                self.tm = IDENTITY;
                self.tlm = IDENTITY;
            }
            "ET" => {}
            "Tf" => {
                if let Some(name) = operands.first().and_then(|o| o.as_name().ok()) {
                    self.gs.font = Some(name.to_vec());
                }
                self.gs.font_size = get_f64(operands, 1).unwrap_or(self.gs.font_size);
            }
            "Tc" => self.gs.char_spacing = get_f64(operands, 0).unwrap_or(0.0),
            "Tw" => self.gs.word_spacing = get_f64(operands, 0).unwrap_or(0.0),
            "Tz" => self.gs.h_scaling = get_f64(operands, 0).unwrap_or(100.0) / 100.0,
            "TL" => self.gs.leading = get_f64(operands, 0).unwrap_or(0.0),
            "Ts" => self.gs.rise = get_f64(operands, 0).unwrap_or(0.0),
            "Td" => {
                let tx = get_f64(operands, 0).unwrap_or(0.0);
                let ty = get_f64(operands, 1).unwrap_or(0.0);
                self.move_line(tx, ty);
            }
            "TD" => {
                let tx = get_f64(operands, 0).unwrap_or(0.0);
                let ty = get_f64(operands, 1).unwrap_or(0.0);
                self.gs.leading = -ty;
                self.move_line(tx, ty);
            }
            "Tm" => {
                if let Some(m) = get_matrix(operands) {
                    self.tm = m;
                    self.tlm = m;
                }
            }
            "T*" => self.next_line(),

            "Tj" => {
                if let Some(string) = operands.first() {
                    self.show(std::slice::from_ref(string));
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    self.show(items);
                }
            }
            "'" => {
                self.next_line();
                if let Some(string) = operands.first() {
                    self.show(std::slice::from_ref(string));
                }
            }
            "\"" => {
                self.gs.word_spacing = get_f64(operands, 0).unwrap_or(self.gs.word_spacing);
                self.gs.char_spacing = get_f64(operands, 1).unwrap_or(self.gs.char_spacing);
                self.next_line();
                if let Some(string) = operands.get(2) {
                    self.show(std::slice::from_ref(string));
                }
            }

            other => trace!(operator = other, "ignored content operator"),
        }
    }

    fn push_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let corners = [(x, y), (x + w, y), (x, y + h), (x + w, y + h)]
            .map(|(px, py)| transform(&self.gs.ctm, px, py));
        let xs = corners.map(|(px, _)| px);
        let ys = corners.map(|(_, py)| py);
        self.rects.push(FillEvent {
            x0: xs.iter().copied().fold(f64::INFINITY, f64::min),
            y0: ys.iter().copied().fold(f64::INFINITY, f64::min),
            x1: xs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            y1: ys.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        });
    }

    fn move_line(&mut self, tx: f64, ty: f64) {
        self.tlm = multiply(&translate(tx, ty), &self.tlm);
        self.tm = self.tlm;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.gs.leading);
    }

    /// Show strings and kerning adjustments as a single run.
    fn show(&mut self, items: &[Object]) {
        let font = match self.gs.font.as_ref() {
            Some(name) => self.fonts.get(name).unwrap_or(&self.fallback_font),
            None => &self.fallback_font,
        };
        let gs = &self.gs;
        let start_tm = self.tm;

        let mut text = String::new();
        let mut advance = 0.0;
        for item in items {
            match item {
                Object::String(bytes, _) => {
                    let shown = font.show(bytes);
                    advance += (shown.advance / 1000.0 * gs.font_size
                        + gs.char_spacing * shown.glyphs as f64
                        + gs.word_spacing * shown.spaces as f64)
                        * gs.h_scaling;
                    text.push_str(&shown.text);
                }
                other => {
                    if let Some(adjust) = number(other) {
                        advance -= adjust / 1000.0 * gs.font_size * gs.h_scaling;
                    }
                }
            }
        }

        let trm = multiply(&start_tm, &gs.ctm);
        let (x, y) = transform(&trm, 0.0, gs.rise);
        let event = TextEvent {
            x,
            y,
            font_size: gs.font_size * trm[2].hypot(trm[3]),
            width: advance * trm[0].hypot(trm[1]),
            text,
        };
        self.tm = multiply(&translate(advance, 0.0), &start_tm);
        if !event.text.is_empty() {
            self.handler.on_text(event);
        }
    }
}

/// Convert a numeric operand (Integer or Real) to f64.
pub(crate) fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => Some(f64::from(*f)),
        _ => None,
    }
}

fn get_f64(operands: &[Object], index: usize) -> Option<f64> {
    operands.get(index).and_then(number)
}

fn get_matrix(operands: &[Object]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    let mut m = IDENTITY;
    for (i, slot) in m.iter_mut().enumerate() {
        *slot = get_f64(operands, i)?;
    }
    Some(m)
}
