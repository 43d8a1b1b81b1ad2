//! `/ToUnicode` CMap parsing.
//!
//! Only the `bfchar` and `bfrange` sections matter for text extraction; the
//! codespace ranges and CID sections of a CMap are skipped.

use std::collections::HashMap;

use crate::error::DecodeError;

/// Widest `bfrange` accepted; CMap codes are at most two bytes wide.
const MAX_RANGE_SPAN: u32 = 0xFFFF;

/// Character code to Unicode string table read from a `/ToUnicode` stream.
#[derive(Debug, Clone, Default)]
pub struct ToUnicodeMap {
    mappings: HashMap<u32, String>,
}

impl ToUnicodeMap {
    /// Parse the decompressed bytes of a `/ToUnicode` stream.
    pub fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        let text = String::from_utf8_lossy(data);
        let mut mappings = HashMap::new();

        for section in sections(&text, "beginbfchar", "endbfchar") {
            parse_bfchar(section, &mut mappings)?;
        }
        for section in sections(&text, "beginbfrange", "endbfrange") {
            parse_bfrange(section, &mut mappings)?;
        }

        Ok(Self { mappings })
    }

    pub fn lookup(&self, code: u32) -> Option<&str> {
        self.mappings.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Bodies of every `begin ... end` block, in document order.
fn sections<'a>(text: &'a str, begin: &str, end: &str) -> Vec<&'a str> {
    let mut found = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(begin) {
        let body = &rest[start + begin.len()..];
        let Some(stop) = body.find(end) else {
            break;
        };
        found.push(&body[..stop]);
        rest = &body[stop + end.len()..];
    }
    found
}

/// `<src> <dst>` pairs.
fn parse_bfchar(section: &str, mappings: &mut HashMap<u32, String>) -> Result<(), DecodeError> {
    for line in section.lines() {
        let tokens = hex_tokens(line);
        if let [src, dst, ..] = tokens.as_slice() {
            mappings.insert(hex_code(src)?, utf16be(dst)?);
        }
    }
    Ok(())
}

/// `<lo> <hi> <dst>` and `<lo> <hi> [<dst0> <dst1> ...]` lines.
fn parse_bfrange(section: &str, mappings: &mut HashMap<u32, String>) -> Result<(), DecodeError> {
    for line in section.lines() {
        if let Some(open) = line.find('[') {
            let &[lo, hi, ..] = hex_tokens(&line[..open]).as_slice() else {
                continue;
            };
            let (lo, hi) = code_range(lo, hi)?;
            let close = line.rfind(']').unwrap_or(line.len());
            for (code, dst) in (lo..=hi).zip(hex_tokens(&line[open + 1..close])) {
                mappings.insert(code, utf16be(dst)?);
            }
        } else {
            let &[lo, hi, dst, ..] = hex_tokens(line).as_slice() else {
                continue;
            };
            let (lo, hi) = code_range(lo, hi)?;
            let dst = hex_code(dst)?;
            for code in lo..=hi {
                let target = dst.checked_add(code - lo).ok_or_else(|| {
                    DecodeError::Parse(format!("bfrange <{lo:X}> <{hi:X}> overflows <{dst:X}>"))
                })?;
                if let Some(ch) = char::from_u32(target) {
                    mappings.insert(code, ch.to_string());
                }
            }
        }
    }
    Ok(())
}

/// Bounds of a `bfrange` line. An inverted range is empty.
fn code_range(lo: &str, hi: &str) -> Result<(u32, u32), DecodeError> {
    let (lo, hi) = (hex_code(lo)?, hex_code(hi)?);
    if hi > lo && hi - lo > MAX_RANGE_SPAN {
        return Err(DecodeError::Parse(format!(
            "bfrange <{lo:X}> <{hi:X}> spans more than {} codes",
            MAX_RANGE_SPAN + 1
        )));
    }
    Ok((lo, hi))
}

/// Contents of every `<...>` token on a line.
fn hex_tokens(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start + 1..].find('>') else {
            break;
        };
        tokens.push(rest[start + 1..start + 1 + len].trim());
        rest = &rest[start + 1 + len + 1..];
    }
    tokens
}

fn hex_code(hex: &str) -> Result<u32, DecodeError> {
    u32::from_str_radix(hex, 16)
        .map_err(|e| DecodeError::Parse(format!("invalid CMap code <{hex}>: {e}")))
}

/// Decode a hex string of UTF-16BE code units. Two-digit values are widened.
fn utf16be(hex: &str) -> Result<String, DecodeError> {
    if hex.len() == 2 {
        return utf16be(&format!("00{hex}"));
    }
    if hex.len() % 4 != 0 {
        return Err(DecodeError::Parse(format!(
            "UTF-16BE value <{hex}> has {} hex digits",
            hex.len()
        )));
    }
    let units = hex
        .as_bytes()
        .chunks(4)
        .map(|chunk| {
            std::str::from_utf8(chunk)
                .ok()
                .and_then(|s| u16::from_str_radix(s, 16).ok())
                .ok_or_else(|| DecodeError::Parse(format!("invalid UTF-16BE value <{hex}>")))
        })
        .collect::<Result<Vec<u16>, _>>()?;
    String::from_utf16(&units)
        .map_err(|e| DecodeError::Parse(format!("invalid UTF-16BE value <{hex}>: {e}")))
}
