//! Cell text cleanup: turning a concatenated cell string into menu items.
//!
//! Text runs lose their delimiters when concatenated, so consecutive dishes
//! come out glued together (`"Pasta al pomodoroRisotto"`). Items are split
//! wherever a lowercase letter is directly followed by an uppercase one.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Lowercase (ASCII or Latin-1 accented) then uppercase, at most one space apart.
static ITEM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\x{E0}-\x{FF}])\s?([A-Z])").expect("valid regex"));

const SEPARATOR: char = ';';

/// Replace every whitespace run with a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// Split a raw cell string into trimmed, non-empty items.
///
/// Steps: NFC-compose (so decomposed accents count as lowercase letters),
/// collapse whitespace, apply the literal `fixups`, mark item boundaries,
/// then split.
///
/// Every occurrence of a fixup is replaced, not just the first. Items are
/// trimmed and empty ones dropped, so a blank cell yields an empty list
/// rather than a single empty string.
pub fn split_items(raw: &str, fixups: &[(String, String)]) -> Vec<String> {
    let composed: String = raw.nfc().collect();
    let mut text = collapse_whitespace(&composed);
    for (from, to) in fixups {
        text = text.replace(from.as_str(), to);
    }

    let marked = ITEM_BOUNDARY.replace_all(&text, format!("${{1}}{SEPARATOR}${{2}}").as_str());
    marked
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
