// src/utils/text.rs

//! Text cleanup helpers shared by the page parsers.

use scraper::{ElementRef, Html};

/// Collapse runs of whitespace (including non-breaking spaces) into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element with whitespace collapsed.
pub fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    normalize_whitespace(&raw)
}

/// Number of characters (not bytes) in a string.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Flatten tooltip markup into comma-joined plain text.
///
/// Plain text passes through trimmed; markup is reduced to its non-empty
/// text nodes.
pub fn flatten_markup(s: &str) -> String {
    if !s.contains('<') {
        return normalize_whitespace(s);
    }
    let fragment = Html::parse_fragment(s);
    fragment
        .root_element()
        .text()
        .map(normalize_whitespace)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
