//! Placeholder scanning.
//!
//! Placeholders are matched non-greedily from `{` to the next `}` on the same
//! line, left to right and non-overlapping. A `{` with no closing `}` is left
//! as literal text; its byte offset is reported so callers can warn about it.

use regex::Regex;
use std::sync::LazyLock;

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(.*?)\}").expect("Invalid placeholder regex"));

/// One `{...}` region of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// 0-based position in scan order. This is the binding key for the expander.
    pub slot: usize,
    /// Byte offset of the opening `{`.
    pub start: usize,
    /// Byte offset just past the closing `}`.
    pub end: usize,
    /// The placeholder text, braces included.
    pub raw: String,
}

/// Result of scanning a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    /// Placeholders in left-to-right order.
    pub placeholders: Vec<Placeholder>,
    /// Byte offsets of `{` characters that do not open a placeholder.
    pub unterminated: Vec<usize>,
}

/// Scan a template for placeholders.
pub fn scan(template: &str) -> Scan {
    let mut result = Scan::default();
    let mut cursor = 0;

    for (slot, m) in PLACEHOLDER_REGEX.find_iter(template).enumerate() {
        collect_open_braces(template, cursor, m.start(), &mut result.unterminated);
        result.placeholders.push(Placeholder {
            slot,
            start: m.start(),
            end: m.end(),
            raw: m.as_str().to_string(),
        });
        cursor = m.end();
    }
    collect_open_braces(template, cursor, template.len(), &mut result.unterminated);

    result
}

fn collect_open_braces(template: &str, from: usize, to: usize, out: &mut Vec<usize>) {
    out.extend(
        template[from..to]
            .match_indices('{')
            .map(|(offset, _)| from + offset),
    );
}
