//! Placeholder substitution and command splitting.

use super::model::ParameterModel;
use super::scanner::scan;
use crate::error::MacroError;
use regex::Regex;
use std::sync::LazyLock;

static LINE_BREAK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("Invalid line break regex"));

/// Substitute bound values into `template` and split the result into commands.
///
/// The i-th placeholder in scan order is replaced by the descriptor whose
/// `slot` is i. The placeholder count must equal the model length.
///
/// # Errors
///
/// Returns [`MacroError::BindingMismatch`] if the template and model disagree.
pub fn expand(template: &str, model: &ParameterModel) -> Result<Vec<String>, MacroError> {
    let scan = scan(template);
    let mismatch = || MacroError::BindingMismatch {
        expected: model.len(),
        found: scan.placeholders.len(),
    };

    if scan.placeholders.len() != model.len() {
        return Err(mismatch());
    }

    let mut expanded = String::with_capacity(template.len());
    let mut cursor = 0;
    for placeholder in &scan.placeholders {
        let descriptor = model.get(placeholder.slot).ok_or_else(mismatch)?;
        expanded.push_str(&template[cursor..placeholder.start]);
        expanded.push_str(&descriptor.value);
        cursor = placeholder.end;
    }
    expanded.push_str(&template[cursor..]);

    Ok(split_lines(&expanded))
}

/// Split text on `\r\n`, `\r` or `\n`.
pub fn split_lines(text: &str) -> Vec<String> {
    LINE_BREAK_REGEX.split(text).map(str::to_string).collect()
}
