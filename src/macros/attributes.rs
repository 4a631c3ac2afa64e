//! Placeholder attribute parsing.
//!
//! A placeholder holds zero or more `key: value` pairs. A key is a run of word
//! characters; the value runs over word characters, whitespace, `°`, `"`, `.`,
//! `|`, `/` and `-` until the next key or any other character (usually `,`).
//!
//! Recognized keys:
//!
//! - `label` - display name, defaults to `Input <n>`
//! - `unit` - display unit, defaults to empty
//! - `default` - seeds the bound value
//! - `options` - `|`-separated choices
//! - `value` - initial value when no `default` is given
//!
//! Any other key is kept verbatim in [`ParameterDescriptor::extra`].

use super::model::ParameterDescriptor;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static KEY_VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\w+)\s*:\s*([\w\s°"|./-]*)"#).expect("Invalid key/value regex")
});

#[derive(Default)]
struct Attributes {
    label: Option<String>,
    unit: Option<String>,
    default: Option<String>,
    options: Option<Vec<String>>,
    value: Option<String>,
    extra: BTreeMap<String, String>,
}

impl Attributes {
    fn set(&mut self, key: &str, value: &str) {
        let value = value.trim();
        match key {
            "label" => self.label = Some(value.to_string()),
            "unit" => self.unit = Some(value.to_string()),
            "default" => self.default = Some(value.to_string()),
            "value" => self.value = Some(value.to_string()),
            "options" => {
                self.options = Some(value.split('|').map(|o| o.trim().to_string()).collect())
            }
            _ => {
                self.extra.insert(key.to_string(), value.to_string());
            }
        }
    }
}

/// Parse one raw placeholder (braces included) into a descriptor.
///
/// `slot` is the 0-based scan position; the synthesized label uses `slot + 1`.
/// A placeholder without any recognizable pair still yields a descriptor.
///
/// # Examples
///
/// ```
/// use kmacro::macros::parse_placeholder;
///
/// let d = parse_placeholder("{label: Feedrate, unit: mm/s, default: 50}", 0);
/// assert_eq!(d.label, "Feedrate");
/// assert_eq!(d.unit, "mm/s");
/// assert_eq!(d.value, "50");
/// ```
pub fn parse_placeholder(raw: &str, slot: usize) -> ParameterDescriptor {
    let mut attrs = Attributes::default();
    let mut pos = 0;

    while let Some(caps) = KEY_VALUE_REGEX.captures_at(raw, pos) {
        let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) else {
            break;
        };
        let (value_text, next) = split_next_key(raw, value.start(), value.end());
        attrs.set(key.as_str(), value_text);
        pos = next;
    }

    let value = attrs
        .default
        .clone()
        .or(attrs.value)
        .unwrap_or_default();

    ParameterDescriptor {
        slot,
        label: attrs.label.unwrap_or_else(|| format!("Input {}", slot + 1)),
        unit: attrs.unit.unwrap_or_default(),
        default: attrs.default,
        options: attrs.options,
        value,
        extra: attrs.extra,
    }
}

/// Cut a greedy value short when its trailing word is really the next key.
///
/// Only a word starting with a non-digit counts as a key.
///
/// Returns the value text and the offset where scanning resumes.
fn split_next_key(raw: &str, start: usize, end: usize) -> (&str, usize) {
    let value = &raw[start..end];
    if !raw[end..].starts_with(':') {
        return (value, end);
    }

    let head = value.trim_end();
    let word_len: usize = head
        .chars()
        .rev()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .map(char::len_utf8)
        .sum();
    let cut = head.len() - word_len;

    // Keys never start with a digit, so `12:30` stays a value.
    match head[cut..].chars().next() {
        Some(c) if !c.is_numeric() => {}
        _ => return (value, end),
    }

    (&value[..cut], start + cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_only() {
        let d = parse_placeholder("{default: 10}", 0);
        assert_eq!(d.label, "Input 1");
        assert_eq!(d.unit, "");
        assert_eq!(d.default.as_deref(), Some("10"));
        assert_eq!(d.value, "10");
        assert!(d.options.is_none());
        assert!(d.extra.is_empty());
    }

    #[test]
    fn test_full_attributes() {
        let d = parse_placeholder("{label: Feedrate, unit: mm/s, default: 50}", 3);
        assert_eq!(d.slot, 3);
        assert_eq!(d.label, "Feedrate");
        assert_eq!(d.unit, "mm/s");
        assert_eq!(d.value, "50");
    }

    #[test]
    fn test_options_are_split_and_trimmed() {
        let d = parse_placeholder("{options: low|medium|high}", 0);
        assert_eq!(
            d.options,
            Some(vec![
                "low".to_string(),
                "medium".to_string(),
                "high".to_string()
            ])
        );
        assert_eq!(d.value, "");

        let d = parse_placeholder("{options: a | b c |d, default: b c}", 0);
        assert_eq!(
            d.options,
            Some(vec!["a".to_string(), "b c".to_string(), "d".to_string()])
        );
        assert_eq!(d.value, "b c");
    }

    #[test]
    fn test_no_pairs_still_yields_descriptor() {
        let d = parse_placeholder("{}", 1);
        assert_eq!(d.label, "Input 2");
        assert_eq!(d.unit, "");
        assert_eq!(d.value, "");
        assert!(d.default.is_none());

        let d = parse_placeholder("{just some text}", 0);
        assert_eq!(d.label, "Input 1");
        assert!(d.extra.is_empty());
    }

    #[test]
    fn test_extra_attributes_are_preserved() {
        let d = parse_placeholder("{label: Temp, min: 0, max: 300, hint: hotend °C}", 0);
        assert_eq!(d.extra.get("min").map(String::as_str), Some("0"));
        assert_eq!(d.extra.get("max").map(String::as_str), Some("300"));
        assert_eq!(d.extra.get("hint").map(String::as_str), Some("hotend °C"));
    }

    #[test]
    fn test_pairs_without_commas() {
        let d = parse_placeholder("{label: Bed temperature unit: C default: 60}", 0);
        assert_eq!(d.label, "Bed temperature");
        assert_eq!(d.unit, "C");
        assert_eq!(d.value, "60");
    }

    #[test]
    fn test_numeric_word_before_colon_stays_in_value() {
        let d = parse_placeholder("{default: 12:30}", 0);
        assert_eq!(d.default.as_deref(), Some("12"));
        assert_eq!(d.value, "12");
        assert!(d.extra.is_empty());

        let d = parse_placeholder("{label: Dwell 5: default: 2}", 0);
        assert_eq!(d.label, "Dwell 5");
        assert_eq!(d.value, "2");
    }

    #[test]
    fn test_whitespace_around_colon() {
        let d = parse_placeholder("{ label :Speed ,  default :  1.5  }", 0);
        assert_eq!(d.label, "Speed");
        assert_eq!(d.value, "1.5");
    }

    #[test]
    fn test_negative_and_quoted_values() {
        let d = parse_placeholder(r#"{default: -2.5}"#, 0);
        assert_eq!(d.value, "-2.5");

        let d = parse_placeholder(r#"{default: "hello world"}"#, 0);
        assert_eq!(d.value, r#""hello world""#);
    }

    #[test]
    fn test_value_key_seeds_when_no_default() {
        let d = parse_placeholder("{value: 7}", 0);
        assert_eq!(d.value, "7");
        assert!(d.default.is_none());

        let d = parse_placeholder("{value: 7, default: 9}", 0);
        assert_eq!(d.value, "9");
    }

    #[test]
    fn test_later_duplicate_key_wins() {
        let d = parse_placeholder("{default: 1, default: 2}", 0);
        assert_eq!(d.value, "2");
    }

    #[test]
    fn test_empty_label_is_kept() {
        let d = parse_placeholder("{label: , default: 1}", 0);
        assert_eq!(d.label, "");
    }

    #[test]
    fn test_value_stops_at_unsupported_character() {
        let d = parse_placeholder("{default: 10;rest}", 0);
        assert_eq!(d.value, "10");
    }
}
