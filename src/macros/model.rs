//! Parameter model for the active macro.

use super::attributes::parse_placeholder;
use super::scanner::Scan;
use crate::error::MacroError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The parsed, bindable representation of one placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    /// Scan position of the placeholder this descriptor binds to.
    pub slot: usize,
    pub label: String,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Currently bound value.
    pub value: String,
    /// Unrecognized `key: value` attributes, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ParameterDescriptor {
    /// 1-based position, as shown in forms.
    pub fn position(&self) -> usize {
        self.slot + 1
    }
}

/// How a caller refers to a parameter when binding a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKey {
    /// 1-based position in the form.
    Position(usize),
    /// Label, compared case-insensitively.
    Label(String),
}

impl ParamKey {
    /// Interpret a positive integer as a position and anything else as a label.
    pub fn parse(key: &str) -> Self {
        let key = key.trim();
        match key.parse::<usize>() {
            Ok(n) if n >= 1 => ParamKey::Position(n),
            _ => ParamKey::Label(key.to_string()),
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKey::Position(n) => write!(f, "#{}", n),
            ParamKey::Label(label) => write!(f, "{}", label),
        }
    }
}

/// Ordered descriptors for one macro invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterModel {
    descriptors: Vec<ParameterDescriptor>,
}

impl ParameterModel {
    /// Build a model from a completed scan, one descriptor per placeholder.
    pub fn from_scan(scan: &Scan) -> Self {
        let descriptors = scan
            .placeholders
            .iter()
            .map(|p| parse_placeholder(&p.raw, p.slot))
            .collect();
        Self { descriptors }
    }

    /// Scan and parse a template.
    pub fn from_template(template: &str) -> Self {
        Self::from_scan(&super::scanner::scan(template))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.descriptors.iter()
    }

    /// Look up the descriptor bound to a scan slot.
    pub fn get(&self, slot: usize) -> Option<&ParameterDescriptor> {
        self.descriptors.iter().find(|d| d.slot == slot)
    }

    /// Bind a value to the descriptor named by `key`.
    ///
    /// Any string is accepted, including the empty string and values outside
    /// the descriptor's `options`.
    pub fn bind(&mut self, key: &ParamKey, value: impl Into<String>) -> Result<(), MacroError> {
        let index = self
            .position_of(key)
            .ok_or_else(|| MacroError::UnknownParameter(key.to_string()))?;
        self.descriptors[index].value = value.into();
        Ok(())
    }

    /// Label/value pairs in form order.
    pub fn bound_values(&self) -> Vec<(String, String)> {
        self.descriptors
            .iter()
            .map(|d| (d.label.clone(), d.value.clone()))
            .collect()
    }

    fn position_of(&self, key: &ParamKey) -> Option<usize> {
        match key {
            ParamKey::Position(n) => self.descriptors.iter().position(|d| d.position() == *n),
            ParamKey::Label(label) => self
                .descriptors
                .iter()
                .position(|d| d.label.eq_ignore_ascii_case(label)),
        }
    }
}
