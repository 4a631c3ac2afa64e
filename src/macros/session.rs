//! The active macro of a parameter dialog.

use super::expander::expand;
use super::model::{ParamKey, ParameterModel};
use super::scanner::scan;
use crate::error::MacroError;
use tracing::{debug, warn};

/// Holds the macro currently being edited and its parameter model.
///
/// `process` replaces everything from a previous macro; `execute` expands
/// the current bindings without consuming them.
#[derive(Debug, Clone, Default)]
pub struct MacroSession {
    name: String,
    template: String,
    model: ParameterModel,
    unterminated: Vec<usize>,
}

impl MacroSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan and parse `template`, replacing any previously active macro.
    pub fn process(&mut self, template: &str, display_name: &str) {
        let scan = scan(template);

        for position in &scan.unterminated {
            warn!(
                macro_name = display_name,
                position, "unterminated '{{' treated as literal text"
            );
        }

        self.name = display_name.to_string();
        self.template = template.to_string();
        self.model = ParameterModel::from_scan(&scan);
        self.unterminated = scan.unterminated;

        debug!(
            macro_name = display_name,
            parameters = self.model.len(),
            "processed macro"
        );
    }

    /// Expand the template with the current bindings into command lines.
    pub fn execute(&self) -> Result<Vec<String>, MacroError> {
        let commands = expand(&self.template, &self.model)?;
        debug!(
            macro_name = %self.name,
            commands = commands.len(),
            "expanded macro"
        );
        Ok(commands)
    }

    /// Bind a value to one parameter.
    pub fn bind(&mut self, key: &ParamKey, value: impl Into<String>) -> Result<(), MacroError> {
        self.model.bind(key, value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn parameters(&self) -> &ParameterModel {
        &self.model
    }

    /// Whether a parameter form is needed before executing.
    pub fn has_parameters(&self) -> bool {
        !self.model.is_empty()
    }

    /// Byte offsets of unterminated `{` found by the last `process`.
    pub fn warnings(&self) -> &[usize] {
        &self.unterminated
    }
}
