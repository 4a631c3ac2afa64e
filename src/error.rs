//! Error types for the kmacro CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Errors raised while binding or expanding a macro template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MacroError {
    /// The template's placeholders no longer line up with the parameter model.
    #[error(
        "macro has {found} placeholder(s) but {expected} parameter(s) are bound; re-process the macro before executing"
    )]
    BindingMismatch {
        /// Number of descriptors in the parameter model.
        expected: usize,
        /// Number of placeholders found at expansion time.
        found: usize,
    },

    /// A parameter key matched neither a position nor a label.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),
}

/// Main error type for kmacro operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum KmacroError {
    /// User provided invalid arguments or referenced something that does not exist.
    #[error("{0}")]
    UserError(String),

    /// The settings file could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Binding or expansion of a macro failed.
    #[error("Macro error: {0}")]
    Macro(#[from] MacroError),

    /// Expanded commands could not be delivered to the printer.
    #[error("Transport failed: {0}")]
    TransportError(String),
}

impl KmacroError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            KmacroError::UserError(_) => exit_codes::USER_ERROR,
            KmacroError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            KmacroError::Macro(_) => exit_codes::MACRO_FAILURE,
            KmacroError::TransportError(_) => exit_codes::TRANSPORT_FAILURE,
        }
    }
}

/// Result type alias for kmacro operations.
pub type Result<T> = std::result::Result<T, KmacroError>;
