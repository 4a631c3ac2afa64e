//! Parameterized macro templating.
//!
//! A macro is a multi-line command template. Each `{...}` region in it marks one
//! user-supplied parameter, described by `key: value` attributes:
//!
//! ```text
//! G1 X{label: X, unit: mm, default: 10} F{label: Feedrate, unit: mm/s, default: 50}
//! SET_FAN_SPEED SPEED={options: 0|0.5|1, default: 1}
//! ```
//!
//! This module provides:
//!
//! - **Scanner**: finds placeholder regions in a template
//! - **Attributes**: parses one placeholder into a [`ParameterDescriptor`]
//! - **Model**: the ordered, bindable list of descriptors
//! - **Expander**: substitutes bound values and splits into command lines
//! - **Session**: the active macro for a dialog (`process` / `execute`)

mod attributes;
mod expander;
mod model;
mod scanner;
mod session;


pub use attributes::parse_placeholder;
pub use expander::{expand, split_lines};
pub use model::{ParamKey, ParameterDescriptor, ParameterModel};
pub use scanner::{Placeholder, Scan, scan};
pub use session::MacroSession;
