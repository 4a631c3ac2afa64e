//! Command implementations for kmacro.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod list;
mod params;
mod run;

use crate::cli::{BindingArgs, Command};
use crate::config::Config;
use crate::error::Result;
use crate::macros::{MacroSession, ParamKey};

/// Dispatch a command to its implementation.
pub fn dispatch(config: &Config, command: Command) -> Result<()> {
    match command {
        Command::List => list::cmd_list(config),
        Command::Params(args) => params::cmd_params(config, args),
        Command::Run(args) => run::cmd_run(config, args),
        Command::Expand(args) => run::cmd_expand(args),
    }
}

/// Apply `--set KEY=VALUE` bindings in the order given.
fn apply_bindings(session: &mut MacroSession, bindings: &BindingArgs) -> Result<()> {
    for (key, value) in &bindings.bindings {
        session.bind(&ParamKey::parse(key), value.as_str())?;
    }
    Ok(())
}
