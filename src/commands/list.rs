//! Implementation of the `kmacro list` command.

use crate::config::Config;
use crate::error::Result;
use crate::macros::ParameterModel;
use std::fmt::Write;

/// Print every configured macro with its parameter count and panel flags.
pub fn cmd_list(config: &Config) -> Result<()> {
    print!("{}", render_list(config));
    Ok(())
}

/// Render the macro table. `{:width$}` pads by chars, so widths are counted in chars too.
pub(crate) fn render_list(config: &Config) -> String {
    if config.macros.is_empty() {
        return "No macros configured.\n".to_string();
    }

    let width = config
        .macros
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:width$}  {:>6}  {:7}  {:3}", "Name", "Params", "Sidebar", "Tab");
    for m in &config.macros {
        let params = ParameterModel::from_template(&m.template).len();
        let _ = writeln!(
            out,
            "{:width$}  {:>6}  {:7}  {:3}",
            m.name,
            params,
            yes_no(m.sidebar),
            yes_no(m.tab)
        );
    }
    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
