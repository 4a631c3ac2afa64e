//! Implementation of the `kmacro params` command.
//!
//! Renders the parameter form of a macro: one row per placeholder, in the
//! order values are substituted.

use crate::cli::ParamsArgs;
use crate::config::Config;
use crate::error::{KmacroError, Result};
use crate::macros::{MacroSession, ParameterModel};

/// Show the parameter form for one macro.
pub fn cmd_params(config: &Config, args: ParamsArgs) -> Result<()> {
    let definition = config.find_macro(&args.name)?;

    let mut session = MacroSession::new();
    session.process(&definition.template, &definition.name);

    if args.json {
        let json = serde_json::to_string_pretty(session.parameters()).map_err(|e| {
            KmacroError::UserError(format!("failed to serialize parameters: {}", e))
        })?;
        println!("{}", json);
        return Ok(());
    }

    println!("Macro: {}", session.name());
    println!();
    for line in session.template().lines() {
        println!("  {}", line);
    }
    println!();
    print!("{}", render_form(session.parameters()));

    if !session.warnings().is_empty() {
        println!();
        for position in session.warnings() {
            println!(
                "Note: unterminated '{{' at byte {} is sent as literal text.",
                position
            );
        }
    }

    Ok(())
}

/// Format the model as a plain-text table.
pub(crate) fn render_form(model: &ParameterModel) -> String {
    if model.is_empty() {
        return "No parameters; the macro is sent as-is.\n".to_string();
    }

    let rows: Vec<[String; 5]> = model
        .iter()
        .map(|d| {
            [
                d.position().to_string(),
                d.label.clone(),
                d.unit.clone(),
                d.default.clone().unwrap_or_default(),
                d.options
                    .as_ref()
                    .map(|o| o.join(" | "))
                    .unwrap_or_default(),
            ]
        })
        .collect();

    let headers = ["#", "Label", "Unit", "Default", "Options"];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_row = |cells: [&str; 5]| {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:width$}", cell))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };

    push_row(headers);
    for row in &rows {
        push_row([&row[0], &row[1], &row[2], &row[3], &row[4]]);
    }
    out
}
