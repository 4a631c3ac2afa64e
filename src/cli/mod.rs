//! CLI argument parsing for kmacro.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Kmacro: run parameterized printer macros against a Klipper host.
///
/// Macros are command templates whose `{...}` placeholders describe
/// user-supplied parameters, e.g. `G1 X{label: X, unit: mm, default: 10}`.
#[derive(Parser, Debug)]
#[command(name = "kmacro")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (default: $KMACRO_CONFIG, then ./kmacro.yaml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit debug diagnostics on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for kmacro.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List configured macros.
    List,

    /// Show the parameter form of a macro.
    Params(ParamsArgs),

    /// Bind parameters, expand a macro and send it to the printer.
    Run(RunArgs),

    /// Expand an ad-hoc template and print the resulting commands.
    Expand(ExpandArgs),
}

/// Parameter bindings shared by `run` and `expand`.
#[derive(Args, Debug, Default)]
pub struct BindingArgs {
    /// Bind a parameter: KEY=VALUE, where KEY is a 1-based position or a label.
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_binding)]
    pub bindings: Vec<(String, String)>,
}

/// Arguments for the `params` command.
#[derive(Parser, Debug)]
pub struct ParamsArgs {
    /// Macro name (case-insensitive).
    pub name: String,

    /// Print the form as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Macro name (case-insensitive).
    pub name: String,

    #[command(flatten)]
    pub bindings: BindingArgs,

    /// Print the expanded commands instead of sending them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `expand` command.
#[derive(Parser, Debug)]
pub struct ExpandArgs {
    /// Template text.
    pub template: String,

    #[command(flatten)]
    pub bindings: BindingArgs,
}

/// Split `KEY=VALUE` at the first `=`. The value may be empty.
fn parse_binding(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_list() {
        let cli = Cli::try_parse_from(["kmacro", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List));
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_global_options_after_subcommand() {
        let cli =
            Cli::try_parse_from(["kmacro", "list", "--config", "my.yaml", "--verbose"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("my.yaml")));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_params() {
        let cli = Cli::try_parse_from(["kmacro", "params", "Move", "--json"]).unwrap();
        if let Command::Params(args) = cli.command {
            assert_eq!(args.name, "Move");
            assert!(args.json);
        } else {
            panic!("Expected Params command");
        }
    }

    #[test]
    fn parse_run_with_bindings() {
        let cli = Cli::try_parse_from([
            "kmacro",
            "run",
            "Move",
            "--set",
            "1=25",
            "-s",
            "Feedrate=3000",
            "--set",
            "Message=a=b",
            "--dry-run",
        ])
        .unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.name, "Move");
            assert!(args.dry_run);
            assert_eq!(
                args.bindings.bindings,
                vec![
                    ("1".to_string(), "25".to_string()),
                    ("Feedrate".to_string(), "3000".to_string()),
                    ("Message".to_string(), "a=b".to_string()),
                ]
            );
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_expand() {
        let cli = Cli::try_parse_from(["kmacro", "expand", "G1 X{default: 1}", "--set", "1="])
            .unwrap();
        if let Command::Expand(args) = cli.command {
            assert_eq!(args.template, "G1 X{default: 1}");
            assert_eq!(
                args.bindings.bindings,
                vec![("1".to_string(), String::new())]
            );
        } else {
            panic!("Expected Expand command");
        }
    }

    #[test]
    fn parse_binding_rejects_missing_key() {
        assert!(parse_binding("=5").is_err());
        assert!(parse_binding("noequals").is_err());
    }

    #[test]
    fn run_requires_name() {
        assert!(Cli::try_parse_from(["kmacro", "run"]).is_err());
    }
}
