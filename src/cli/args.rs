//! Defines the command-line arguments and subcommands for the Lispy CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use termcolor::ColorChoice;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "lispy",
    version,
    about = "Interactive calculator for Polish-notation integer arithmetic."
)]
pub struct LispyArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// When to colorize output.
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides it.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read lines from stdin and evaluate each one.
    Repl {
        /// Suppress the banner and prompt.
        #[arg(short, long)]
        quiet: bool,
        /// What to print for each line.
        #[arg(long, value_enum, default_value = "eval")]
        mode: Mode,
    },
    /// Evaluate each LINE and print its result.
    Eval {
        #[arg(required = true, value_name = "LINE", allow_hyphen_values = true)]
        lines: Vec<String>,
    },
    /// Show the syntax tree for LINE.
    Ast {
        #[arg(value_name = "LINE", allow_hyphen_values = true)]
        line: String,
        /// Emit JSON instead of the indented dump.
        #[arg(long)]
        json: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Repl {
            quiet: false,
            mode: Mode::Eval,
        }
    }
}

/// Per-line output of the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Print the evaluated result.
    #[default]
    Eval,
    /// Print the indented syntax tree.
    Ast,
    /// Print input, syntax tree and result as one JSON object.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl From<ColorMode> for ColorChoice {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}
