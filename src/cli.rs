//! The Lispy Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use termcolor::{ColorChoice, StandardStream};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::eval::eval;
use crate::repl::Repl;
use crate::syntax;

pub mod args;
pub mod output;

use args::{Command, LispyArgs, Mode};

/// Origin used in diagnostics for lines given on the command line.
const ARG_ORIGIN: &str = "<arg>";

/// The main entry point for the CLI.
pub fn run() -> ExitCode {
    let args = LispyArgs::parse();
    init_logging(args.verbose);

    let color = resolve_color(args.color.into());
    let command = args.command.unwrap_or_default();
    debug!(?command, "dispatching");

    let result = match command {
        Command::Repl { quiet, mode } => handle_repl(quiet, mode, color),
        Command::Eval { lines } => handle_eval(&lines, color),
        Command::Ast { line, json } => handle_ast(&line, json, color),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn handle_repl(quiet: bool, mode: Mode, color: ColorChoice) -> io::Result<ExitCode> {
    let stdin = io::stdin();
    let mut repl = Repl::new(StandardStream::stdout(color), mode).interactive(!quiet);
    repl.run(stdin.lock())?;
    Ok(ExitCode::SUCCESS)
}

/// Evaluates each line; fails if any line does not parse or evaluates to an error.
fn handle_eval(lines: &[String], color: ColorChoice) -> io::Result<ExitCode> {
    let mut stdout = StandardStream::stdout(color);
    let mut failed = false;

    for line in lines {
        match syntax::parse_named(ARG_ORIGIN, line) {
            Ok(ast) => {
                let value = eval(&ast);
                failed |= value.is_error();
                output::print_value(&mut stdout, &value)?;
            }
            Err(e) => {
                failed = true;
                stdout.flush()?;
                output::report_error(e);
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn handle_ast(line: &str, json: bool, color: ColorChoice) -> io::Result<ExitCode> {
    let ast = match syntax::parse_named(ARG_ORIGIN, line) {
        Ok(ast) => ast,
        Err(e) => {
            output::report_error(e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut stdout = StandardStream::stdout(color);
    if json {
        output::print_ast_json(&mut stdout, &ast)?;
    } else {
        output::print_tree(&mut stdout, &ast)?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SETUP
// ============================================================================

/// Logs go to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// `auto` only colors a terminal.
fn resolve_color(choice: ColorChoice) -> ColorChoice {
    if choice == ColorChoice::Auto && !io::stdout().is_terminal() {
        ColorChoice::Never
    } else {
        choice
    }
}
