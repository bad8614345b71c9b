//! Handles all user-facing output for the CLI and REPL.
//!
//! Results, parse errors and syntax trees are written to any
//! `termcolor::WriteColor` sink, so the same code drives a colored terminal
//! and an in-memory `NoColor` buffer in tests.

use std::io::{self, Write};

use serde::Serialize;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::ast::AstNode;
use crate::syntax::ParseError;
use crate::value::Value;

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Prints an evaluation result: numbers in green, errors in red.
pub fn print_value<W: WriteColor>(out: &mut W, value: &Value) -> io::Result<()> {
    let color = if value.is_error() {
        Color::Red
    } else {
        Color::Green
    };
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{}", value)?;
    out.reset()?;
    writeln!(out)
}

/// Prints a parse error's one-line description.
pub fn print_parse_error<W: WriteColor>(out: &mut W, error: &ParseError) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
    write!(out, "{}", error)?;
    out.reset()?;
    writeln!(out)
}

/// Prints the indented syntax tree dump.
pub fn print_tree<W: WriteColor>(out: &mut W, ast: &AstNode) -> io::Result<()> {
    out.write_all(ast.render_tree().as_bytes())
}

#[derive(Serialize)]
struct LineReport<'a> {
    input: &'a str,
    ast: &'a AstNode,
    value: Value,
}

/// Prints input, tree and value as a single JSON line.
pub fn print_json<W: Write>(out: &mut W, input: &str, ast: &AstNode, value: Value) -> io::Result<()> {
    let report = LineReport { input, ast, value };
    serde_json::to_writer(&mut *out, &report)?;
    writeln!(out)
}

/// Prints a tree alone as pretty JSON.
pub fn print_ast_json<W: Write>(out: &mut W, ast: &AstNode) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, ast)?;
    writeln!(out)
}

/// Prints a `ParseError` with full miette diagnostics on stderr.
pub fn report_error(error: ParseError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}
