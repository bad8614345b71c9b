//! Lispy REPL (Read-Eval-Print Loop)
//!
//! Reads one line at a time from any `BufRead` source, parses and evaluates
//! it, and writes one result or parse error per line to a `WriteColor` sink.
//! Lines are independent: nothing carries over from one line to the next, and
//! neither parse nor evaluation errors stop the loop.

use std::io::{self, BufRead};

use termcolor::WriteColor;
use tracing::debug;

use crate::cli::args::Mode;
use crate::cli::output;
use crate::eval::eval;
use crate::syntax;

const BANNER: &str = concat!("Lispy v", env!("CARGO_PKG_VERSION"));
const PROMPT: &str = "lispy> ";

/// What the loop should do after handling a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Counts of what happened over a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub evaluated: usize,
    pub parse_errors: usize,
    pub eval_errors: usize,
}

impl Summary {
    pub fn failures(&self) -> usize {
        self.parse_errors + self.eval_errors
    }
}

pub struct Repl<W> {
    out: W,
    mode: Mode,
    interactive: bool,
    line_number: usize,
    summary: Summary,
}

impl<W: WriteColor> Repl<W> {
    pub fn new(out: W, mode: Mode) -> Self {
        Self {
            out,
            mode,
            interactive: false,
            line_number: 0,
            summary: Summary::default(),
        }
    }

    /// Print the banner and a prompt before each line.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Runs until `:quit` or end of input.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<Summary> {
        if self.interactive {
            writeln!(self.out, "{}", BANNER)?;
            writeln!(self.out, "Type :help for help, :quit or Ctrl-D to exit")?;
            writeln!(self.out)?;
        }

        let mut buf = Vec::new();
        loop {
            self.prompt()?;
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                if self.interactive {
                    writeln!(self.out)?;
                }
                break;
            }
            // Invalid UTF-8 becomes U+FFFD and fails to parse like any other bad line.
            let line = String::from_utf8_lossy(&buf);
            if self.eval_line(&line)? == Flow::Quit {
                break;
            }
        }
        Ok(self.summary)
    }

    /// Handles one line of input.
    pub fn eval_line(&mut self, input: &str) -> io::Result<Flow> {
        self.line_number += 1;
        let line = input.trim_end_matches(['\r', '\n']);

        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        if let Some(command) = line.trim().strip_prefix(':') {
            return self.handle_command(command);
        }

        debug!(line_number = self.line_number, "evaluating line");
        let ast = match syntax::parse(line) {
            Ok(ast) => ast,
            Err(e) => {
                self.summary.parse_errors += 1;
                output::print_parse_error(&mut self.out, &e)?;
                return Ok(Flow::Continue);
            }
        };

        let value = eval(&ast);
        if let Err(kind) = value.into_result() {
            self.summary.eval_errors += 1;
            debug!(line_number = self.line_number, %kind, "line evaluated to an error");
        }
        self.summary.evaluated += 1;

        match self.mode {
            Mode::Eval => output::print_value(&mut self.out, &value)?,
            Mode::Ast => output::print_tree(&mut self.out, &ast)?,
            Mode::Json => output::print_json(&mut self.out, line, &ast, value)?,
        }
        Ok(Flow::Continue)
    }

    fn prompt(&mut self) -> io::Result<()> {
        if self.interactive {
            write!(self.out, "{}", PROMPT)?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn handle_command(&mut self, command: &str) -> io::Result<Flow> {
        match command.to_ascii_lowercase().as_str() {
            "help" | "h" => {
                writeln!(self.out, "Lispy REPL Commands:")?;
                writeln!(self.out, "  :help, :h     Show this help")?;
                writeln!(self.out, "  :quit, :q     Exit the REPL")?;
                writeln!(self.out)?;
                writeln!(self.out, "Enter an operator followed by operands, e.g. + 1 (* 2 3)")?;
                Ok(Flow::Continue)
            }
            "quit" | "q" => Ok(Flow::Quit),
            other => {
                writeln!(
                    self.out,
                    "Unknown command: :{}. Type :help for available commands.",
                    other
                )?;
                Ok(Flow::Continue)
            }
        }
    }
}
