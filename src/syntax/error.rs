//! Parse-time diagnostics.
//!
//! A `ParseError` is produced instead of an AST whenever a line does not match
//! the `lispy` rule. It records the furthest position any alternative reached
//! and the rules that were expected there.

use std::fmt;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::ast::Position;

// ============================================================================
// EXPECTATIONS
// ============================================================================

/// Something the parser would have accepted at the failure position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// A named grammar rule (`number`, `operator`, `expr`).
    Rule(&'static str),
    /// A literal token such as `(` or `)`.
    Token(&'static str),
    EndOfInput,
    /// Parentheses nested deeper than the parser accepts.
    NestingLimit(usize),
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Rule(name) => f.write_str(name),
            Expectation::Token(token) => write!(f, "'{}'", token),
            Expectation::EndOfInput => f.write_str("end of input"),
            Expectation::NestingLimit(limit) => {
                write!(f, "at most {} nested expressions", limit)
            }
        }
    }
}

/// The set of expectations at the failure position, rendered as
/// `a`, `a or b`, or `one of a, b or c`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Expected(pub Vec<Expectation>);

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => f.write_str("a valid expression"),
            [only] => write!(f, "{}", only),
            [first, second] => write!(f, "{} or {}", first, second),
            [init @ .., last] => {
                f.write_str("one of ")?;
                for (i, item) in init.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, " or {}", last)
            }
        }
    }
}

/// What was actually at the failure position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    Char(char),
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Char(c) => write!(f, "'{}'", c.escape_default()),
            Found::EndOfInput => f.write_str("end of input"),
        }
    }
}

// ============================================================================
// PARSE ERROR
// ============================================================================

#[derive(Debug, Error, Diagnostic)]
#[error("{origin}:{position}: expected {expected}, found {found}")]
#[diagnostic(code(lispy::parse))]
pub struct ParseError {
    origin: String,
    position: Position,
    expected: Expected,
    found: Found,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("parsing stopped here")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
}

impl ParseError {
    pub(crate) fn new(
        origin: &str,
        line: &str,
        position: Position,
        expected: Vec<Expectation>,
    ) -> Self {
        let found = line
            .get(position.offset..)
            .and_then(|rest| rest.chars().next())
            .map_or(Found::EndOfInput, Found::Char);
        let width = match found {
            Found::Char(c) => c.len_utf8(),
            Found::EndOfInput => 0,
        };
        let expected = Expected(expected);
        let help = (!expected.0.is_empty()).then(|| format!("expected {} here", expected));

        Self {
            origin: origin.to_string(),
            position,
            expected,
            found,
            source_code: NamedSource::new(origin, line.to_string()),
            span: (position.offset, width).into(),
            help,
        }
    }

    /// Furthest position reached before matching failed.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn expected(&self) -> &[Expectation] {
        &self.expected.0
    }

    pub fn found(&self) -> Found {
        self.found
    }

    /// Name of the line source, e.g. `<stdin>`.
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_set_reads_naturally() {
        let one = Expected(vec![Expectation::Rule("operator")]);
        assert_eq!(one.to_string(), "operator");

        let two = Expected(vec![Expectation::Rule("expr"), Expectation::EndOfInput]);
        assert_eq!(two.to_string(), "expr or end of input");

        let three = Expected(vec![
            Expectation::Rule("number"),
            Expectation::Token("("),
            Expectation::Token(")"),
        ]);
        assert_eq!(three.to_string(), "one of number, '(' or ')'");
    }

    #[test]
    fn empty_expected_set_still_reads_as_a_message() {
        assert_eq!(Expected::default().to_string(), "a valid expression");
        let limit = Expected(vec![Expectation::NestingLimit(256)]);
        assert_eq!(limit.to_string(), "at most 256 nested expressions");
    }

    #[test]
    fn message_names_origin_position_and_found() {
        let err = ParseError::new(
            "<stdin>",
            "+ 1 x",
            Position::new(4, 1, 5),
            vec![Expectation::Rule("expr"), Expectation::EndOfInput],
        );
        assert_eq!(
            err.to_string(),
            "<stdin>:1:5: expected expr or end of input, found 'x'"
        );
        assert_eq!(err.found(), Found::Char('x'));
        assert_eq!(err.help.as_deref(), Some("expected expr or end of input here"));
    }

    #[test]
    fn failure_past_last_char_finds_end_of_input() {
        let err = ParseError::new("<arg>", "+", Position::new(1, 1, 2), vec![]);
        assert_eq!(err.found(), Found::EndOfInput);
        assert!(err.help.is_none());
        assert_eq!(err.origin(), "<arg>");
    }
}
