//! Lispy Parser
//!
//! Matches one input line against the `lispy` start rule of `grammar.pest`
//! and converts the resulting pest pairs into an owned [`AstNode`] tree.
//! This module is purely syntactic: numbers are kept as text and checked by
//! the evaluator.

use pest::error::{Error, ErrorVariant, InputLocation, LineColLocation};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use tracing::{debug, trace};

use crate::ast::{AstNode, Position, Tag};
use crate::syntax::error::{Expectation, ParseError};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct LispyParser;

/// Origin reported in diagnostics when none is given.
pub const DEFAULT_ORIGIN: &str = "<stdin>";

/// Deepest parenthesis nesting accepted. Matching and evaluation both recurse
/// once per level, so this keeps them well inside a 2 MiB thread stack.
pub const MAX_NESTING: usize = 256;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses one line into an AST rooted at the `lispy` rule.
pub fn parse(line: &str) -> Result<AstNode, ParseError> {
    parse_named(DEFAULT_ORIGIN, line)
}

/// Like [`parse`], naming the line source in diagnostics.
pub fn parse_named(origin: &str, line: &str) -> Result<AstNode, ParseError> {
    check_nesting(origin, line)?;

    let mut pairs = LispyParser::parse(Rule::lispy, line).map_err(|e| {
        let err = convert_parse_error(e, origin, line);
        debug!(origin, position = %err.position(), "parse failed");
        err
    })?;

    // A successful match of `lispy` yields exactly one top-level pair.
    let root = match pairs.next() {
        Some(pair) => build_node(pair),
        None => return Err(ParseError::new(origin, line, Position::new(0, 1, 1), vec![])),
    };
    trace!(nodes = root.node_count(), "parsed line");
    Ok(root)
}

// ============================================================================
// AST BUILDERS
// ============================================================================

fn build_node(pair: Pair<Rule>) -> AstNode {
    let tag = Tag::new(rule_label(pair.as_rule()));
    let position = get_position(&pair);
    let contents = pair.as_str().to_string();

    let mut children: Vec<AstNode> = pair
        .into_inner()
        .filter(|p| p.as_rule() != Rule::EOI)
        .map(build_node)
        .collect();

    // Collapse wrappers such as an `expr` around a bare `number`.
    if children.len() == 1 && children[0].contents == contents {
        let mut inner = children.remove(0);
        inner.tag = Tag::nested(&tag, &inner.tag);
        return inner;
    }

    AstNode {
        tag,
        contents,
        position,
        children,
    }
}

fn rule_label(rule: Rule) -> &'static str {
    match rule {
        Rule::number => "number",
        Rule::operator => "operator",
        Rule::lparen => "lparen",
        Rule::rparen => "rparen",
        Rule::expr => "expr",
        Rule::lispy => "lispy",
        _ => "unknown",
    }
}

fn describe_rule(rule: Rule) -> Expectation {
    match rule {
        Rule::lparen => Expectation::Token("("),
        Rule::rparen => Expectation::Token(")"),
        Rule::EOI => Expectation::EndOfInput,
        other => Expectation::Rule(rule_label(other)),
    }
}

fn get_position(pair: &Pair<Rule>) -> Position {
    let start = pair.as_span().start_pos();
    let (row, column) = start.line_col();
    Position::new(start.pos(), row, column)
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Rejects lines whose parentheses nest deeper than [`MAX_NESTING`], at the
/// first `(` past the limit.
fn check_nesting(origin: &str, line: &str) -> Result<(), ParseError> {
    let mut depth = 0usize;
    for (offset, byte) in line.bytes().enumerate() {
        match byte {
            b'(' => {
                depth += 1;
                if depth > MAX_NESTING {
                    debug!(origin, offset, "nesting limit exceeded");
                    return Err(ParseError::new(
                        origin,
                        line,
                        position_at(line, offset),
                        vec![Expectation::NestingLimit(MAX_NESTING)],
                    ));
                }
            }
            b')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Row and column (1-based, in chars) of a byte offset.
fn position_at(line: &str, offset: usize) -> Position {
    let before = &line[..offset];
    let row = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    Position::new(offset, row, column)
}

fn convert_parse_error(error: Error<Rule>, origin: &str, line: &str) -> ParseError {
    let offset = match error.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };
    let (row, column) = match error.line_col {
        LineColLocation::Pos(lc) => lc,
        LineColLocation::Span(lc, _) => lc,
    };

    let mut expected = Vec::new();
    if let ErrorVariant::ParsingError { positives, .. } = &error.variant {
        for rule in positives {
            let expectation = describe_rule(*rule);
            if !expected.contains(&expectation) {
                expected.push(expectation);
            }
        }
    }

    ParseError::new(origin, line, Position::new(offset, row, column), expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::error::Found;

    fn tags(node: &AstNode) -> Vec<&str> {
        node.children.iter().map(|c| c.tag.as_str()).collect()
    }

    #[test]
    fn test_operator_prefixed_line() {
        let root = parse("+ 5").unwrap();
        assert_eq!(root.tag.as_str(), "lispy");
        assert_eq!(tags(&root), vec!["operator", "expr|number"]);
        assert_eq!(root.children[1].contents, "5");
        assert!(root.children[1].is_leaf());
    }

    #[test]
    fn test_parenthesized_expr_shape() {
        let root = parse("* 2 (+ 1 2 3 4)").unwrap();
        let expr = &root.children[2];
        assert_eq!(expr.tag.as_str(), "expr");
        assert_eq!(
            tags(expr),
            vec!["lparen", "operator", "expr|number", "expr|number", "expr|number", "expr|number", "rparen"]
        );
        assert_eq!(expr.children[0].contents, "(");
        assert_eq!(expr.children[1].contents, "+");
        assert_eq!(expr.children.last().unwrap().contents, ")");
        assert_eq!(expr.contents, "(+ 1 2 3 4)");
    }

    #[test]
    fn test_positions_are_recorded() {
        let root = parse("+ 1 (- 2 3)").unwrap();
        let inner = &root.children[2];
        assert_eq!(inner.position, Position::new(4, 1, 5));
        assert_eq!(inner.children[1].position, Position::new(5, 1, 6));
    }

    #[test]
    fn test_whitespace_between_tokens_is_ignored() {
        let spaced = parse("  +   1 (  -  4\t2 )  ").unwrap();
        let compact = parse("+ 1 (- 4 2)").unwrap();
        assert_eq!(tags(&spaced), tags(&compact));
        assert_eq!(spaced.children[2].children[1].contents, "-");
        assert_eq!(spaced.children[2].children[3].contents, "2");
    }

    #[test]
    fn test_negative_literals() {
        let root = parse("+ -5 (- -3)").unwrap();
        assert_eq!(root.children[1].contents, "-5");
        assert_eq!(root.children[2].children[2].contents, "-3");
    }

    #[test]
    fn test_bare_number_is_rejected() {
        assert!(parse("5").is_err());
        assert!(parse("(+ 1 2)").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn test_invalid_tokens_are_rejected() {
        for line in ["** 2 3", "+ 1.5", "+ +1", "% 1 2", "+ (- )", "+ ()", "+ - 1"] {
            assert!(parse(line).is_err(), "{line:?} should not parse");
        }
    }

    #[test]
    fn test_trailing_garbage_fails() {
        let err = parse("+ 1 2 )").unwrap_err();
        assert_eq!(err.position().offset, 6);
        assert_eq!(err.position().column, 7);
        assert_eq!(err.found(), Found::Char(')'));
    }

    #[test]
    fn test_reports_furthest_failure() {
        let err = parse("+ 1 (* 2 x)").unwrap_err();
        assert_eq!(err.position().offset, 9);
        assert_eq!(err.found(), Found::Char('x'));
        assert!(!err.expected().is_empty());
    }

    #[test]
    fn test_unclosed_expr_fails_at_end() {
        let err = parse("+ 1 (* 2 3").unwrap_err();
        assert_eq!(err.position().offset, 10);
        assert_eq!(err.found(), Found::EndOfInput);
    }

    fn nested(depth: usize) -> String {
        format!("+ {}1{}", "(+ ".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn test_nesting_up_to_limit_parses() {
        let root = parse(&nested(MAX_NESTING)).unwrap();
        let mut deepest = 0;
        root.walk(&mut |_, depth| deepest = deepest.max(depth));
        assert_eq!(deepest, MAX_NESTING + 1);
    }

    #[test]
    fn test_nesting_past_limit_is_reported() {
        let line = nested(MAX_NESTING + 1);
        let err = parse(&line).unwrap_err();
        assert_eq!(err.expected(), &[Expectation::NestingLimit(MAX_NESTING)]);
        assert_eq!(err.found(), Found::Char('('));
        assert_eq!(err.position().offset, 2 + 3 * MAX_NESTING);
        assert_eq!(err.position().column, 3 + 3 * MAX_NESTING);
        assert!(err
            .to_string()
            .contains("expected at most 256 nested expressions, found '('"));
    }

    #[test]
    fn test_very_deep_nesting_fails_without_recursing() {
        let err = parse(&nested(50_000)).unwrap_err();
        assert_eq!(err.expected(), &[Expectation::NestingLimit(MAX_NESTING)]);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let line = "- (* 3 (+ 1 1)) -7 (/ 8 2)";
        assert_eq!(parse(line).unwrap(), parse(line).unwrap());
    }

    #[test]
    fn test_named_origin_in_message() {
        let err = parse_named("<arg>", "+").unwrap_err();
        assert!(err.to_string().starts_with("<arg>:1:2:"));
    }
}
