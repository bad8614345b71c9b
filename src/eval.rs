//! # Evaluator
//!
//! Reduces an [`AstNode`] to a single [`Value`] by post-order recursion.
//!
//! ## Rules
//!
//! - A node tagged `number` converts its contents with a strict base-10 parse.
//!   Literals outside the `i64` range become `Error(InvalidNumber)`.
//! - Any other node is an operator application: the first `operator` child
//!   names the operation, the `expr`/`number` children after it are operands.
//!   The first operand seeds the accumulator and every following operand is
//!   folded in left to right.
//! - Errors are values. Once the accumulator holds an error, the remaining
//!   operands are not evaluated and that error is the result.
//!
//! Intermediate arithmetic is checked: overflow yields `Error(InvalidNumber)`
//! instead of wrapping.

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::ast::AstNode;
use crate::value::{EvalError, Value};

// ============================================================================
// OPERATORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }

    /// Applies the operator to two integers. Division truncates toward zero.
    pub fn apply(self, lhs: i64, rhs: i64) -> Result<i64, EvalError> {
        match self {
            Operator::Add => lhs.checked_add(rhs).ok_or(EvalError::InvalidNumber),
            Operator::Sub => lhs.checked_sub(rhs).ok_or(EvalError::InvalidNumber),
            Operator::Mul => lhs.checked_mul(rhs).ok_or(EvalError::InvalidNumber),
            Operator::Div if rhs == 0 => Err(EvalError::DivisionByZero),
            // i64::MIN / -1
            Operator::Div => lhs.checked_div(rhs).ok_or(EvalError::InvalidNumber),
        }
    }
}

impl FromStr for Operator {
    type Err = EvalError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Sub),
            "*" => Ok(Operator::Mul),
            "/" => Ok(Operator::Div),
            _ => Err(EvalError::InvalidOperator),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Evaluates a tree produced by [`crate::syntax::parse`] (or built by hand).
pub fn eval(node: &AstNode) -> Value {
    if node.tag.is("number") {
        return eval_number(&node.contents);
    }

    let mut rest = node
        .children
        .iter()
        .skip_while(|child| !child.tag.is("operator"));
    let Some(operator) = rest.next() else {
        trace!(tag = %node.tag, "node has no operator");
        return Value::Error(EvalError::InvalidOperator);
    };
    let op = operator.contents.trim().parse::<Operator>();

    let mut operands = rest.filter(|child| child.tag.is("expr") || child.tag.is("number"));
    let Some(first) = operands.next() else {
        trace!(tag = %node.tag, "operator has no operands");
        return Value::Error(EvalError::InvalidNumber);
    };

    let mut acc = eval(first);
    for operand in operands {
        if acc.is_error() {
            break;
        }
        acc = combine(op, acc, eval(operand));
    }
    acc
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

/// Strict literal conversion: an optional `-` followed by ASCII digits only.
fn eval_number(text: &str) -> Value {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Value::Error(EvalError::InvalidNumber);
    }
    match text.parse::<i64>() {
        Ok(n) => Value::Number(n),
        Err(_) => {
            trace!(literal = text, "literal out of range");
            Value::Error(EvalError::InvalidNumber)
        }
    }
}

/// One fold step. The left error wins over the right one.
fn combine(op: Result<Operator, EvalError>, lhs: Value, rhs: Value) -> Value {
    match (lhs, rhs) {
        (Value::Error(e), _) | (_, Value::Error(e)) => Value::Error(e),
        (Value::Number(a), Value::Number(b)) => match op {
            Ok(op) => op.apply(a, b).into(),
            Err(e) => Value::Error(e),
        },
    }
}
