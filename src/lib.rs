//! Lispy: Polish-notation integer arithmetic.
//!
//! A line such as `+ 1 (* 2 3)` is parsed into an [`ast::AstNode`] by
//! [`syntax::parse`] and reduced to a [`value::Value`] by [`eval::eval`].

pub use crate::ast::AstNode;
pub use crate::syntax::ParseError;
pub use crate::value::{EvalError, Value};

pub mod ast;
pub mod cli;
pub mod eval;
pub mod repl;
pub mod syntax;
pub mod value;

/// Parses and evaluates one line.
///
/// Parse failures are returned as `Err`; evaluation errors are ordinary
/// values.
///
/// ```rust
/// use lispy::{evaluate, EvalError, Value};
/// assert_eq!(evaluate("- 10 2 3").unwrap(), Value::Number(5));
/// assert_eq!(evaluate("/ 5 0").unwrap(), Value::Error(EvalError::DivisionByZero));
/// assert!(evaluate("+ 1 2 )").is_err());
/// ```
pub fn evaluate(line: &str) -> Result<Value, ParseError> {
    let ast = syntax::parse(line)?;
    Ok(eval::eval(&ast))
}
