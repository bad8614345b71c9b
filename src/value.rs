use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Semantic failures produced while reducing an AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalError {
    #[error("Division By Zero!")]
    DivisionByZero,
    #[error("Invalid Operator!")]
    InvalidOperator,
    /// Literal out of range, or arithmetic overflow.
    #[error("Invalid Number!")]
    InvalidNumber,
}

/// The result of evaluating one line: a number or an evaluation error.
///
/// # Examples
///
/// ```rust
/// use lispy::value::{EvalError, Value};
/// assert_eq!(Value::Number(-3).to_string(), "-3");
/// assert_eq!(
///     Value::Error(EvalError::DivisionByZero).to_string(),
///     "Error: Division By Zero!"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Number(i64),
    Error(EvalError),
}

impl Value {
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn into_result(self) -> Result<i64, EvalError> {
        match self {
            Value::Number(n) => Ok(n),
            Value::Error(e) => Err(e),
        }
    }
}

impl From<EvalError> for Value {
    fn from(error: EvalError) -> Self {
        Value::Error(error)
    }
}

impl From<Result<i64, EvalError>> for Value {
    fn from(result: Result<i64, EvalError>) -> Self {
        match result {
            Ok(n) => Value::Number(n),
            Err(e) => Value::Error(e),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Error(e) => write!(f, "Error: {}", e),
        }
    }
}
