//! Syntax module for the Lispy language
//!
//! Grammar, parser and parse-time diagnostics. This module has no dependency
//! on evaluation.

pub mod error;
pub mod parser;

pub use error::{Expectation, Found, ParseError};
pub use parser::{parse, parse_named, DEFAULT_ORIGIN, MAX_NESTING};
