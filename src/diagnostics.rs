//! Diagnostic types for parse-time and run-time failures
//!
//! Every error here is fatal to the script run: the driver reports it once
//! and exits with a failure status. Source text is attached at the top level
//! (see `main.rs`), so the enums only carry spans.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Errors produced while lexing or parsing a program
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParseError {
    #[error("Unrecognized token")]
    #[diagnostic(code(parse::invalid_token))]
    InvalidToken {
        #[label("not a valid token")]
        span: SourceSpan,
    },

    #[error("Integer literal `{text}` is out of range")]
    #[diagnostic(code(parse::int_out_of_range))]
    IntOutOfRange {
        text: String,
        #[label("does not fit in a 64-bit integer")]
        span: SourceSpan,
    },

    #[error("Unexpected token: expected {expected}, found {found}")]
    #[diagnostic(code(parse::unexpected_token))]
    UnexpectedToken {
        expected: String,
        found: String,
        #[label("unexpected token here")]
        span: SourceSpan,
    },

    #[error("Unexpected end of file")]
    #[diagnostic(code(parse::unexpected_eof))]
    UnexpectedEof {
        #[label("expected more tokens")]
        span: SourceSpan,
    },
}

/// Errors produced while a program is running
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum RuntimeError {
    #[error("Type mismatch: expected {expected}, found {found}")]
    #[diagnostic(code(runtime::type_mismatch))]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        #[label("this evaluates to a {found}")]
        span: SourceSpan,
    },

    #[error("Divide by zero")]
    #[diagnostic(code(runtime::divide_by_zero))]
    DivideByZero {
        #[label("divisor is zero")]
        span: SourceSpan,
    },

    #[error("Index out of bounds: {index} not in 0..{len}")]
    #[diagnostic(code(runtime::index_out_of_bounds))]
    IndexOutOfBounds {
        index: i64,
        len: usize,
        #[label("invalid sequence index")]
        span: SourceSpan,
    },
}
