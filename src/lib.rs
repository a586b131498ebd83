//! Strand scripting language interpreter
//!
//! Strand is a small imperative language with two kinds of values: 64-bit
//! integers and heap-allocated growable integer sequences. Sequences are
//! shared by reference: assigning one variable to another aliases the same
//! storage, and mutation through one alias is visible through all of them.
//!
//! # Architecture
//!
//! ```text
//! Source → Lexer → Parser → AST → Interpreter
//! ```
//!
//! # Example
//!
//! ```text
//! x = [72, 105];
//! i = 0;
//! while (i < len(x)) {
//!     print x[i];
//!     i = i + 1;
//! }
//! print x;        // prints "Hi"
//! ```

pub mod ast;
pub mod common;
pub mod diagnostics;
pub mod interp;
pub mod lexer;
pub mod parser;

// Re-exports for convenience
pub use ast::Program;
pub use diagnostics::{ParseError, RuntimeError};
pub use interp::{Environment, Interpreter, Seq, Value};

/// Interpreter version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse source code to a program
pub fn parse(source: &str) -> miette::Result<Program> {
    let tokens = lexer::lex(source)?;
    Ok(parser::parse(&tokens)?)
}

/// Run source code to completion, returning the interpreter so callers can
/// inspect the environment and captured output.
///
/// Statements are parsed one at a time and executed against one shared
/// environment; the first parse or runtime error aborts the run.
pub fn run(source: &str) -> miette::Result<Interpreter> {
    let tokens = lexer::lex(source)?;
    let mut parser = parser::Parser::new(&tokens);
    let mut interpreter = Interpreter::new();
    while let Some(stmt) = parser.next_stmt()? {
        interpreter.execute(&stmt)?;
    }
    Ok(interpreter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
