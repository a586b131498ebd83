//! Tree-walking interpreter
//!
//! Executes the AST directly against a single shared environment.

pub mod env;
pub mod eval;
pub mod value;

pub use env::Environment;
pub use eval::Interpreter;
pub use value::{Seq, Value};
