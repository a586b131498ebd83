//! Abstract syntax tree for the Strand language
//!
//! Expressions and statements are closed tagged enums; each node owns its
//! children exclusively, so dropping a tree frees it with no extra traversal.

use crate::common::Span;
use serde::{Deserialize, Serialize};

/// A fully parsed program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

/// An expression with its source span
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Expression variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExprKind {
    /// Integer literal
    LiteralInt(i64),
    /// Variable reference; unbound names read as integer zero
    Variable(String),
    /// Binary operation over two sub-expressions
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Sequence literal `[e0, e1, ...]`
    SeqInit(Vec<Expr>),
    /// Element read `seq[index]`
    SeqIndex { seq: Box<Expr>, index: Box<Expr> },
    /// `len(seq)`
    SeqLen(Box<Expr>),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Short-circuit logical and
    And,
    /// Short-circuit logical or
    Or,
    Less,
    Equals,
}

/// A statement with its source span
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

/// Statement variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StmtKind {
    /// Evaluate and print, with no trailing newline
    Print(Expr),
    /// `{ ... }`, executed in order
    Compound(Vec<Stmt>),
    If {
        cond: Expr,
        body: Box<Stmt>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    /// `name = value;` when `index` is None, `name[index] = value;` otherwise
    Assign {
        name: String,
        index: Option<Expr>,
        value: Expr,
    },
    /// `push(seq, value);`
    Push {
        seq: Expr,
        value: Expr,
    },
}
