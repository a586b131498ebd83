//! Token definitions for the Strand lexer

use crate::common::Span;
use logos::Logos;
use serde::{Deserialize, Serialize};

/// A token with its kind, span, and text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

/// Token kinds recognized by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos, Serialize, Deserialize)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum TokenKind {
    // Keywords
    #[token("print")]
    Print,
    #[token("push")]
    Push,
    #[token("if")]
    If,
    #[token("while")]
    While,
    #[token("len")]
    Len,

    // Literals
    #[regex(r"[0-9]+")]
    IntLit,

    // Identifiers
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", priority = 1)]
    Ident,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("<")]
    Lt,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // Punctuation
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // Special
    Eof,
}

impl TokenKind {
    /// Check if this token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Print | TokenKind::Push | TokenKind::If | TokenKind::While | TokenKind::Len
        )
    }

    /// Get the string representation of the token
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Print => "print",
            TokenKind::Push => "push",
            TokenKind::If => "if",
            TokenKind::While => "while",
            TokenKind::Len => "len",
            TokenKind::IntLit => "<int>",
            TokenKind::Ident => "<ident>",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Lt => "<",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Semi => ";",
            TokenKind::Eof => "<eof>",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
