//! Lexer for the Strand language
//!
//! Turns source text into a flat token stream, always terminated by `Eof`.

pub mod tokens;

pub use tokens::{Token, TokenKind};

use crate::common::Span;
use crate::diagnostics::ParseError;
use logos::Logos;

/// Lex source text into tokens
pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::new(range.start, range.end);
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                span,
                text: lexer.slice().to_string(),
            }),
            Err(()) => return Err(ParseError::InvalidToken { span: span.into() }),
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::new(source.len(), source.len()),
        text: String::new(),
    });

    Ok(tokens)
}
