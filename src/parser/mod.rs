//! Parser for the Strand language
//!
//! A recursive descent parser over the token stream. The driver can pull one
//! top-level statement at a time with [`Parser::next_stmt`]; [`parse`] is the
//! whole-program convenience wrapper.

use crate::ast::*;
use crate::common::Span;
use crate::diagnostics::ParseError;
use crate::lexer::{Token, TokenKind};

/// Parse a token stream into a program
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens);
    let mut stmts = Vec::new();
    while let Some(stmt) = parser.next_stmt()? {
        stmts.push(stmt);
    }
    Ok(Program { stmts })
}

/// Parser state
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    eof: Token,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
        Self {
            tokens,
            pos: 0,
            eof: Token {
                kind: TokenKind::Eof,
                span: Span::new(end, end),
                text: String::new(),
            },
        }
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token
    fn prev_span(&self) -> Span {
        self.tokens
            .get(self.pos.saturating_sub(1))
            .map(|t| t.span)
            .unwrap_or_else(|| self.span())
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else if self.at(TokenKind::Eof) {
            Err(ParseError::UnexpectedEof {
                span: self.span().into(),
            })
        } else {
            Err(ParseError::UnexpectedToken {
                expected: format!("`{}`", kind),
                found: format!("`{}`", self.current().text),
                span: self.span().into(),
            })
        }
    }

    // ==================== STATEMENTS ====================

    /// Parse the next top-level statement, or `None` at end of input
    pub fn next_stmt(&mut self) -> Result<Option<Stmt>, ParseError> {
        if self.at(TokenKind::Eof) {
            return Ok(None);
        }
        self.parse_stmt().map(Some)
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.span();

        let kind = match self.peek() {
            TokenKind::Print => {
                self.advance();
                let arg = self.parse_expr()?;
                self.expect(TokenKind::Semi)?;
                StmtKind::Print(arg)
            }
            TokenKind::Push => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let seq = self.parse_expr()?;
                self.expect(TokenKind::Comma)?;
                let value = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                self.expect(TokenKind::Semi)?;
                StmtKind::Push { seq, value }
            }
            TokenKind::If => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let cond = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                let body = self.parse_stmt()?;
                StmtKind::If {
                    cond,
                    body: Box::new(body),
                }
            }
            TokenKind::While => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let cond = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                let body = self.parse_stmt()?;
                StmtKind::While {
                    cond,
                    body: Box::new(body),
                }
            }
            TokenKind::LBrace => {
                self.advance();
                let mut stmts = Vec::new();
                while !self.at(TokenKind::RBrace) {
                    if self.at(TokenKind::Eof) {
                        return Err(ParseError::UnexpectedEof {
                            span: self.span().into(),
                        });
                    }
                    stmts.push(self.parse_stmt()?);
                }
                self.expect(TokenKind::RBrace)?;
                StmtKind::Compound(stmts)
            }
            TokenKind::Ident => {
                let name = self.advance().text;
                let index = if self.at(TokenKind::LBracket) {
                    self.advance();
                    let idx = self.parse_expr()?;
                    self.expect(TokenKind::RBracket)?;
                    Some(idx)
                } else {
                    None
                };
                self.expect(TokenKind::Eq)?;
                let value = self.parse_expr()?;
                self.expect(TokenKind::Semi)?;
                StmtKind::Assign { name, index, value }
            }
            TokenKind::Eof => {
                return Err(ParseError::UnexpectedEof {
                    span: self.span().into(),
                });
            }
            _ => {
                return Err(ParseError::UnexpectedToken {
                    expected: "a statement".to_string(),
                    found: format!("`{}`", self.current().text),
                    span: self.span().into(),
                });
            }
        };

        Ok(Stmt {
            kind,
            span: start.merge(self.prev_span()),
        })
    }

    // ==================== EXPRESSIONS ====================

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        let span = left.span.merge(right.span);
        Expr {
            kind: ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        }
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.at(TokenKind::PipePipe) {
            self.advance();
            let right = self.parse_and()?;
            left = Self::binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;
        while self.at(TokenKind::AmpAmp) {
            self.advance();
            let right = self.parse_comparison()?;
            left = Self::binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek() {
                TokenKind::Lt => BinaryOp::Less,
                TokenKind::EqEq => BinaryOp::Equals,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            left = Self::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Self::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_postfix()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_postfix()?;
            left = Self::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        while self.at(TokenKind::LBracket) {
            self.advance();
            let index = self.parse_expr()?;
            self.expect(TokenKind::RBracket)?;
            let span = expr.span.merge(self.prev_span());
            expr = Expr {
                kind: ExprKind::SeqIndex {
                    seq: Box::new(expr),
                    index: Box::new(index),
                },
                span,
            };
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();

        match self.peek() {
            TokenKind::IntLit => {
                let tok = self.advance();
                let value = tok.text.parse::<i64>().map_err(|_| ParseError::IntOutOfRange {
                    text: tok.text.clone(),
                    span: tok.span.into(),
                })?;
                Ok(Expr {
                    kind: ExprKind::LiteralInt(value),
                    span: tok.span,
                })
            }
            TokenKind::Ident => {
                let tok = self.advance();
                Ok(Expr {
                    kind: ExprKind::Variable(tok.text),
                    span: tok.span,
                })
            }
            TokenKind::Len => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let arg = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(Expr {
                    kind: ExprKind::SeqLen(Box::new(arg)),
                    span: start.merge(self.prev_span()),
                })
            }
            TokenKind::LBracket => {
                self.advance();
                let mut elements = Vec::new();
                while !self.at(TokenKind::RBracket) {
                    elements.push(self.parse_expr()?);
                    if !self.at(TokenKind::RBracket) {
                        self.expect(TokenKind::Comma)?;
                    }
                }
                self.expect(TokenKind::RBracket)?;
                Ok(Expr {
                    kind: ExprKind::SeqInit(elements),
                    span: start.merge(self.prev_span()),
                })
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::Eof => Err(ParseError::UnexpectedEof {
                span: self.span().into(),
            }),
            _ => Err(ParseError::UnexpectedToken {
                expected: "an expression".to_string(),
                found: format!("`{}`", self.current().text),
                span: self.span().into(),
            }),
        }
    }
}
