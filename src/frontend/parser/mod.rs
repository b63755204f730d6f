// src/frontend/parser/mod.rs

use crate::errors::{LexerError, ParserError};
use crate::frontend::{Lexer, Span, Token, TokenType, ast::*};

pub struct Parser<'src> {
    pub(super) lexer: Lexer<'src>,
    pub(super) current: Token,
    pub(super) previous: Token,
    next_node_id: u32,
}

/// A parse error wrapping a miette-enabled ParserError
#[derive(Debug)]
pub struct ParseError {
    pub error: ParserError,
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(error: ParserError, span: Span) -> Self {
        Self { error, span }
    }
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            previous: Token::new(TokenType::Eof, "", Span::default()),
            next_node_id: 0,
        }
    }

    /// Generate a unique node ID
    pub(super) fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    /// Parse a whole compilation unit.
    ///
    /// Imports, type definitions and class definitions are kept; every other
    /// top-level item (listeners, services, functions, constants) is skipped.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut imports = Vec::new();
        let mut type_defs = Vec::new();
        let mut classes = Vec::new();

        while !self.check(TokenType::Eof) {
            if self.check(TokenType::KwImport) {
                imports.push(self.import_decl()?);
                continue;
            }

            let start = self.current.span;
            let qualifiers = self.parse_qualifiers();
            if self.check(TokenType::KwClass) {
                classes.push(self.class_decl(qualifiers, start)?);
            } else if self.check_contextual("type") {
                type_defs.push(self.type_def_decl(start)?);
            } else {
                self.skip_item()?;
            }
        }

        Ok(Program {
            imports,
            type_defs,
            classes,
        })
    }

    /// Take lexer errors (for diagnostic rendering)
    pub fn take_lexer_errors(&mut self) -> Vec<LexerError> {
        self.lexer.take_errors()
    }

    /// Advance to the next token
    pub(super) fn advance(&mut self) {
        self.previous = std::mem::replace(&mut self.current, self.lexer.next_token());
    }

    /// Check if the current token matches the given type
    pub(super) fn check(&self, ty: TokenType) -> bool {
        self.current.ty == ty
    }

    /// Check for an identifier used as a contextual keyword (`type`, `record`)
    pub(super) fn check_contextual(&self, keyword: &str) -> bool {
        self.current.ty == TokenType::Identifier && self.current.lexeme == keyword
    }

    /// Consume the current token if it matches, otherwise return false
    pub(super) fn match_token(&mut self, ty: TokenType) -> bool {
        if self.check(ty) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Require a token of the given type, or return an error
    pub(super) fn consume(&mut self, ty: TokenType, msg: &str) -> Result<(), ParseError> {
        if self.check(ty) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::new(
                ParserError::ExpectedToken {
                    expected: msg.to_string(),
                    found: self.current.lexeme.clone(),
                    span: self.current.span.into(),
                },
                self.current.span,
            ))
        }
    }

    /// Consume an identifier (plain or quoted) and return its text and span
    pub(super) fn identifier(&mut self) -> Result<(String, Span), ParseError> {
        let token = self.current.clone();
        match token.ty {
            TokenType::Identifier => {
                self.advance();
                Ok((token.lexeme, token.span))
            }
            TokenType::QuotedIdentifier => {
                self.advance();
                Ok((token.lexeme.trim_start_matches('\'').to_string(), token.span))
            }
            _ => Err(ParseError::new(
                ParserError::ExpectedIdentifier {
                    found: token.lexeme.clone(),
                    span: token.span.into(),
                },
                token.span,
            )),
        }
    }

    /// Span from `start` through the last consumed token
    pub(super) fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous.span)
    }

    /// Create an unexpected token error at the current position
    pub(super) fn unexpected_token_error(&self) -> ParseError {
        ParseError::new(
            ParserError::UnexpectedToken {
                token: self.current.lexeme.clone(),
                span: self.current.span.into(),
            },
            self.current.span,
        )
    }

    /// Skip one item: everything up to a `;` or the `}` closing the first
    /// block opened by the item.
    pub(super) fn skip_item(&mut self) -> Result<(), ParseError> {
        let mut depth = 0usize;
        let mut opened_at = self.current.span;
        loop {
            match self.current.ty {
                TokenType::Eof if depth > 0 => {
                    return Err(ParseError::new(
                        ParserError::UnterminatedBlock {
                            span: opened_at.into(),
                        },
                        opened_at,
                    ));
                }
                TokenType::Eof => return Ok(()),
                TokenType::LBrace => {
                    if depth == 0 {
                        opened_at = self.current.span;
                    }
                    depth += 1;
                    self.advance();
                }
                TokenType::RBrace => {
                    if depth == 0 {
                        // Stray closing brace: not ours to consume.
                        return Err(self.unexpected_token_error());
                    }
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        return Ok(());
                    }
                }
                TokenType::Semicolon if depth == 0 => {
                    self.advance();
                    return Ok(());
                }
                _ => self.advance(),
            }
        }
    }

    /// Skip a balanced `{ ... }` block starting at the current `{`
    pub(super) fn skip_block(&mut self) -> Result<(), ParseError> {
        let opened_at = self.current.span;
        self.consume(TokenType::LBrace, "'{'")?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.current.ty {
                TokenType::Eof => {
                    return Err(ParseError::new(
                        ParserError::UnterminatedBlock {
                            span: opened_at.into(),
                        },
                        opened_at,
                    ));
                }
                TokenType::LBrace => depth += 1,
                TokenType::RBrace => depth -= 1,
                _ => {}
            }
            self.advance();
        }
        Ok(())
    }

    /// Skip an expression up to (not including) one of `stops` at nesting depth 0
    pub(super) fn skip_until(&mut self, stops: &[TokenType]) -> Result<(), ParseError> {
        let mut depth = 0usize;
        loop {
            let ty = self.current.ty;
            if ty == TokenType::Eof {
                return Err(self.unexpected_token_error());
            }
            if depth == 0 && stops.contains(&ty) {
                return Ok(());
            }
            match ty {
                TokenType::LBrace | TokenType::LParen | TokenType::LBracket => depth += 1,
                TokenType::RBrace | TokenType::RParen | TokenType::RBracket => {
                    if depth == 0 {
                        return Err(self.unexpected_token_error());
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests;
