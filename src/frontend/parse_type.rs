// src/frontend/parse_type.rs
//
// Type expression parsing: named and qualified types, `error<T>`, nil,
// optionals, arrays and unions.

use super::TokenType;
use super::ast::{TypeExpr, TypeExprKind};
use super::parser::{ParseError, Parser};
use crate::errors::ParserError;

impl<'src> Parser<'src> {
    /// Parse a type expression, handling unions (A | B)
    pub(super) fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.current.span;
        let first = self.parse_postfix_type()?;
        if !self.check(TokenType::Pipe) {
            return Ok(first);
        }

        let mut members = vec![first];
        while self.match_token(TokenType::Pipe) {
            members.push(self.parse_postfix_type()?);
        }
        Ok(TypeExpr {
            kind: TypeExprKind::Union(members),
            span: self.span_from(start),
        })
    }

    /// Base type followed by any number of `?` and `[]` suffixes
    fn parse_postfix_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.current.span;
        let mut ty = self.parse_base_type()?;
        loop {
            if self.match_token(TokenType::Question) {
                ty = TypeExpr {
                    kind: TypeExprKind::Optional(Box::new(ty)),
                    span: self.span_from(start),
                };
            } else if self.match_token(TokenType::LBracket) {
                // Fixed-length arrays carry a size we don't need
                self.match_token(TokenType::IntLiteral);
                self.consume(TokenType::RBracket, "']' in array type")?;
                ty = TypeExpr {
                    kind: TypeExprKind::Array(Box::new(ty)),
                    span: self.span_from(start),
                };
            } else {
                return Ok(ty);
            }
        }
    }

    fn parse_base_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.current.span;
        match self.current.ty {
            TokenType::LParen => {
                self.advance();
                if self.match_token(TokenType::RParen) {
                    return Ok(TypeExpr {
                        kind: TypeExprKind::Nil,
                        span: self.span_from(start),
                    });
                }
                let inner = self.parse_type()?;
                self.consume(TokenType::RParen, "')' to close type")?;
                Ok(TypeExpr {
                    kind: TypeExprKind::Paren(Box::new(inner)),
                    span: self.span_from(start),
                })
            }
            TokenType::KwReadonly => {
                self.advance();
                Ok(TypeExpr {
                    kind: TypeExprKind::Named {
                        prefix: None,
                        name: "readonly".to_string(),
                    },
                    span: self.span_from(start),
                })
            }
            TokenType::Identifier => {
                let (first, _) = self.identifier()?;
                if self.match_token(TokenType::Colon) {
                    let (name, _) = self.identifier()?;
                    return Ok(TypeExpr {
                        kind: TypeExprKind::Named {
                            prefix: Some(first),
                            name,
                        },
                        span: self.span_from(start),
                    });
                }

                if first == "error" {
                    let detail = if self.match_token(TokenType::Lt) {
                        let detail = self.parse_type()?;
                        self.consume(TokenType::Gt, "'>' after error detail type")?;
                        Some(Box::new(detail))
                    } else {
                        None
                    };
                    return Ok(TypeExpr {
                        kind: TypeExprKind::Error(detail),
                        span: self.span_from(start),
                    });
                }

                let name = if self.match_token(TokenType::Lt) {
                    // map<T>, stream<T, E>, table<R>: keep the arguments textually
                    let mut args = vec![self.parse_type()?.text()];
                    while self.match_token(TokenType::Comma) {
                        args.push(self.parse_type()?.text());
                    }
                    self.consume(TokenType::Gt, "'>' after type arguments")?;
                    format!("{}<{}>", first, args.join(", "))
                } else {
                    first
                };
                Ok(TypeExpr {
                    kind: TypeExprKind::Named { prefix: None, name },
                    span: self.span_from(start),
                })
            }
            _ => Err(ParseError::new(
                ParserError::ExpectedType {
                    found: self.current.lexeme.clone(),
                    span: self.current.span.into(),
                },
                self.current.span,
            )),
        }
    }
}
