// src/frontend/parse_decl.rs
//
// Declaration parsing: imports, classes and their members.

use super::ast::*;
use super::parser::{ParseError, Parser};
use super::token::TokenType;
use crate::frontend::Span;

impl<'src> Parser<'src> {
    /// `import org/module.path [as prefix];`
    pub(super) fn import_decl(&mut self) -> Result<ImportDecl, ParseError> {
        let start = self.current.span;
        self.consume(TokenType::KwImport, "'import'")?;

        let (first, _) = self.identifier()?;
        let (org, mut module) = if self.match_token(TokenType::Slash) {
            let (name, _) = self.identifier()?;
            (Some(first), name)
        } else {
            (None, first)
        };
        while self.match_token(TokenType::Dot) {
            let (segment, _) = self.identifier()?;
            module.push('.');
            module.push_str(&segment);
        }

        let prefix = if self.match_token(TokenType::KwAs) {
            Some(self.identifier()?.0)
        } else {
            None
        };
        self.consume(TokenType::Semicolon, "';' after import")?;

        Ok(ImportDecl {
            org,
            module,
            prefix,
            span: self.span_from(start),
        })
    }

    /// Collect leading qualifier keywords
    pub(super) fn parse_qualifiers(&mut self) -> Qualifiers {
        let mut qualifiers = Qualifiers::new();
        while let Some(qualifier) = qualifier_for(self.current.ty) {
            qualifiers.push(qualifier);
            self.advance();
        }
        qualifiers
    }

    pub(super) fn class_decl(
        &mut self,
        qualifiers: Qualifiers,
        start: Span,
    ) -> Result<ClassDecl, ParseError> {
        self.consume(TokenType::KwClass, "'class'")?;
        let (name, name_span) = self.identifier()?;
        self.consume(TokenType::LBrace, "'{' after class name")?;

        let mut type_refs = Vec::new();
        let mut fields = Vec::new();
        let mut functions = Vec::new();

        while !self.check(TokenType::RBrace) && !self.check(TokenType::Eof) {
            if self.check(TokenType::Star) {
                type_refs.push(self.type_ref()?);
                continue;
            }

            let member_start = self.current.span;
            while self.check(TokenType::At) {
                self.annotation()?;
            }
            let member_qualifiers = self.parse_qualifiers();
            if self.check(TokenType::KwFunction) {
                functions.push(self.function_decl(member_qualifiers, member_start)?);
            } else {
                fields.push(self.field_decl(member_qualifiers, member_start)?);
            }
        }
        self.consume(TokenType::RBrace, "'}' to close class body")?;

        Ok(ClassDecl {
            name,
            qualifiers,
            type_refs,
            fields,
            functions,
            span: self.span_from(start),
            name_span,
        })
    }

    /// `type Name record {..};`, `type Name [qualifiers] object {..};` or any
    /// other descriptor. Only the name and the descriptor kind are kept.
    pub(super) fn type_def_decl(&mut self, start: Span) -> Result<TypeDefDecl, ParseError> {
        self.advance();
        let (name, _) = self.identifier()?;
        self.parse_qualifiers();
        let kind = if self.check_contextual("record") {
            TypeDefKind::Record
        } else if self.check_contextual("object") {
            TypeDefKind::Object
        } else {
            TypeDefKind::Other
        };
        self.skip_item()?;
        // Braced descriptors stop at `}`; the trailing `;` is ours too
        self.match_token(TokenType::Semicolon);
        Ok(TypeDefDecl {
            name,
            kind,
            span: self.span_from(start),
        })
    }

    /// `*prefix:Name;`
    fn type_ref(&mut self) -> Result<TypeRef, ParseError> {
        let start = self.current.span;
        self.consume(TokenType::Star, "'*'")?;
        let (first, _) = self.identifier()?;
        let (prefix, name) = if self.match_token(TokenType::Colon) {
            (Some(first), self.identifier()?.0)
        } else {
            (None, first)
        };
        let span = self.span_from(start);
        self.consume(TokenType::Semicolon, "';' after type reference")?;
        Ok(TypeRef { prefix, name, span })
    }

    fn field_decl(
        &mut self,
        qualifiers: Qualifiers,
        start: Span,
    ) -> Result<FieldDecl, ParseError> {
        let ty = self.parse_type()?;
        let (name, _) = self.identifier()?;
        if self.match_token(TokenType::Eq) {
            self.skip_until(&[TokenType::Semicolon])?;
        }
        self.consume(TokenType::Semicolon, "';' after field")?;
        Ok(FieldDecl {
            qualifiers,
            ty,
            name,
            span: self.span_from(start),
        })
    }

    fn function_decl(
        &mut self,
        qualifiers: Qualifiers,
        start: Span,
    ) -> Result<FunctionDecl, ParseError> {
        self.consume(TokenType::KwFunction, "'function'")?;
        let id = self.next_id();

        let (kind, name, name_span) = if qualifiers.contains(&Qualifier::Resource) {
            let (accessor, accessor_span) = self.identifier()?;
            let path = self.resource_path()?;
            (
                FunctionKind::Resource {
                    accessor: accessor.clone(),
                    accessor_span,
                    path,
                },
                accessor,
                accessor_span,
            )
        } else {
            let (name, name_span) = self.identifier()?;
            (FunctionKind::Plain, name, name_span)
        };

        self.consume(TokenType::LParen, "'(' after function name")?;
        let params = self.param_list()?;

        let return_type = if self.match_token(TokenType::KwReturns) {
            while self.check(TokenType::At) {
                self.annotation()?;
            }
            Some(self.parse_type()?)
        } else {
            None
        };

        self.function_body()?;

        Ok(FunctionDecl {
            id,
            kind,
            qualifiers,
            name,
            params,
            return_type,
            span: self.span_from(start),
            name_span,
        })
    }

    /// Block body, `=> expr;`, `external;` or a bare `;`
    fn function_body(&mut self) -> Result<(), ParseError> {
        match self.current.ty {
            TokenType::LBrace => self.skip_block(),
            TokenType::FatArrow => {
                self.advance();
                self.skip_until(&[TokenType::Semicolon])?;
                self.consume(TokenType::Semicolon, "';' after expression body")
            }
            TokenType::Eq => {
                self.advance();
                self.skip_until(&[TokenType::Semicolon])?;
                self.consume(TokenType::Semicolon, "';' after external body")
            }
            TokenType::Semicolon => {
                self.advance();
                Ok(())
            }
            _ => Err(self.unexpected_token_error()),
        }
    }

    /// `.` or `seg/[Type name]/[Type... rest]`
    fn resource_path(&mut self) -> Result<ResourcePath, ParseError> {
        let start = self.current.span;
        if self.match_token(TokenType::Dot) {
            return Ok(ResourcePath {
                segments: Vec::new(),
                span: self.span_from(start),
            });
        }

        let mut segments = Vec::new();
        loop {
            if self.match_token(TokenType::LBracket) {
                let ty = self.parse_type()?;
                let rest = self.match_token(TokenType::Ellipsis);
                let (name, _) = self.identifier()?;
                self.consume(TokenType::RBracket, "']' after path parameter")?;
                segments.push(if rest {
                    PathSegment::Rest { ty, name }
                } else {
                    PathSegment::Param { ty, name }
                });
            } else {
                segments.push(PathSegment::Name(self.path_name()?));
            }
            if !self.match_token(TokenType::Slash) {
                break;
            }
        }

        Ok(ResourcePath {
            segments,
            span: self.span_from(start),
        })
    }

    /// Path segments may reuse keywords (`/service/status`)
    fn path_name(&mut self) -> Result<String, ParseError> {
        if self.current.ty.is_qualifier()
            || matches!(
                self.current.ty,
                TokenType::KwClass | TokenType::KwImport | TokenType::KwReturns
            )
        {
            let text = self.current.lexeme.clone();
            self.advance();
            return Ok(text);
        }
        Ok(self.identifier()?.0)
    }

    /// Parameters after the opening `(`; consumes the closing `)`
    fn param_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();
        if self.match_token(TokenType::RParen) {
            return Ok(params);
        }

        loop {
            let start = self.current.span;
            let mut annotations = Vec::new();
            while self.check(TokenType::At) {
                annotations.push(self.annotation()?);
            }
            let ty = self.parse_type()?;
            let rest = self.match_token(TokenType::Ellipsis);
            let name = if matches!(
                self.current.ty,
                TokenType::Identifier | TokenType::QuotedIdentifier
            ) {
                Some(self.identifier()?.0)
            } else {
                None
            };
            if self.match_token(TokenType::Eq) {
                self.skip_until(&[TokenType::Comma, TokenType::RParen])?;
            }
            params.push(Param {
                annotations,
                ty,
                name,
                rest,
                span: self.span_from(start),
            });

            if !self.match_token(TokenType::Comma) {
                break;
            }
        }

        self.consume(TokenType::RParen, "')' after parameters")?;
        Ok(params)
    }

    /// `@prefix:Name { ... }`; the value is skipped
    pub(super) fn annotation(&mut self) -> Result<Annotation, ParseError> {
        let start = self.current.span;
        self.consume(TokenType::At, "'@'")?;
        let (first, _) = self.identifier()?;
        let (prefix, name) = if self.match_token(TokenType::Colon) {
            (Some(first), self.identifier()?.0)
        } else {
            (None, first)
        };
        if self.check(TokenType::LBrace) {
            self.skip_block()?;
        }
        Ok(Annotation {
            prefix,
            name,
            span: self.span_from(start),
        })
    }
}

fn qualifier_for(ty: TokenType) -> Option<Qualifier> {
    match ty {
        TokenType::KwService => Some(Qualifier::Service),
        TokenType::KwIsolated => Some(Qualifier::Isolated),
        TokenType::KwClient => Some(Qualifier::Client),
        TokenType::KwReadonly => Some(Qualifier::Readonly),
        TokenType::KwDistinct => Some(Qualifier::Distinct),
        TokenType::KwPublic => Some(Qualifier::Public),
        TokenType::KwPrivate => Some(Qualifier::Private),
        TokenType::KwFinal => Some(Qualifier::Final),
        TokenType::KwRemote => Some(Qualifier::Remote),
        TokenType::KwResource => Some(Qualifier::Resource),
        _ => None,
    }
}
