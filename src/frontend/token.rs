// src/frontend/token.rs

use super::Span;

/// Token types for the service-class subset of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Literals
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    Identifier,
    /// `'default`, `'type` and other escaped identifiers
    QuotedIdentifier,

    // Keywords
    KwImport,
    KwAs,
    KwClass,
    KwFunction,
    KwResource,
    KwRemote,
    KwService,
    KwIsolated,
    KwClient,
    KwReadonly,
    KwDistinct,
    KwPublic,
    KwPrivate,
    KwFinal,
    KwReturns,

    // Operators
    Star,
    Slash,
    Eq,
    Pipe,
    Question,
    Lt,
    Gt,
    At,
    Dot,
    Ellipsis, // ...
    FatArrow, // =>
    Other,    // any other operator character; only meaningful inside skipped bodies

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Semicolon,

    // Special
    Error,
    Eof,
}

impl TokenType {
    /// Human readable form used in parser errors
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::IntLiteral => "integer",
            TokenType::FloatLiteral => "float",
            TokenType::StringLiteral => "string",
            TokenType::Identifier => "identifier",
            TokenType::QuotedIdentifier => "quoted identifier",
            TokenType::KwImport => "import",
            TokenType::KwAs => "as",
            TokenType::KwClass => "class",
            TokenType::KwFunction => "function",
            TokenType::KwResource => "resource",
            TokenType::KwRemote => "remote",
            TokenType::KwService => "service",
            TokenType::KwIsolated => "isolated",
            TokenType::KwClient => "client",
            TokenType::KwReadonly => "readonly",
            TokenType::KwDistinct => "distinct",
            TokenType::KwPublic => "public",
            TokenType::KwPrivate => "private",
            TokenType::KwFinal => "final",
            TokenType::KwReturns => "returns",
            TokenType::Star => "*",
            TokenType::Slash => "/",
            TokenType::Eq => "=",
            TokenType::Pipe => "|",
            TokenType::Question => "?",
            TokenType::Lt => "<",
            TokenType::Gt => ">",
            TokenType::At => "@",
            TokenType::Dot => ".",
            TokenType::Ellipsis => "...",
            TokenType::FatArrow => "=>",
            TokenType::Other => "operator",
            TokenType::LParen => "(",
            TokenType::RParen => ")",
            TokenType::LBrace => "{",
            TokenType::RBrace => "}",
            TokenType::LBracket => "[",
            TokenType::RBracket => "]",
            TokenType::Comma => ",",
            TokenType::Colon => ":",
            TokenType::Semicolon => ";",
            TokenType::Error => "error",
            TokenType::Eof => "end of file",
        }
    }

    /// Keywords that may prefix a class or member declaration
    pub fn is_qualifier(&self) -> bool {
        matches!(
            self,
            TokenType::KwService
                | TokenType::KwIsolated
                | TokenType::KwClient
                | TokenType::KwReadonly
                | TokenType::KwDistinct
                | TokenType::KwPublic
                | TokenType::KwPrivate
                | TokenType::KwFinal
                | TokenType::KwRemote
                | TokenType::KwResource
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub ty: TokenType,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(ty: TokenType, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            ty,
            lexeme: lexeme.into(),
            span,
        }
    }
}
