// src/frontend/lexer.rs

use crate::errors::LexerError;
use crate::frontend::{Span, Token, TokenType};

pub struct Lexer<'src> {
    source: &'src str,
    chars: std::iter::Peekable<std::str::CharIndices<'src>>,
    start: usize,
    current: usize,
    line: u32,
    column: u32,
    start_column: u32,
    start_line: u32,
    // Error collection
    errors: Vec<LexerError>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_column: 1,
            start_line: 1,
            errors: Vec::new(),
        }
    }

    /// Take all collected errors, leaving the internal list empty.
    pub fn take_errors(&mut self) -> Vec<LexerError> {
        std::mem::take(&mut self.errors)
    }

    /// Check if any errors have been collected.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the next token from the source
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        self.start = self.current;
        self.start_column = self.column;
        self.start_line = self.line;

        let Some(c) = self.advance() else {
            return self.make_token(TokenType::Eof);
        };

        match c {
            '(' => self.make_token(TokenType::LParen),
            ')' => self.make_token(TokenType::RParen),
            '{' => self.make_token(TokenType::LBrace),
            '}' => self.make_token(TokenType::RBrace),
            '[' => self.make_token(TokenType::LBracket),
            ']' => self.make_token(TokenType::RBracket),
            ',' => self.make_token(TokenType::Comma),
            ':' => self.make_token(TokenType::Colon),
            ';' => self.make_token(TokenType::Semicolon),
            '*' => self.make_token(TokenType::Star),
            '/' => self.make_token(TokenType::Slash),
            '|' => self.make_token(TokenType::Pipe),
            '?' => self.make_token(TokenType::Question),
            '<' => self.make_token(TokenType::Lt),
            '>' => self.make_token(TokenType::Gt),
            '@' => self.make_token(TokenType::At),
            '=' => {
                if self.match_char('>') {
                    self.make_token(TokenType::FatArrow)
                } else if self.match_char('=') {
                    self.make_token(TokenType::Other)
                } else {
                    self.make_token(TokenType::Eq)
                }
            }
            '.' => {
                if self.peek() == Some('.') && self.peek_next() == Some('.') {
                    self.advance();
                    self.advance();
                    self.make_token(TokenType::Ellipsis)
                } else {
                    self.make_token(TokenType::Dot)
                }
            }
            '+' | '-' | '%' | '!' | '&' | '^' | '~' => self.make_token(TokenType::Other),

            '"' => self.string(),
            '`' => self.template(),
            '\'' => self.quoted_identifier(),

            c if c.is_ascii_digit() => self.number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => self.error_unexpected_char(c),
        }
    }

    /// Skip whitespace, newlines, `//` comments and `#` documentation lines
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('/') => self.skip_line(),
                Some('#') => self.skip_line(),
                _ => break,
            }
        }
    }

    fn skip_line(&mut self) {
        while self.peek() != Some('\n') && self.peek().is_some() {
            self.advance();
        }
    }

    /// Advance to the next character and return it
    fn advance(&mut self) -> Option<char> {
        let (idx, c) = self.chars.next()?;
        self.current = idx + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Peek at the next character without consuming it
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    /// Peek at the character after the next one
    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current..].chars();
        iter.next();
        iter.next()
    }

    /// Consume the next character if it matches the expected character
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn current_span(&self) -> Span {
        Span::new_with_end(
            self.start,
            self.current,
            self.start_line,
            self.start_column,
            self.line,
            self.column,
        )
    }

    /// Create a token from start to current position
    fn make_token(&self, ty: TokenType) -> Token {
        let lexeme = &self.source[self.start..self.current];
        Token::new(ty, lexeme, self.current_span())
    }

    /// Create an error token and collect an error for an unexpected character.
    fn error_unexpected_char(&mut self, c: char) -> Token {
        let span = self.current_span();
        self.errors.push(LexerError::UnexpectedCharacter {
            ch: c,
            span: span.into(),
        });
        Token::new(TokenType::Error, format!("unexpected character '{}'", c), span)
    }

    /// Create an error token and collect an error for an unterminated string.
    fn error_unterminated_string(&mut self) -> Token {
        let span = self.current_span();
        self.errors
            .push(LexerError::UnterminatedString { span: span.into() });
        Token::new(TokenType::Error, "unterminated string literal", span)
    }

    /// Scan an identifier or keyword
    fn identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.source[self.start..self.current];
        let ty = Self::keyword_type(text).unwrap_or(TokenType::Identifier);
        self.make_token(ty)
    }

    /// `'name`; the lexeme keeps the quote so the parser can strip it.
    fn quoted_identifier(&mut self) -> Token {
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return self.error_unexpected_char('\''),
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        self.make_token(TokenType::QuotedIdentifier)
    }

    /// Check if a string is a keyword and return its token type
    fn keyword_type(text: &str) -> Option<TokenType> {
        match text {
            "import" => Some(TokenType::KwImport),
            "as" => Some(TokenType::KwAs),
            "class" => Some(TokenType::KwClass),
            "function" => Some(TokenType::KwFunction),
            "resource" => Some(TokenType::KwResource),
            "remote" => Some(TokenType::KwRemote),
            "service" => Some(TokenType::KwService),
            "isolated" => Some(TokenType::KwIsolated),
            "client" => Some(TokenType::KwClient),
            "readonly" => Some(TokenType::KwReadonly),
            "distinct" => Some(TokenType::KwDistinct),
            "public" => Some(TokenType::KwPublic),
            "private" => Some(TokenType::KwPrivate),
            "final" => Some(TokenType::KwFinal),
            "returns" => Some(TokenType::KwReturns),
            _ => None,
        }
    }

    /// Scan a number literal (integer or float)
    fn number(&mut self) -> Token {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') && matches!(self.peek_next(), Some(c) if c.is_ascii_digit()) {
            self.advance();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
            return self.make_token(TokenType::FloatLiteral);
        }
        self.make_token(TokenType::IntLiteral)
    }

    fn string(&mut self) -> Token {
        loop {
            match self.peek() {
                None | Some('\n') => return self.error_unterminated_string(),
                Some('"') => {
                    self.advance();
                    return self.make_token(TokenType::StringLiteral);
                }
                Some('\\') => {
                    // Escape sequence - consume backslash and next char
                    self.advance();
                    if self.peek().is_some() {
                        self.advance();
                    }
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Backtick template; interpolations are kept inside the literal.
    fn template(&mut self) -> Token {
        loop {
            match self.peek() {
                None => return self.error_unterminated_string(),
                Some('`') => {
                    self.advance();
                    return self.make_token(TokenType::StringLiteral);
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }
}
