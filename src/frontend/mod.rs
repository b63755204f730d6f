// src/frontend/mod.rs
pub mod ast;
pub mod lexer;
mod parse_decl;
mod parse_type;
pub mod parser;
pub mod span;
pub mod token;

pub use lexer::Lexer;
pub use parser::{ParseError, Parser};
pub use span::Span;
pub use token::{Token, TokenType};
