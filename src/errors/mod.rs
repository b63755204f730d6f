// src/errors/mod.rs
//! Structured error reporting.
//!
//! Front-end failures are miette enums; semantic and interceptor findings are
//! catalog-driven [`Diagnostic`] values.

pub mod codes;
pub mod diagnostic;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod report;

pub use codes::{ErrorInfo, Severity};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticSink};
pub use lexer::LexerError;
pub use parser::ParserError;
pub use render::ConsoleRenderer;
pub use report::render_with_source;
