// src/commands/common.rs
//! Shared pipeline for CLI commands: parse, analyze, validate.

use std::io::{self, IsTerminal, Read, Write};

use crate::cli::ColorMode;
use crate::errors::{Diagnostic, DiagnosticBuilder, LexerError, render_with_source};
use crate::frontend::{ParseError, Parser};
use crate::interceptor::{ClassContext, InterceptorServiceValidator};
use crate::sema::{Analyzer, SemanticQuery};

/// Failures that stop a file before any interceptor check runs
#[derive(Debug)]
pub enum PipelineError {
    /// Lexer encountered invalid characters
    Lex(Vec<LexerError>),
    /// Parser encountered a syntax error
    Parse(ParseError),
    /// File or stdin could not be read
    Io(io::Error),
}

impl PipelineError {
    /// Number of errors this failure renders as
    pub fn error_count(&self) -> usize {
        match self {
            PipelineError::Lex(errors) => errors.len(),
            PipelineError::Parse(_) | PipelineError::Io(_) => 1,
        }
    }
}

/// Run one unit through the pipeline.
///
/// Returns the analyzer's diagnostics followed by every class's interceptor
/// diagnostics, in declaration order. When the analyzer reported errors the
/// validator stays silent, so only the upstream diagnostics come back.
pub fn check_source(
    source: &str,
    file_path: &str,
    validator: &InterceptorServiceValidator,
) -> Result<Vec<Diagnostic>, PipelineError> {
    let mut parser = Parser::new(source);
    let parsed = parser.parse_program();
    let lex_errors = parser.take_lexer_errors();
    if !lex_errors.is_empty() {
        return Err(PipelineError::Lex(lex_errors));
    }
    let program = parsed.map_err(PipelineError::Parse)?;

    let builder = DiagnosticBuilder::new(file_path, source);
    let model = Analyzer::new(&builder, validator.foundation()).analyze(&program);

    let mut diagnostics = model.diagnostics().to_vec();
    for class in &program.classes {
        let ctx = ClassContext {
            class,
            query: &model,
            builder: &builder,
        };
        validator.validate(&ctx, &mut diagnostics);
    }
    tracing::debug!(
        file = file_path,
        classes = program.classes.len(),
        diagnostics = diagnostics.len(),
        "checked"
    );
    Ok(diagnostics)
}

/// Render a pipeline failure with source context
pub fn render_pipeline_error(
    err: &PipelineError,
    file_path: &str,
    source: &str,
    w: &mut dyn Write,
    use_color: bool,
) -> io::Result<()> {
    match err {
        PipelineError::Lex(errors) => {
            for e in errors {
                write!(w, "{}", render_with_source(e.clone(), file_path, source, use_color))?;
            }
        }
        PipelineError::Parse(e) => {
            write!(
                w,
                "{}",
                render_with_source(e.error.clone(), file_path, source, use_color)
            )?;
        }
        PipelineError::Io(e) => writeln!(w, "error: could not read '{}': {}", file_path, e)?,
    }
    Ok(())
}

/// Resolve `auto` against whether stderr is a terminal
pub fn use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal(),
    }
}

pub fn read_stdin() -> io::Result<String> {
    let mut source = String::new();
    io::stdin().read_to_string(&mut source)?;
    Ok(source)
}
