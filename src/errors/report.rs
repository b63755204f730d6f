// src/errors/report.rs
//! Rendering utilities for miette diagnostics (lexer and parser errors).

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, NamedSource, ThemeCharacters, ThemeStyles};

/// Create a handler for terminal output (unicode + colors).
pub fn terminal_handler() -> GraphicalReportHandler {
    let theme = GraphicalTheme {
        characters: ThemeCharacters::unicode(),
        styles: ThemeStyles::ansi(),
    };
    GraphicalReportHandler::new_themed(theme)
}

/// Create a handler for plain output (ascii + no colors).
pub fn plain_handler() -> GraphicalReportHandler {
    let theme = GraphicalTheme {
        characters: ThemeCharacters::ascii(),
        styles: ThemeStyles::none(),
    };
    GraphicalReportHandler::new_themed(theme)
}

/// Render a front-end error against its source file.
pub fn render_with_source<E>(error: E, file: &str, source: &str, use_color: bool) -> String
where
    E: Diagnostic + Send + Sync + 'static,
{
    let report = miette::Report::new(error)
        .with_source_code(NamedSource::new(file, source.to_string()));
    let handler = if use_color {
        terminal_handler()
    } else {
        plain_handler()
    };
    let mut output = String::new();
    if let Err(error) = handler.render_report(&mut output, report.as_ref()) {
        tracing::warn!(%error, "failed to render report");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{LexerError, ParserError};

    #[test]
    fn render_lexer_error_to_string() {
        let err = LexerError::UnexpectedCharacter {
            ch: '$',
            span: (0, 1).into(),
        };
        let output = render_with_source(err, "svc.bal", "$", false);
        assert!(output.contains("E0001"), "should contain error code");
        assert!(output.contains("unexpected character"), "should contain message");
        assert!(output.contains("svc.bal"), "should name the file");
    }

    #[test]
    fn render_with_help() {
        let err = ParserError::UnterminatedBlock { span: (0, 1).into() };
        let output = render_with_source(err, "svc.bal", "{", false);
        assert!(output.contains("E1007"), "should contain error code");
        assert!(output.contains("help"), "should contain help text");
    }
}
