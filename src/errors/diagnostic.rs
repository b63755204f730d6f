// src/errors/diagnostic.rs
//! Diagnostic types for structured error reporting.

use super::codes::{ErrorInfo, Severity};
use crate::frontend::Span;

/// A structured diagnostic with location, message and the substitution
/// arguments it was formatted from
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub info: &'static ErrorInfo,
    pub span: Span,
    pub file: String,
    pub formatted_message: String,
    pub args: Vec<String>,
    pub source_line: Option<String>,
}

impl Diagnostic {
    /// Get severity from the error info
    pub fn severity(&self) -> Severity {
        self.info.severity
    }

    /// Get error code
    pub fn code(&self) -> &'static str {
        self.info.code
    }

    pub fn code_string(&self) -> String {
        self.info.code_string()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

/// Destination for reported diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);

    fn report_all(&mut self, diagnostics: Vec<Diagnostic>) {
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }

    fn report_all(&mut self, diagnostics: Vec<Diagnostic>) {
        self.extend(diagnostics);
    }
}

/// Extract a line from source by line number (1-indexed)
pub fn get_line_from_source(source: &str, line_number: u32) -> Option<String> {
    if line_number == 0 {
        return None;
    }
    source
        .lines()
        .nth((line_number - 1) as usize)
        .map(|s| s.to_string())
}

/// Builder for creating diagnostics with source context
#[derive(Debug, Clone)]
pub struct DiagnosticBuilder {
    file: String,
    source: String,
}

impl DiagnosticBuilder {
    pub fn new(file: &str, source: &str) -> Self {
        Self {
            file: file.to_string(),
            source: source.to_string(),
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Get a specific line from source (1-indexed)
    pub fn get_line(&self, line: u32) -> Option<String> {
        get_line_from_source(&self.source, line)
    }

    /// Create a diagnostic by substituting `args` into the catalog template
    pub fn emit(&self, info: &'static ErrorInfo, span: Span, args: &[&str]) -> Diagnostic {
        Diagnostic {
            info,
            span,
            file: self.file.clone(),
            formatted_message: info.format(args),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            source_line: self.get_line(span.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::codes::{HTTP_135, SEMA_UNKNOWN_TYPE};

    #[test]
    fn get_line_from_source_works() {
        let source = "line one\nline two\nline three";
        assert_eq!(
            get_line_from_source(source, 1),
            Some("line one".to_string())
        );
        assert_eq!(
            get_line_from_source(source, 3),
            Some("line three".to_string())
        );
        assert_eq!(get_line_from_source(source, 4), None);
        assert_eq!(get_line_from_source(source, 0), None);
    }

    #[test]
    fn builder_creates_diagnostic_with_context() {
        let builder = DiagnosticBuilder::new("svc.bal", "import ballerina/http;\nhttp:Foo f;");
        let diag = builder.emit(&SEMA_UNKNOWN_TYPE, Span::new(23, 31, 2, 1), &["http:Foo"]);

        assert_eq!(diag.code(), "E2002");
        assert_eq!(diag.file, "svc.bal");
        assert_eq!(diag.source_line, Some("http:Foo f;".to_string()));
        assert!(diag.is_error());
    }

    #[test]
    fn emit_formats_template_and_keeps_args() {
        let builder = DiagnosticBuilder::new("svc.bal", "service class A {}");
        let diag = builder.emit(
            &HTTP_135,
            Span::new(0, 18, 1, 1),
            &["ResponseInterceptor", "interceptResponse"],
        );
        assert_eq!(
            diag.formatted_message,
            "missing remote function in 'ResponseInterceptor': expected remote function 'interceptResponse'"
        );
        assert_eq!(diag.args, vec!["ResponseInterceptor", "interceptResponse"]);
    }

    #[test]
    fn vec_sink_preserves_order() {
        let builder = DiagnosticBuilder::new("svc.bal", "");
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(builder.emit(&HTTP_135, Span::default(), &["a", "b"]));
        sink.report_all(vec![builder.emit(&SEMA_UNKNOWN_TYPE, Span::default(), &["c"])]);
        let codes: Vec<_> = sink.iter().map(Diagnostic::code).collect();
        assert_eq!(codes, vec!["HTTP_135", "E2002"]);
    }
}
