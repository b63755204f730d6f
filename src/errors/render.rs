// src/errors/render.rs
//! Console rendering for diagnostics with ANSI color support.

use super::codes::Severity;
use super::diagnostic::Diagnostic;
use std::io::Write;

/// ANSI color codes
struct Colors {
    use_color: bool,
}

impl Colors {
    fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn bold_red(&self) -> &'static str {
        if self.use_color { "\x1b[1;31m" } else { "" }
    }

    fn bold_yellow(&self) -> &'static str {
        if self.use_color { "\x1b[1;33m" } else { "" }
    }

    fn cyan(&self) -> &'static str {
        if self.use_color { "\x1b[36m" } else { "" }
    }

    fn green(&self) -> &'static str {
        if self.use_color { "\x1b[32m" } else { "" }
    }

    fn reset(&self) -> &'static str {
        if self.use_color { "\x1b[0m" } else { "" }
    }
}

/// Console renderer for diagnostics
pub struct ConsoleRenderer<W: Write> {
    writer: W,
    colors: Colors,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(writer: W, use_color: bool) -> Self {
        Self {
            writer,
            colors: Colors::new(use_color),
        }
    }

    /// Render a single diagnostic
    pub fn render(&mut self, diag: &Diagnostic) -> std::io::Result<()> {
        self.render_header(diag)?;
        self.render_location(diag)?;
        if let Some(ref line) = diag.source_line {
            self.render_snippet(diag, line)?;
        }
        if let Some(hint) = diag.info.hint {
            self.render_hint(hint)?;
        }
        writeln!(self.writer)
    }

    /// Render a one-line summary such as `2 errors in 1 file`
    pub fn render_summary(&mut self, errors: usize, files: usize) -> std::io::Result<()> {
        let style = if errors > 0 {
            self.colors.bold_red()
        } else {
            self.colors.green()
        };
        writeln!(
            self.writer,
            "{}{} error{} in {} file{}{}",
            style,
            errors,
            if errors == 1 { "" } else { "s" },
            files,
            if files == 1 { "" } else { "s" },
            self.colors.reset()
        )
    }

    fn render_header(&mut self, diag: &Diagnostic) -> std::io::Result<()> {
        let style = self.severity_style(diag.severity());
        let severity_name = match diag.severity() {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        };
        writeln!(
            self.writer,
            "{}{}{}[{}]: {}",
            style,
            severity_name,
            self.colors.reset(),
            diag.code_string(),
            diag.formatted_message
        )
    }

    fn render_location(&mut self, diag: &Diagnostic) -> std::io::Result<()> {
        writeln!(
            self.writer,
            "  {}-->{} {}:{}:{}",
            self.colors.cyan(),
            self.colors.reset(),
            diag.file,
            diag.span.line,
            diag.span.column
        )
    }

    fn render_snippet(&mut self, diag: &Diagnostic, source_line: &str) -> std::io::Result<()> {
        let width = count_digits(diag.span.line) as usize;

        self.render_pipe(width)?;
        writeln!(self.writer)?;

        writeln!(
            self.writer,
            "{}{}{} | {}",
            self.colors.cyan(),
            diag.span.line,
            self.colors.reset(),
            source_line
        )?;

        self.render_pipe(width)?;
        write!(self.writer, " ")?;

        let padding = diag.span.column.saturating_sub(1) as usize;
        // Multi-line spans get a single caret at the start
        let carets = if diag.span.is_multiline() {
            1
        } else {
            (diag.span.end_column.saturating_sub(diag.span.column) as usize).max(1)
        };
        writeln!(
            self.writer,
            "{}{}{}{}",
            " ".repeat(padding),
            self.severity_style(diag.severity()),
            "^".repeat(carets),
            self.colors.reset()
        )
    }

    fn render_pipe(&mut self, width: usize) -> std::io::Result<()> {
        write!(
            self.writer,
            "{}{} |{}",
            self.colors.cyan(),
            " ".repeat(width),
            self.colors.reset()
        )
    }

    fn render_hint(&mut self, hint: &str) -> std::io::Result<()> {
        writeln!(
            self.writer,
            "  {}= help:{} {}",
            self.colors.green(),
            self.colors.reset(),
            hint
        )
    }

    fn severity_style(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::Error => self.colors.bold_red(),
            Severity::Warning => self.colors.bold_yellow(),
            Severity::Note => self.colors.cyan(),
        }
    }
}

fn count_digits(n: u32) -> u32 {
    if n == 0 {
        return 1;
    }
    let mut count = 0;
    let mut num = n;
    while num > 0 {
        count += 1;
        num /= 10;
    }
    count
}
