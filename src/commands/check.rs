// src/commands/check.rs

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::common::{PipelineError, check_source, read_stdin, render_pipeline_error, use_color};
use crate::cli::{ColorMode, STDIN_PATH, expand_paths};
use crate::config::Config;
use crate::errors::ConsoleRenderer;
use crate::interceptor::InterceptorServiceValidator;

/// Display name for source read from stdin
const STDIN_NAME: &str = "<stdin>";

/// Totals for one `check` run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl CheckSummary {
    pub fn is_clean(&self) -> bool {
        self.errors == 0
    }
}

/// Check interceptor services in the given files, directories or globs.
/// `-` reads a unit from stdin.
pub fn check_files(patterns: &[String], config: &Config, color_mode: ColorMode) -> ExitCode {
    let files = match expand_paths(patterns) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if files.is_empty() {
        eprintln!("error: no .bal files found");
        return ExitCode::FAILURE;
    }

    let validator = InterceptorServiceValidator::new(config.foundation_module());
    let color = use_color(color_mode);
    let stderr = io::stderr();
    let mut out = stderr.lock();

    match check_paths(&files, &validator, &mut out, color) {
        Ok(summary) if summary.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: could not write diagnostics: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Check each file in turn, rendering its diagnostics to `w`, then a summary
pub fn check_paths(
    files: &[PathBuf],
    validator: &InterceptorServiceValidator,
    w: &mut dyn Write,
    use_color: bool,
) -> io::Result<CheckSummary> {
    let mut summary = CheckSummary::default();

    for path in files {
        let (name, loaded) = load_source(path);
        let _span = tracing::info_span!("check_file", file = %name).entered();
        summary.files += 1;

        let result = loaded.and_then(|source| {
            check_source(&source, &name, validator).map_err(|err| (err, source))
        });
        match result {
            Ok(diagnostics) => {
                let mut renderer = ConsoleRenderer::new(&mut *w, use_color);
                for diag in &diagnostics {
                    renderer.render(diag)?;
                    if diag.is_error() {
                        summary.errors += 1;
                    } else {
                        summary.warnings += 1;
                    }
                }
            }
            Err((err, source)) => {
                summary.errors += err.error_count();
                render_pipeline_error(&err, &name, &source, w, use_color)?;
            }
        }
    }

    ConsoleRenderer::new(&mut *w, use_color).render_summary(summary.errors, summary.files)?;
    Ok(summary)
}

/// Read a file (or stdin for `-`), pairing it with the name diagnostics use
fn load_source(path: &Path) -> (String, Result<String, (PipelineError, String)>) {
    if path == Path::new(STDIN_PATH) {
        let source = read_stdin().map_err(|e| (PipelineError::Io(e), String::new()));
        return (STDIN_NAME.to_string(), source);
    }
    let name = path.to_string_lossy().to_string();
    let source = fs::read_to_string(path).map_err(|e| (PipelineError::Io(e), String::new()));
    (name, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID: &str = "import ballerina/http;\n\
        service class Logger {\n\
        \x20   *http:ResponseInterceptor;\n\
        \x20   remote function interceptResponse(http:RequestContext ctx) returns http:NextService|error? {\n\
        \x20       return ctx.next();\n\
        \x20   }\n\
        }\n";

    const INVALID: &str = "import ballerina/http;\n\
        service class Logger {\n\
        \x20   *http:ResponseInterceptor;\n\
        \x20   remote function intercept(http:RequestContext ctx) {\n\
        \x20   }\n\
        }\n";

    fn run(files: &[PathBuf]) -> (CheckSummary, String) {
        let mut out = Vec::new();
        let summary =
            check_paths(files, &InterceptorServiceValidator::default(), &mut out, false).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn clean_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logger.bal");
        fs::write(&path, VALID).unwrap();

        let (summary, output) = run(&[path]);
        assert!(summary.is_clean());
        assert_eq!(summary.files, 1);
        assert!(output.ends_with("0 errors in 1 file\n"), "got: {}", output);
    }

    #[test]
    fn violations_are_rendered_and_counted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logger.bal");
        fs::write(&path, INVALID).unwrap();

        let (summary, output) = run(&[path]);
        assert_eq!(summary.errors, 2);
        assert!(output.contains("error[HTTP_138]"));
        assert!(output.contains("error[HTTP_135]"));
        assert!(output.contains("logger.bal:4:5"));
        assert!(output.contains("2 errors in 1 file"));
    }

    #[test]
    fn unreadable_file_counts_as_error() {
        let dir = TempDir::new().unwrap();
        let (summary, output) = run(&[dir.path().join("missing.bal")]);
        assert_eq!(summary.errors, 1);
        assert!(output.contains("could not read"));
    }

    #[test]
    fn every_file_is_checked() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.bal");
        let bad = dir.path().join("bad.bal");
        fs::write(&good, VALID).unwrap();
        fs::write(&bad, "import ballerina/http;\nservice class A {").unwrap();

        let (summary, output) = run(&[bad, good]);
        assert_eq!(summary.files, 2);
        assert_eq!(summary.errors, 1);
        assert!(output.contains("E1002"));
    }
}
