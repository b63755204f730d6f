// src/commands/codes.rs

use std::io::{self, Write};
use std::process::ExitCode;

use crate::errors::codes::{CATALOG, ErrorInfo, Severity, lookup};

/// Print the diagnostic catalog, or one entry of it
pub fn print_codes(code: Option<&str>) -> ExitCode {
    let entries: Vec<&ErrorInfo> = match code {
        Some(code) => match lookup(&code.to_ascii_uppercase()) {
            Some(info) => vec![info],
            None => {
                eprintln!("error: unknown diagnostic code '{}'", code);
                return ExitCode::FAILURE;
            }
        },
        None => CATALOG.to_vec(),
    };

    let stdout = io::stdout();
    match write_codes(&mut stdout.lock(), &entries) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn write_codes(w: &mut dyn Write, entries: &[&ErrorInfo]) -> io::Result<()> {
    let width = entries.iter().map(|info| info.code.len()).max().unwrap_or(0);
    for info in entries {
        let severity = match info.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        };
        writeln!(w, "{:width$}  {:7}  {}", info.code, severity, info.message)?;
        if let Some(hint) = info.hint {
            writeln!(w, "{:width$}  {:7}  help: {}", "", "", hint)?;
        }
    }
    Ok(())
}
