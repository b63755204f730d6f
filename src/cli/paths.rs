// src/cli/paths.rs
//
// Turns the command line's path arguments into the list of .bal files to check.

use std::path::{Path, PathBuf};

use glob::glob;
use rustc_hash::FxHashSet;
use thiserror::Error;

/// Argument naming standard input
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Error)]
pub enum PathError {
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Expand files, directories (recursively, `**/*.bal`) and glob patterns.
///
/// Explicit files keep their command-line order and come first; directory
/// and glob matches follow in sorted order. A file reached twice is listed
/// once. `-` is passed through as-is. Explicitly named files without a
/// `.bal` extension are skipped, and an empty result is not an error.
pub fn expand_paths(patterns: &[String]) -> Result<Vec<PathBuf>, PathError> {
    let mut explicit = Vec::new();
    let mut matched = Vec::new();
    let mut seen = FxHashSet::default();

    for pattern in patterns {
        if pattern == STDIN_PATH {
            add_unique(PathBuf::from(STDIN_PATH), &mut explicit, &mut seen);
            continue;
        }

        let path = PathBuf::from(pattern);
        if path.is_file() {
            if has_bal_extension(&path) {
                add_unique(path, &mut explicit, &mut seen);
            } else {
                tracing::debug!(path = %path.display(), "skipping non-.bal file");
            }
        } else if path.is_dir() {
            let dir_pattern = format!("{}/**/*.bal", pattern.trim_end_matches('/'));
            expand_glob(&dir_pattern, &mut matched, &mut seen)?;
        } else {
            expand_glob(pattern, &mut matched, &mut seen)?;
        }
    }

    matched.sort();
    explicit.extend(matched);
    Ok(explicit)
}

fn expand_glob(
    pattern: &str,
    files: &mut Vec<PathBuf>,
    seen: &mut FxHashSet<PathBuf>,
) -> Result<(), PathError> {
    let entries = glob(pattern).map_err(|e| PathError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;

    for entry in entries {
        let path = entry.map_err(|e| PathError::Io {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if path.is_file() && has_bal_extension(&path) {
            add_unique(path, files, seen);
        }
    }
    Ok(())
}

/// Dedup on the canonical path so `./a.bal` and `a.bal` count once
fn add_unique(path: PathBuf, files: &mut Vec<PathBuf>, seen: &mut FxHashSet<PathBuf>) {
    let key = path.canonicalize().unwrap_or_else(|_| path.clone());
    if seen.insert(key) {
        files.push(path);
    }
}

pub fn has_bal_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "bal")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "import ballerina/http;\n").unwrap();
        path
    }

    fn arg(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    #[test]
    fn single_file() {
        let dir = TempDir::new().unwrap();
        let file = create_file(dir.path(), "svc.bal");

        let files = expand_paths(&[arg(&file)]).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn directory_is_recursive_and_filtered() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "a.bal");
        create_file(dir.path(), "interceptors/b.bal");
        create_file(dir.path(), "interceptors/deep/c.bal");
        create_file(dir.path(), "Ballerina.toml");

        let files = expand_paths(&[arg(dir.path())]).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| has_bal_extension(f)));
    }

    #[test]
    fn glob_matches_are_sorted() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "z.bal");
        create_file(dir.path(), "a.bal");
        create_file(dir.path(), "m.bal");

        let files = expand_paths(&[format!("{}/*.bal", dir.path().display())]).unwrap();
        let names: Vec<_> = files.iter().map(|p| p.file_name().unwrap()).collect();
        assert_eq!(names, vec!["a.bal", "m.bal", "z.bal"]);
    }

    #[test]
    fn explicit_files_come_first_and_dedup() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "a.bal");
        let explicit = create_file(dir.path(), "z.bal");

        let files = expand_paths(&[arg(&explicit), arg(dir.path()), arg(&explicit)]).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], explicit);
    }

    #[test]
    fn stdin_passes_through() {
        let files = expand_paths(&[STDIN_PATH.to_string()]).unwrap();
        assert_eq!(files, vec![PathBuf::from("-")]);
    }

    #[test]
    fn non_bal_file_skipped() {
        let dir = TempDir::new().unwrap();
        let file = create_file(dir.path(), "notes.txt");
        assert!(expand_paths(&[arg(&file)]).unwrap().is_empty());
    }

    #[test]
    fn invalid_glob_pattern() {
        let result = expand_paths(&["[invalid".to_string()]);
        assert!(matches!(result, Err(PathError::InvalidPattern { .. })));
    }
}
