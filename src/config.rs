// src/config.rs
//
// Optional `interlint.toml`, found by walking up from the working directory.
//
//     [http]
//     module = "ballerina/http"
//
//     [output]
//     color = "auto"

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use crate::cli::ColorMode;
use crate::sema::FoundationModule;

pub const CONFIG_FILE: &str = "interlint.toml";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config '{}'", path.display())]
    #[diagnostic(code(C0001))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{}'", path.display())]
    #[diagnostic(code(C0002), help("expected [http] module = \"org/name\" and [output] color = \"auto|always|never\""))]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config '{}': http.module must not be empty", path.display())]
    #[diagnostic(code(C0003))]
    EmptyModule { path: PathBuf },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub http: HttpConfig,
    pub output: OutputConfig,
    /// File the settings came from, `None` for built-in defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Module path of the http module, `org/name` or just `name`
    pub module: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            module: FoundationModule::default().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub color: ColorMode,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content, path)?;
        config.source = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), module = %config.http.module, "loaded config");
        Ok(config)
    }

    /// Nearest `interlint.toml` in `dir` or its ancestors, or defaults
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        match dir
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_FILE))
            .find(|candidate| candidate.is_file())
        {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// `path` is only used to label errors
    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.http.module.trim().is_empty() {
            return Err(ConfigError::EmptyModule {
                path: path.to_path_buf(),
            });
        }
        Ok(config)
    }

    pub fn foundation_module(&self) -> FoundationModule {
        FoundationModule::parse(&self.http.module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(content: &str) -> Result<Config, ConfigError> {
        Config::parse(content, Path::new(CONFIG_FILE))
    }

    #[test]
    fn defaults_target_ballerina_http() {
        let config = Config::default();
        assert_eq!(config.http.module, "ballerina/http");
        assert_eq!(config.output.color, ColorMode::Auto);
        assert_eq!(config.foundation_module().name(), "http");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse("[output]\ncolor = \"never\"\n").unwrap();
        assert_eq!(config.output.color, ColorMode::Never);
        assert_eq!(config.http.module, "ballerina/http");
    }

    #[test]
    fn custom_module() {
        let config = parse("[http]\nmodule = \"acme/web\"\n").unwrap();
        let foundation = config.foundation_module();
        assert_eq!(foundation.name(), "web");
        assert_eq!(foundation.org.as_deref(), Some("acme"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse("[http]\nmodul = \"x\"\n").is_err());
        assert!(parse("verbose = true\n").is_err());
    }

    #[test]
    fn empty_module_is_rejected() {
        let err = parse("[http]\nmodule = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyModule { .. }));
    }

    #[test]
    fn discover_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[http]\nmodule = \"acme/web\"\n",
        )
        .unwrap();
        let nested = dir.path().join("services/auth");
        fs::create_dir_all(&nested).unwrap();

        let config = Config::discover(&nested).unwrap();
        assert_eq!(config.http.module, "acme/web");
        assert_eq!(config.source, Some(dir.path().join(CONFIG_FILE)));
    }

    #[test]
    fn discover_without_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert!(config.source.is_none());
        assert_eq!(config.http.module, "ballerina/http");
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[http\n").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("interlint.toml"));
    }

    #[test]
    fn parse_errors_keep_the_toml_error_as_source() {
        let err = parse("[output]\ncolor = \"sometimes\"\n").unwrap_err();
        let source = std::error::Error::source(&err)
            .and_then(|source| source.downcast_ref::<toml::de::Error>())
            .expect("toml error as source");
        assert!(source.span().is_some());
        assert!(source.message().contains("sometimes"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
