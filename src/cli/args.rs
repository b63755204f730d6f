// src/cli/args.rs

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

use crate::commands::version::version_string;

/// Color output mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Auto-detect based on terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Checks Ballerina interceptor service classes against the http
/// interceptor contract
#[derive(Parser)]
#[command(name = "interlint")]
#[command(version = version_string())]
#[command(about = "Interceptor service linter", long_about = None)]
pub struct Cli {
    /// Color output: auto, always, never (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorMode>,

    /// Config file to use instead of the nearest interlint.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check interceptor services in .bal files
    #[command(visible_alias = "c")]
    Check {
        /// Paths to check (files, directories, glob patterns, or - for stdin)
        #[arg(value_name = "PATHS", required = true)]
        paths: Vec<String>,
    },
    /// List diagnostic codes with their message templates
    Codes {
        /// Show only this code, e.g. HTTP_135
        #[arg(value_name = "CODE")]
        code: Option<String>,
    },
    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_takes_paths_and_global_flags() {
        let cli = Cli::try_parse_from([
            "interlint",
            "check",
            "svc.bal",
            "interceptors/",
            "--color",
            "never",
        ])
        .unwrap();
        assert_eq!(cli.color, Some(ColorMode::Never));
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Check { paths } => assert_eq!(paths, vec!["svc.bal", "interceptors/"]),
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn codes_takes_an_optional_code() {
        let cli = Cli::try_parse_from(["interlint", "codes", "HTTP_135"]).unwrap();
        assert!(matches!(cli.command, Commands::Codes { code: Some(ref c) } if c == "HTTP_135"));
        let cli = Cli::try_parse_from(["interlint", "codes"]).unwrap();
        assert!(matches!(cli.command, Commands::Codes { code: None }));
    }

    #[test]
    fn check_requires_a_path() {
        assert!(Cli::try_parse_from(["interlint", "check"]).is_err());
    }

    #[test]
    fn color_mode_reads_lowercase_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            color: ColorMode,
        }
        let parsed: Wrapper = toml::from_str("color = \"always\"").unwrap();
        assert_eq!(parsed.color, ColorMode::Always);
    }
}
