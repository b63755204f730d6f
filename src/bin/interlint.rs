// src/bin/interlint.rs

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ColorChoice, CommandFactory, FromArgMatches};
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::FormatTime;

use interlint::Config;
use interlint::cli::{Cli, Commands};
use interlint::commands::check::check_files;
use interlint::commands::codes::print_codes;
use interlint::commands::version::print_version;

/// A timer that outputs nothing but still enables span timing calculation
struct NoTimestamp;

impl FormatTime for NoTimestamp {
    fn format_time(
        &self,
        _w: &mut tracing_subscriber::fmt::format::Writer<'_>,
    ) -> std::fmt::Result {
        Ok(())
    }
}

fn main() -> ExitCode {
    init_tracing();

    let styles = Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Cyan.on_default());

    let matches = Cli::command()
        .styles(styles)
        .color(color_choice_from_args())
        .get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    let loaded = match &cli.config {
        Some(path) => Config::load(path),
        None => std::env::current_dir()
            .map_err(|source| interlint::config::ConfigError::Io {
                path: ".".into(),
                source,
            })
            .and_then(|dir| Config::discover(&dir)),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            return ExitCode::FAILURE;
        }
    };
    let color = cli.color.unwrap_or(config.output.color);

    match cli.command {
        Commands::Check { paths } => check_files(&paths, &config, color),
        Commands::Codes { code } => print_codes(code.as_deref()),
        Commands::Version => print_version(&config),
    }
}

/// INTERLINT_LOG takes an EnvFilter directive; INTERLINT_LOG_STYLE=full adds
/// timestamps
fn init_tracing() {
    let Ok(filter) = EnvFilter::try_from_env("INTERLINT_LOG") else {
        return;
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    if std::env::var("INTERLINT_LOG_STYLE").is_ok_and(|style| style == "full") {
        builder.init();
    } else {
        builder.with_timer(NoTimestamp).init();
    }
    tracing::debug!("tracing initialized");
}

/// Pre-scan `--color` so clap's own help and errors respect it
fn color_choice_from_args() -> ColorChoice {
    let args: Vec<String> = std::env::args().collect();
    for (i, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix("--color=") {
            return parse_color_choice(value);
        }
        if arg == "--color"
            && let Some(value) = args.get(i + 1)
        {
            return parse_color_choice(value);
        }
    }
    if std::io::stdout().is_terminal() {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    }
}

fn parse_color_choice(value: &str) -> ColorChoice {
    match value.to_ascii_lowercase().as_str() {
        "always" => ColorChoice::Always,
        "never" => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
