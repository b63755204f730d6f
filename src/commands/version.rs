// src/commands/version.rs

use std::process::ExitCode;
use std::sync::OnceLock;

use crate::config::Config;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const GIT_SHA: &str = env!("VERGEN_GIT_SHA");
const GIT_DIRTY: &str = env!("VERGEN_GIT_DIRTY");
const DEBUG: &str = env!("VERGEN_CARGO_DEBUG");
const TARGET_TRIPLE: &str = env!("VERGEN_CARGO_TARGET_TRIPLE");
const BUILD_DATE: &str = env!("VERGEN_BUILD_DATE");

fn simplify_target(target: &str) -> String {
    target
        .replace("unknown-", "")
        .replace("-gnu", "")
        .replace("-musl", "")
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

/// `0.3.0 (abc1234 release linux-x86_64, built 2026-10-01)`; dev builds
/// mark a dirty tree with `+`
fn make_version_string() -> String {
    let sha = short_sha(GIT_SHA);
    let target = simplify_target(TARGET_TRIPLE);
    let dirty = if GIT_DIRTY == "true" { "+" } else { "" };
    let profile = if DEBUG == "true" { "debug" } else { "release" };
    format!("{VERSION} ({sha}{dirty} {profile} {target}, built {BUILD_DATE})")
}

pub fn version_string() -> &'static str {
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(make_version_string)
}

pub fn print_version(config: &Config) -> ExitCode {
    println!("interlint {}", version_string());
    println!("http module: {}", config.foundation_module());
    match &config.source {
        Some(path) => println!("config: {}", path.display()),
        None => println!("config: defaults"),
    }
    ExitCode::SUCCESS
}
