// src/cli/mod.rs
pub mod args;
pub mod paths;

pub use args::{Cli, ColorMode, Commands};
pub use paths::{PathError, STDIN_PATH, expand_paths, has_bal_extension};
