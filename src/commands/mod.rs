// src/commands/mod.rs
pub mod check;
pub mod codes;
pub mod common;
pub mod version;
