// src/lib.rs
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod frontend;
pub mod interceptor;
pub mod sema;

pub use config::Config;
pub use interceptor::InterceptorServiceValidator;
