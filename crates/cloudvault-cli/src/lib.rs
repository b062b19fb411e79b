//! # cloudvault-cli
//!
//! Command definitions, prompts and table/JSON output for the `cloudvault`
//! binary. Every command runs against an [`AppConfig`] loaded by the binary.
//!
//! [`AppConfig`]: cloudvault_core::config::AppConfig

pub mod commands;
pub mod output;

pub use commands::Cli;
pub use output::OutputFormat;
