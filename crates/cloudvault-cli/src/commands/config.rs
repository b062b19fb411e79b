//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use cloudvault_core::config::AppConfig;
use cloudvault_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Check that the configuration loads and validates
    Validate,
}

/// Execute config commands
///
/// The binary has already loaded and validated `config` by the time this
/// runs, so `validate` only reports what was resolved.
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_json(config),
            OutputFormat::Table => {
                output::print_kv("Environment", env);
                output::print_kv("API base URL", &config.api.base_url);
                output::print_kv("Public base URL", config.api.public_base());
                output::print_kv(
                    "Request timeout",
                    &format!("{}s", config.api.request_timeout_seconds),
                );
                output::print_kv("User agent", &config.api.user_agent);
                output::print_kv("Session store", &config.session.store_path);
                output::print_kv("Persist session", output::yes_no(config.session.persist));
                output::print_kv("Log level", &config.logging.level);
                output::print_kv("Log format", &config.logging.format);
            }
        },
        ConfigCommand::Validate => {
            output::print_success(&format!("Configuration for '{env}' is valid"));
            println!("  API: {}", config.api.base_url);
            println!("  Session store: {}", config.session.store_path);
        }
    }

    Ok(())
}
