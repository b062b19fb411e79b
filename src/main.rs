//! CloudVault command-line client.
//!
//! Entry point that loads configuration, sets up logging and dispatches
//! the parsed command.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use cloudvault_cli::Cli;
use cloudvault_cli::output;
use cloudvault_core::config::AppConfig;
use cloudvault_core::error::AppError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli.env) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(&cli, &config).await {
        tracing::debug!(kind = %e.kind, status = ?e.status, "Command failed");
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Load configuration for the selected environment
fn load_configuration(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Initialize tracing/logging
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Run the parsed command
async fn run(cli: &Cli, config: &AppConfig) -> Result<(), AppError> {
    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        api = %config.api.base_url,
        "Starting CloudVault client"
    );
    cli.execute(config).await
}
