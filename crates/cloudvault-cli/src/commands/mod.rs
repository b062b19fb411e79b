//! CLI command definitions and dispatch.

pub mod auth;
pub mod config;
pub mod prompt;
pub mod public;
pub mod shares;
pub mod upload;

use clap::{Parser, Subcommand};

use cloudvault_core::config::AppConfig;
use cloudvault_core::error::AppError;

use crate::output::{self, OutputFormat};

/// CloudVault: share files through expiring, optionally password-protected links
#[derive(Debug, Parser)]
#[command(name = "cloudvault", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (loads config/<env>.toml over config/default.toml)
    #[arg(long, global = true, env = "CLOUDVAULT_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login(auth::LoginArgs),
    /// Sign out and forget the stored session
    Logout,
    /// Show the current session
    Whoami,
    /// Change the password of the signed-in user
    ChangePassword,
    /// Upload files as a new share
    Upload(upload::UploadArgs),
    /// Manage your shares
    Shares(shares::SharesArgs),
    /// Open a public share link
    Open(public::OpenArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let result = match &self.command {
            Commands::Login(args) => auth::login(args, config).await,
            Commands::Logout => auth::logout(config).await,
            Commands::Whoami => auth::whoami(config, self.format).await,
            Commands::ChangePassword => auth::change_password(config).await,
            Commands::Upload(args) => upload::execute(args, config, self.format).await,
            Commands::Shares(args) => shares::execute(args, config, self.format).await,
            Commands::Open(args) => public::execute(args, config, self.format).await,
            Commands::Config(args) => config::execute(args, config, &self.env, self.format),
        };

        if let Err(e) = &result {
            if e.is_token_expired() {
                output::print_warning(
                    "Your session has expired. Run `cloudvault login` to sign in again.",
                );
            }
        }
        result
    }
}
