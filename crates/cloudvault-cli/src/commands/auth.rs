//! Session commands: login, logout, whoami, change-password.

use clap::Args;
use serde::Serialize;

use cloudvault_core::config::AppConfig;
use cloudvault_core::error::AppError;
use cloudvault_service::routing::{self, Route, Screen};
use cloudvault_service::{AppContext, auth};

use super::prompt;
use crate::output::{self, OutputFormat};

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (will prompt if not provided)
    #[arg(short, long)]
    pub username: Option<String>,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Session summary for `whoami`
#[derive(Debug, Serialize)]
struct WhoAmI {
    authenticated: bool,
    username: Option<String>,
    must_change_password: bool,
    screen: &'static str,
}

/// Sign in
pub async fn login(args: &LoginArgs, config: &AppConfig) -> Result<(), AppError> {
    let mut ctx = AppContext::from_config(config).await?;

    let username = prompt::text_or_prompt(args.username.as_deref(), "Username")?;
    let password = prompt::password_or_prompt(args.password.as_deref(), "Password")?;

    auth::login(&mut ctx, &username, &password).await?;

    output::print_success(&format!("Logged in as '{}'", username.trim()));
    if ctx.session.must_change_password() {
        output::print_warning(
            "You must change your password before continuing. Run `cloudvault change-password`.",
        );
    }
    Ok(())
}

/// Sign out
pub async fn logout(config: &AppConfig) -> Result<(), AppError> {
    let mut ctx = AppContext::from_config(config).await?;
    if !ctx.session.is_authenticated() {
        output::print_warning("Not logged in");
        return Ok(());
    }
    auth::logout(&mut ctx).await?;
    output::print_success("Logged out");
    Ok(())
}

/// Show who is signed in and which screen the home route resolves to
pub async fn whoami(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let ctx = AppContext::from_config(config).await?;
    let session = ctx.session.session();

    let info = WhoAmI {
        authenticated: session.is_authenticated(),
        username: session.user().map(|u| u.username.clone()),
        must_change_password: session.must_change_password(),
        screen: match routing::screen_for(&Route::Home, session) {
            Screen::Login => "login",
            Screen::ChangePassword => "change-password",
            Screen::Dashboard => "dashboard",
            Screen::PublicShare(_) => "public-share",
        },
    };

    match format {
        OutputFormat::Json => output::print_json(&info),
        OutputFormat::Table => {
            output::print_kv("Logged in", output::yes_no(info.authenticated));
            output::print_kv("Username", info.username.as_deref().unwrap_or("-"));
            output::print_kv(
                "Must change password",
                output::yes_no(info.must_change_password),
            );
            output::print_kv("Screen", info.screen);
        }
    }
    Ok(())
}

/// Change the password of the signed-in user
pub async fn change_password(config: &AppConfig) -> Result<(), AppError> {
    let mut ctx = AppContext::from_config(config).await?;
    ctx.session.require_token()?;

    let new_password = prompt::password("New password")?;
    let confirm_password = prompt::password("Confirm new password")?;

    auth::change_password(&mut ctx, &new_password, &confirm_password).await?;

    output::print_success("Password changed successfully");
    Ok(())
}
