//! Public share links: open, unlock, download.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use cloudvault_client::ApiClient;
use cloudvault_core::config::AppConfig;
use cloudvault_core::error::{AppError, ErrorKind};
use cloudvault_service::public::{PublicShareFlow, UnlockState, parse_share_reference};

use super::prompt;
use crate::output::{self, OutputFormat};

/// Interactive unlock attempts before giving up.
const MAX_PROMPT_ATTEMPTS: usize = 3;

/// Arguments for `open`
#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Share link (`.../share/<id>`, `.../download/<id>`) or bare share id
    pub link: String,
    /// Password for a protected share (will prompt if needed and not provided)
    #[arg(short, long)]
    pub password: Option<String>,
    /// Download every file into this directory
    #[arg(short, long)]
    pub download: Option<PathBuf>,
}

/// Public file row for table output
#[derive(Debug, Serialize, Tabled)]
struct PublicFileRow {
    #[tabled(rename = "Filename")]
    filename: String,
    #[tabled(rename = "Download")]
    url: String,
}

/// Execute the open command
pub async fn execute(
    args: &OpenArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let public_id = parse_share_reference(&args.link)?;
    let api = ApiClient::new(&config.api)?;
    let mut flow = PublicShareFlow::new(public_id);

    if let UnlockState::Error(message) = flow.load(&api).await {
        return Err(AppError::new(ErrorKind::Api, message.clone()));
    }

    if flow.state().is_locked() {
        unlock(&mut flow, &api, args.password.as_deref()).await?;
    }

    let rows: Vec<PublicFileRow> = flow
        .files()
        .iter()
        .map(|f| PublicFileRow {
            filename: f.filename.clone(),
            url: api.download_url(f),
        })
        .collect();
    output::print_list(&rows, format);

    if let Some(dir) = &args.download {
        let paths = flow.download_all(&api, dir).await?;
        for path in paths {
            output::print_success(&format!("Saved {}", path.display()));
        }
    }
    Ok(())
}

async fn unlock(
    flow: &mut PublicShareFlow,
    api: &ApiClient,
    password: Option<&str>,
) -> Result<(), AppError> {
    // A password given on the command line gets exactly one attempt.
    let attempts = if password.is_some() { 1 } else { MAX_PROMPT_ATTEMPTS };

    for _ in 0..attempts {
        flow.password = prompt::password_or_prompt(password, "Share password")?;
        match flow.unlock(api).await? {
            UnlockState::Unlocked { .. } => return Ok(()),
            UnlockState::Locked { error: Some(msg) } if password.is_none() => {
                output::print_error(msg)
            }
            _ => {}
        }
    }

    let message = match flow.state() {
        UnlockState::Locked { error: Some(msg) } => msg.clone(),
        _ => "Share is password protected".to_string(),
    };
    Err(AppError::authentication(message))
}
