//! Upload command.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use cloudvault_client::UploadFile;
use cloudvault_core::config::AppConfig;
use cloudvault_core::error::AppError;
use cloudvault_core::types::ExpirationOption;
use cloudvault_service::AppContext;
use cloudvault_service::share::{SettingsOutcome, UploadFlow, UploadSettings};

use super::shares;
use crate::output::{self, OutputFormat};

/// Arguments for `upload`
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Files to upload
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Protect the share with a password
    #[arg(short, long)]
    pub password: Option<String>,
    /// Link lifetime in minutes (5, 15, 30, 60, 360, 720 or 1440)
    #[arg(short, long, default_value = "30")]
    pub expires: ExpirationOption,
}

/// JSON shape of an upload result
#[derive(Debug, Serialize)]
struct UploadOutput<'a> {
    message: String,
    settings_applied: bool,
    share: &'a cloudvault_core::types::ShareDetail,
}

/// Execute the upload command
pub async fn execute(
    args: &UploadArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut ctx = AppContext::from_config(config).await?;
    ctx.dashboard_token()?;

    let mut files = Vec::with_capacity(args.files.len());
    for path in &args.files {
        files.push(UploadFile::from_path(path).await?);
    }

    let settings = UploadSettings::new(args.password.clone().unwrap_or_default(), args.expires);
    let mut flow = UploadFlow::new(settings);

    let Some(report) = flow.submit(&mut ctx, &files).await? else {
        output::print_warning("No files selected");
        return Ok(());
    };

    let message = report.status_message();
    match format {
        OutputFormat::Json => output::print_json(&UploadOutput {
            message,
            settings_applied: matches!(report.settings, SettingsOutcome::Applied),
            share: &report.share,
        }),
        OutputFormat::Table => {
            if report.is_complete() {
                output::print_success(&message);
            } else {
                output::print_warning(&message);
            }
            shares::print_detail(&report.share);
        }
    }
    Ok(())
}
