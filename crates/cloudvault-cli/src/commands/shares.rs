//! Share management commands.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use cloudvault_client::UploadFile;
use cloudvault_core::config::AppConfig;
use cloudvault_core::error::AppError;
use cloudvault_core::types::{ExpirationOption, FileId, ShareDetail};
use cloudvault_service::AppContext;
use cloudvault_service::share::detail::delete_file_prompt;
use cloudvault_service::share::list::DELETE_SHARE_PROMPT;
use cloudvault_service::share::{ShareDetailView, ShareListView};

use super::prompt;
use crate::output::{self, OutputFormat};

/// Arguments for share commands
#[derive(Debug, Args)]
pub struct SharesArgs {
    /// Shares subcommand
    #[command(subcommand)]
    pub command: SharesCommand,
}

/// Shares subcommands
#[derive(Debug, Subcommand)]
pub enum SharesCommand {
    /// List your shares
    List,
    /// Show one share with its files
    Show {
        /// Public id of the share
        id: String,
    },
    /// Delete a share and all its files
    Delete {
        /// Public id of the share
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Add files to a share
    AddFiles {
        /// Public id of the share
        id: String,
        /// Files to add
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Remove one file from a share
    RemoveFile {
        /// Public id of the share
        id: String,
        /// File id (see `shares show`)
        file_id: FileId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Change a share's password or expiration
    Settings {
        /// Public id of the share
        id: String,
        /// New password (unchanged if omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// New lifetime in minutes from now (unchanged if omitted)
        #[arg(short, long)]
        expires: Option<ExpirationOption>,
    },
}

/// Share display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ShareRow {
    /// Short public id
    #[tabled(rename = "ID")]
    id: String,
    /// Number of files
    #[tabled(rename = "Files")]
    files: u64,
    /// Password protected
    #[tabled(rename = "Password")]
    password: &'static str,
    /// Expiry label
    #[tabled(rename = "Expires")]
    expires: String,
    /// Created at
    #[tabled(rename = "Created")]
    created_at: String,
    /// Share link
    #[tabled(rename = "Link")]
    link: String,
}

/// File display row for table output
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    #[tabled(rename = "ID")]
    id: FileId,
    #[tabled(rename = "Filename")]
    filename: String,
}

/// Execute share commands
pub async fn execute(
    args: &SharesArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut ctx = AppContext::from_config(config).await?;
    ctx.dashboard_token()?;

    match &args.command {
        SharesCommand::List => {
            let mut view = ShareListView::new();
            view.refresh(&mut ctx).await?;
            let now = Utc::now();

            match format {
                OutputFormat::Json => output::print_json(&view.shares),
                OutputFormat::Table => {
                    let rows: Vec<ShareRow> = view
                        .with_expiry(now)
                        .into_iter()
                        .map(|(s, expiry)| ShareRow {
                            id: s.short_id().to_string(),
                            files: s.file_count,
                            password: output::yes_no(s.password_protected),
                            expires: expiry.label(),
                            created_at: format_time(s.created_at),
                            link: s.share_link.clone(),
                        })
                        .collect();
                    output::print_list(&rows, format);
                }
            }
        }
        SharesCommand::Show { id } => {
            let view = ShareDetailView::open(&mut ctx, id).await?;
            print_share(&view.share, format);
        }
        SharesCommand::Delete { id, yes } => {
            let mut view = ShareListView::new();
            view.refresh(&mut ctx).await?;
            let public_id = resolve_id(&view, id)?;

            let deleted = view
                .delete(&mut ctx, &public_id, |_| *yes || prompt::confirm(DELETE_SHARE_PROMPT))
                .await?;
            if deleted {
                output::print_success(&format!("Share '{public_id}' deleted"));
            } else {
                output::print_warning("Cancelled");
            }
        }
        SharesCommand::AddFiles { id, files } => {
            let mut uploads = Vec::with_capacity(files.len());
            for path in files {
                uploads.push(UploadFile::from_path(path).await?);
            }

            let mut view = ShareDetailView::open(&mut ctx, id).await?;
            view.add_files(&mut ctx, &uploads).await?;
            report(&view, format);
        }
        SharesCommand::RemoveFile { id, file_id, yes } => {
            let mut view = ShareDetailView::open(&mut ctx, id).await?;
            let removed = view
                .delete_file(&mut ctx, *file_id, |file| {
                    *yes || prompt::confirm(&delete_file_prompt(file))
                })
                .await?;
            if removed {
                output::print_success(&format!("File {file_id} removed"));
                print_share(&view.share, format);
            } else {
                output::print_warning("Cancelled");
            }
        }
        SharesCommand::Settings {
            id,
            password,
            expires,
        } => {
            let mut view = ShareDetailView::open(&mut ctx, id).await?;
            view.update_settings(&mut ctx, password.as_deref().unwrap_or_default(), *expires)
                .await?;
            report(&view, format);
        }
    }

    Ok(())
}

/// Print a share as key-value pairs followed by its file table
pub fn print_detail(share: &ShareDetail) {
    output::print_kv("ID", &share.public_id);
    output::print_kv("Link", &share.share_link);
    output::print_kv("Password", output::yes_no(share.password_protected));
    output::print_kv("Expires", &share.expiry(Utc::now()).label());
    if share.created_at.is_some() {
        output::print_kv("Created", &format_time(share.created_at));
    }
    println!();

    let rows: Vec<FileRow> = share
        .files
        .iter()
        .map(|f| FileRow {
            id: f.id,
            filename: f.filename.clone(),
        })
        .collect();
    output::print_list(&rows, OutputFormat::Table);
}

fn print_share(share: &ShareDetail, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(share),
        OutputFormat::Table => print_detail(share),
    }
}

fn report(view: &ShareDetailView, format: OutputFormat) {
    if format == OutputFormat::Table {
        if let Some(msg) = &view.success {
            output::print_success(msg);
        }
    }
    print_share(&view.share, format);
}

/// Accept a full public id or the 8-character prefix shown by `shares list`.
fn resolve_id(view: &ShareListView, id: &str) -> Result<String, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::validation("Share id must not be empty"));
    }
    if view.find(id).is_some() {
        return Ok(id.to_string());
    }
    let mut matches = view.shares.iter().filter(|s| s.public_id.starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(share), None) => Ok(share.public_id.clone()),
        (Some(_), Some(_)) => Err(AppError::validation(format!(
            "Share id '{id}' is ambiguous; use the full id"
        ))),
        (None, _) => Err(AppError::not_found(format!("Share '{id}' not found"))),
    }
}

fn format_time(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
