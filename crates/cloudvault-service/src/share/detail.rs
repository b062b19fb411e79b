//! A single share opened from the list.

use cloudvault_client::UploadFile;
use cloudvault_client::dto::ShareSettingsUpdate;
use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;
use cloudvault_core::types::{ExpirationOption, FileId, ShareDetail, SharedFile};

use crate::context::AppContext;

/// State of the share detail panel.
#[derive(Debug, Clone)]
pub struct ShareDetailView {
    /// The share as last returned by the server.
    pub share: ShareDetail,
    /// Inline error from the last operation.
    pub error: Option<String>,
    /// Confirmation from the last successful operation.
    pub success: Option<String>,
}

impl ShareDetailView {
    /// Wrap an already-known share without fetching.
    pub fn new(share: ShareDetail) -> Self {
        Self {
            share,
            error: None,
            success: None,
        }
    }

    /// Fetch a share and open its detail view.
    pub async fn open(ctx: &mut AppContext, public_id: &str) -> AppResult<Self> {
        let token = ctx.dashboard_token()?;
        let result = ctx.api.get_share(public_id, &token).await;
        let share = ctx.settle(result).await?;
        Ok(Self::new(share))
    }

    /// Public id of the open share.
    pub fn public_id(&self) -> &str {
        &self.share.public_id
    }

    /// Reload the share from the server.
    pub async fn refresh(&mut self, ctx: &mut AppContext) -> AppResult<()> {
        let token = ctx.dashboard_token()?;
        let result = ctx.api.get_share(&self.share.public_id, &token).await;
        match ctx.settle(result).await {
            Ok(share) => {
                self.share = share;
                Ok(())
            }
            Err(err) => Err(self.record(err)),
        }
    }

    /// Append files. The server answers with the whole share, which
    /// replaces the local copy so the list matches server order.
    ///
    /// An empty selection is a no-op.
    pub async fn add_files(&mut self, ctx: &mut AppContext, files: &[UploadFile]) -> AppResult<()> {
        if files.is_empty() {
            return Ok(());
        }
        let token = ctx.dashboard_token()?;
        self.clear_status();

        let result = ctx
            .api
            .add_files_to_share(&self.share.public_id, files, &token)
            .await;
        match ctx.settle(result).await {
            Ok(share) => {
                tracing::info!(
                    public_id = %share.public_id,
                    added = files.len(),
                    total = share.file_count(),
                    "Files added to share"
                );
                self.share = share;
                self.success = Some("Files added successfully!".to_string());
                Ok(())
            }
            Err(err) => Err(self.record(err)),
        }
    }

    /// Remove one file after `confirm` approves it.
    ///
    /// The file leaves the local list only once the server confirms.
    /// Returns `Ok(false)` when the user declines.
    pub async fn delete_file<F>(
        &mut self,
        ctx: &mut AppContext,
        file_id: FileId,
        confirm: F,
    ) -> AppResult<bool>
    where
        F: FnOnce(&SharedFile) -> bool,
    {
        let token = ctx.dashboard_token()?;
        let file = self
            .share
            .file(file_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("File {file_id} is not in this share")))?;

        if !confirm(&file) {
            return Ok(false);
        }
        self.clear_status();

        let result = ctx
            .api
            .delete_file_from_share(&self.share.public_id, file_id, &token)
            .await;
        match ctx.settle(result).await {
            Ok(_) => {
                tracing::info!(public_id = %self.share.public_id, file_id, "File removed from share");
                self.share.remove_file(file_id);
                Ok(true)
            }
            Err(err) => Err(self.record(err)),
        }
    }

    /// Change password and expiration, then reload the share.
    ///
    /// An empty `password` input is sent as `null`, which leaves the
    /// server's password as it is. `expiration: None` likewise leaves the
    /// expiry unchanged.
    pub async fn update_settings(
        &mut self,
        ctx: &mut AppContext,
        password: &str,
        expiration: Option<ExpirationOption>,
    ) -> AppResult<()> {
        let token = ctx.dashboard_token()?;
        self.clear_status();

        let update = ShareSettingsUpdate::from_input(password, expiration);
        let result = ctx
            .api
            .update_share_settings(&self.share.public_id, &update, &token)
            .await;
        if let Err(err) = ctx.settle(result).await {
            return Err(self.record(err));
        }

        tracing::info!(
            public_id = %self.share.public_id,
            password_set = update.password.is_some(),
            expires_minutes = ?update.expires_minutes,
            "Share settings updated"
        );
        self.refresh(ctx).await?;
        self.success = Some("Settings updated successfully!".to_string());
        Ok(())
    }

    fn clear_status(&mut self) {
        self.error = None;
        self.success = None;
    }

    fn record(&mut self, err: AppError) -> AppError {
        if !err.is_token_expired() {
            self.error = Some(err.message.clone());
        }
        err
    }
}

/// Prompt shown before removing a file from a share.
pub fn delete_file_prompt(file: &SharedFile) -> String {
    format!("Remove \"{}\" from this share?", file.filename)
}
