//! Upload form: files plus optional share settings.

use cloudvault_client::UploadFile;
use cloudvault_client::dto::ShareSettingsUpdate;
use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;
use cloudvault_core::types::{ExpirationOption, ShareDetail};

use crate::context::AppContext;

/// Settings the user picked alongside the files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSettings {
    /// Share password; empty means none.
    pub password: String,
    /// Link lifetime.
    pub expiration: ExpirationOption,
}

impl UploadSettings {
    /// Settings with the given password (empty for none) and lifetime.
    pub fn new(password: impl Into<String>, expiration: ExpirationOption) -> Self {
        Self {
            password: password.into(),
            expiration,
        }
    }

    /// Whether these are the defaults the server applies to a fresh share
    /// on its own. No settings call is made in that case.
    pub fn is_default(&self) -> bool {
        self.password.is_empty() && self.expiration == ExpirationOption::default()
    }

    fn to_update(&self, public_id: &str) -> ShareSettingsUpdate {
        ShareSettingsUpdate::from_input(&self.password, Some(self.expiration)).for_share(public_id)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// What happened to the settings step of an upload.
#[derive(Debug, Clone)]
pub enum SettingsOutcome {
    /// Settings were the defaults; nothing was sent.
    NotRequested,
    /// The settings call succeeded.
    Applied,
    /// The files are uploaded but the settings call failed.
    Failed(AppError),
}

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadReport {
    /// The share created by the upload.
    pub share: ShareDetail,
    /// Outcome of the follow-up settings call.
    pub settings: SettingsOutcome,
}

impl UploadReport {
    /// Message shown to the user.
    pub fn status_message(&self) -> String {
        match &self.settings {
            SettingsOutcome::NotRequested => "Files uploaded successfully!".to_string(),
            SettingsOutcome::Applied => "Files uploaded and settings applied!".to_string(),
            SettingsOutcome::Failed(err) => {
                format!("Files uploaded, but settings update failed: {}", err.message)
            }
        }
    }

    /// Whether both steps succeeded.
    pub fn is_complete(&self) -> bool {
        !matches!(self.settings, SettingsOutcome::Failed(_))
    }
}

/// State of the upload panel.
#[derive(Debug, Clone, Default)]
pub struct UploadFlow {
    /// Settings for the next upload.
    pub settings: UploadSettings,
    /// Share produced by the last upload.
    pub last_result: Option<ShareDetail>,
    /// Inline error from the last attempt.
    pub error: Option<String>,
    /// Status line from the last attempt.
    pub message: Option<String>,
}

impl UploadFlow {
    /// Panel with the given settings pre-filled.
    pub fn new(settings: UploadSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Upload `files` as a new share, then apply non-default settings.
    ///
    /// An empty selection is a no-op and returns `Ok(None)` without any
    /// request. A settings failure does not undo the upload; it is
    /// reported through [`SettingsOutcome::Failed`], unless the token
    /// expired, in which case the session is torn down and the error is
    /// returned. Settings reset to the defaults once the upload has gone
    /// through.
    pub async fn submit(
        &mut self,
        ctx: &mut AppContext,
        files: &[UploadFile],
    ) -> AppResult<Option<UploadReport>> {
        if files.is_empty() {
            return Ok(None);
        }

        let token = ctx.dashboard_token()?;
        self.error = None;
        self.message = None;

        let uploaded = ctx.api.upload_files(files, &token).await;
        let share = match ctx.settle(uploaded).await {
            Ok(share) => share,
            Err(err) => {
                if !err.is_token_expired() {
                    self.error = Some(err.message.clone());
                }
                return Err(err);
            }
        };

        tracing::info!(
            public_id = %share.public_id,
            files = share.file_count(),
            "Files uploaded"
        );

        let settings = if self.settings.is_default() {
            SettingsOutcome::NotRequested
        } else {
            let update = self.settings.to_update(&share.public_id);
            let applied = ctx
                .api
                .update_share_settings(&share.public_id, &update, &token)
                .await;
            match ctx.settle(applied).await {
                Ok(_) => SettingsOutcome::Applied,
                Err(err) if err.is_token_expired() => {
                    // The session is gone; the upload stands but nothing is shown inline.
                    self.last_result = Some(share);
                    self.settings.reset();
                    return Err(err);
                }
                Err(err) => {
                    tracing::warn!(
                        public_id = %share.public_id,
                        error = %err,
                        "Share settings update failed after upload"
                    );
                    SettingsOutcome::Failed(err)
                }
            }
        };

        let report = UploadReport { share, settings };
        self.message = Some(report.status_message());
        self.last_result = Some(report.share.clone());
        self.settings.reset();

        Ok(Some(report))
    }
}
