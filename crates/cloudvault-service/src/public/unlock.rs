//! Anonymous share view: load, unlock with a password, download.

use std::path::{Path, PathBuf};

use cloudvault_client::ApiClient;
use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;
use cloudvault_core::types::{PublicFile, PublicShareView};

/// Where the public share view stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockState {
    /// Initial fetch in flight.
    Loading,
    /// Password required. `error` holds the last failed attempt.
    Locked { error: Option<String> },
    /// Password submitted, waiting for the server.
    Unlocking,
    /// Files are visible. Stays here until the next load.
    Unlocked { files: Vec<PublicFile> },
    /// The share could not be loaded (missing, expired, unreachable).
    Error(String),
}

impl UnlockState {
    /// Waiting for a password.
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked { .. })
    }

    /// Files are visible.
    pub fn is_unlocked(&self) -> bool {
        matches!(self, Self::Unlocked { .. })
    }
}

/// State machine behind the public share screen.
#[derive(Debug, Clone)]
pub struct PublicShareFlow {
    public_id: String,
    state: UnlockState,
    /// Password input. Kept after a failed attempt, cleared on success.
    pub password: String,
}

impl PublicShareFlow {
    /// Flow for `public_id`, in [`UnlockState::Loading`] until [`load`](Self::load).
    pub fn new(public_id: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            state: UnlockState::Loading,
            password: String::new(),
        }
    }

    /// Public id of the share being viewed.
    pub fn public_id(&self) -> &str {
        &self.public_id
    }

    /// Current state.
    pub fn state(&self) -> &UnlockState {
        &self.state
    }

    /// Visible files; empty unless unlocked.
    pub fn files(&self) -> &[PublicFile] {
        match &self.state {
            UnlockState::Unlocked { files } => files,
            _ => &[],
        }
    }

    /// Fetch the share's lock status.
    pub async fn load(&mut self, api: &ApiClient) -> &UnlockState {
        self.state = UnlockState::Loading;
        let result = api.get_public_share(&self.public_id).await;
        self.apply_load(result);
        &self.state
    }

    /// Submit [`password`](Self::password) for a locked share.
    ///
    /// Only valid while locked.
    pub async fn unlock(&mut self, api: &ApiClient) -> AppResult<&UnlockState> {
        if !self.state.is_locked() {
            return Err(AppError::validation("Share is not waiting for a password"));
        }
        if self.password.is_empty() {
            self.state = UnlockState::Locked {
                error: Some("Password is required".to_string()),
            };
            return Ok(&self.state);
        }

        self.state = UnlockState::Unlocking;
        let result = api.unlock_share(&self.public_id, &self.password).await;
        self.apply_unlock(result);
        Ok(&self.state)
    }

    /// Stream every visible file into `dest_dir`.
    pub async fn download_all(&self, api: &ApiClient, dest_dir: &Path) -> AppResult<Vec<PathBuf>> {
        if !self.state.is_unlocked() {
            return Err(AppError::validation("Share is locked"));
        }
        let mut paths = Vec::with_capacity(self.files().len());
        for file in self.files() {
            paths.push(api.download_public_file(file, dest_dir).await?);
        }
        Ok(paths)
    }

    fn apply_load(&mut self, result: AppResult<PublicShareView>) {
        self.state = match result {
            Ok(view) if view.locked => {
                tracing::debug!(public_id = %self.public_id, "Share is password protected");
                UnlockState::Locked { error: None }
            }
            Ok(view) => UnlockState::Unlocked {
                files: view.into_visible_files(),
            },
            Err(err) => {
                tracing::warn!(public_id = %self.public_id, error = %err, "Failed to load share");
                UnlockState::Error(err.message)
            }
        };
    }

    fn apply_unlock(&mut self, result: AppResult<PublicShareView>) {
        self.state = match result {
            Ok(view) => {
                self.password.clear();
                UnlockState::Unlocked { files: view.files }
            }
            Err(err) => UnlockState::Locked {
                error: Some(err.message),
            },
        };
    }
}
