//! The signed-in user's share list.

use chrono::{DateTime, Utc};

use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;
use cloudvault_core::types::{ShareExpiry, ShareSummary};

use crate::context::AppContext;

/// State of the share list panel.
#[derive(Debug, Clone, Default)]
pub struct ShareListView {
    /// Shares in server order.
    pub shares: Vec<ShareSummary>,
    /// Inline error from the last operation.
    pub error: Option<String>,
}

impl ShareListView {
    /// An empty list; call [`refresh`](Self::refresh) to fill it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload the list from the server.
    pub async fn refresh(&mut self, ctx: &mut AppContext) -> AppResult<&[ShareSummary]> {
        let token = ctx.dashboard_token()?;
        let result = ctx.api.list_shares(&token).await;
        match ctx.settle(result).await {
            Ok(shares) => {
                tracing::debug!(count = shares.len(), "Share list loaded");
                self.shares = shares;
                self.error = None;
                Ok(&self.shares)
            }
            Err(err) => Err(self.record(err)),
        }
    }

    /// Delete a share after `confirm` approves it.
    ///
    /// Returns `Ok(false)` when the user declines; nothing is sent then.
    /// On success the share is dropped from the local list.
    pub async fn delete<F>(
        &mut self,
        ctx: &mut AppContext,
        public_id: &str,
        confirm: F,
    ) -> AppResult<bool>
    where
        F: FnOnce(&ShareSummary) -> bool,
    {
        let token = ctx.dashboard_token()?;
        let share = self
            .find(public_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Share {public_id} not found")))?;

        if !confirm(&share) {
            return Ok(false);
        }

        let result = ctx.api.delete_share(public_id, &token).await;
        match ctx.settle(result).await {
            Ok(_) => {
                tracing::info!(public_id, "Share deleted");
                self.shares.retain(|s| s.public_id != public_id);
                self.error = None;
                Ok(true)
            }
            Err(err) => Err(self.record(err)),
        }
    }

    /// Look up a share by public id.
    pub fn find(&self, public_id: &str) -> Option<&ShareSummary> {
        self.shares.iter().find(|s| s.public_id == public_id)
    }

    /// Shares paired with their expiry state at `now`.
    pub fn with_expiry(&self, now: DateTime<Utc>) -> Vec<(&ShareSummary, ShareExpiry)> {
        self.shares.iter().map(|s| (s, s.expiry(now))).collect()
    }

    fn record(&mut self, err: AppError) -> AppError {
        if !err.is_token_expired() {
            self.error = Some(err.message.clone());
        }
        err
    }
}

/// Prompt shown before deleting a share.
pub const DELETE_SHARE_PROMPT: &str = "Are you sure you want to delete this share and all its files?";
