//! Request bodies sent to the CloudVault API.

use serde::Serialize;

use cloudvault_core::types::ExpirationOption;

/// Body of `POST /change-password`.
#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    /// The new password.
    pub new_password: String,
}

/// Body of `POST /public/share/{id}/unlock`.
#[derive(Debug, Clone, Serialize)]
pub struct UnlockRequest {
    /// Password entered by the recipient.
    pub password: String,
}

/// Body of `POST /share/{id}`.
///
/// Both fields are always serialized; `None` goes out as JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareSettingsUpdate {
    /// Public id echoed back; sent only by the post-upload settings call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    /// New password. `None` is sent as `null`, never as `""`.
    pub password: Option<String>,
    /// New expiration window in minutes.
    pub expires_minutes: Option<u32>,
}

impl ShareSettingsUpdate {
    /// Build an update from raw form input. An empty password input becomes
    /// `null`.
    pub fn from_input(password: &str, expiration: Option<ExpirationOption>) -> Self {
        Self {
            public_id: None,
            password: (!password.is_empty()).then(|| password.to_string()),
            expires_minutes: expiration.map(ExpirationOption::minutes),
        }
    }

    /// Echo the share's public id in the body.
    #[must_use]
    pub fn for_share(mut self, public_id: impl Into<String>) -> Self {
        self.public_id = Some(public_id.into());
        self
    }
}
