//! Share types owned by an authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Server-assigned identifier of a file inside a share.
pub type FileId = i64;

/// A file belonging to a share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedFile {
    /// File identifier.
    pub id: FileId,
    /// Original file name.
    pub filename: String,
}

/// Full view of one share, as returned by upload, detail and add-files calls.
///
/// `files` keeps the order the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareDetail {
    /// Opaque public identifier used in links and endpoint paths.
    pub public_id: String,
    /// Link recipients open.
    pub share_link: String,
    /// Files in the share, in server order.
    #[serde(default)]
    pub files: Vec<SharedFile>,
    /// When the share expires (`None` = never).
    #[serde(default, with = "timestamp::option")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether recipients must enter a password.
    #[serde(default)]
    pub password_protected: bool,
    /// When the share was created. Absent in upload responses.
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Server-side sharing flag.
    #[serde(default)]
    pub is_shared: Option<bool>,
}

impl ShareDetail {
    /// Number of files in the share.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Remove a file from the local list. Returns whether it was present.
    pub fn remove_file(&mut self, id: FileId) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        self.files.len() != before
    }

    /// Find a file by id.
    pub fn file(&self, id: FileId) -> Option<&SharedFile> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Expiry state relative to `now`.
    pub fn expiry(&self, now: DateTime<Utc>) -> ShareExpiry {
        ShareExpiry::at(self.expires_at, now)
    }
}

/// One row of the share list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareSummary {
    /// Opaque public identifier.
    pub public_id: String,
    /// Link recipients open.
    pub share_link: String,
    /// Number of files in the share.
    #[serde(default)]
    pub file_count: u64,
    /// When the share expires (`None` = never).
    #[serde(default, with = "timestamp::option")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether recipients must enter a password.
    #[serde(default)]
    pub password_protected: bool,
    /// When the share was created.
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Server-side sharing flag.
    #[serde(default)]
    pub is_shared: bool,
}

impl ShareSummary {
    /// First eight characters of the public id, for compact listings.
    pub fn short_id(&self) -> &str {
        match self.public_id.char_indices().nth(8) {
            Some((idx, _)) => &self.public_id[..idx],
            None => &self.public_id,
        }
    }

    /// Expiry state relative to `now`.
    pub fn expiry(&self, now: DateTime<Utc>) -> ShareExpiry {
        ShareExpiry::at(self.expires_at, now)
    }
}

/// Client-side view of a share's expiration.
///
/// Display only: the server decides whether an expired share is still
/// reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareExpiry {
    /// The share never expires.
    Never,
    /// The share expires in the future.
    Active(DateTime<Utc>),
    /// The expiration time has passed.
    Expired(DateTime<Utc>),
}

impl ShareExpiry {
    /// Compare an optional expiration time against `now`.
    pub fn at(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        match expires_at {
            None => Self::Never,
            Some(at) if at < now => Self::Expired(at),
            Some(at) => Self::Active(at),
        }
    }

    /// Whether the "Expired" badge applies.
    pub fn is_expired(self) -> bool {
        matches!(self, Self::Expired(_))
    }

    /// Label used in listings: `Never`, `Expired` or the expiry time.
    pub fn label(self) -> String {
        match self {
            Self::Never => "Never".to_string(),
            Self::Expired(_) => "Expired".to_string(),
            Self::Active(at) => at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}
