//! Anonymous view of a share reached through its public link.

use serde::{Deserialize, Serialize};

/// A file a recipient may download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicFile {
    /// Original file name.
    pub filename: String,
    /// Per-file token consumed by the direct download link.
    #[serde(rename = "token")]
    pub download_token: String,
}

/// Lock status and, when unlocked, the downloadable files of a share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicShareView {
    /// Whether a password is required before files are listed.
    pub locked: bool,
    /// Files in server order. Empty while locked.
    #[serde(default)]
    pub files: Vec<PublicFile>,
}

impl PublicShareView {
    /// Files that may be shown. A locked view never exposes any.
    pub fn into_visible_files(self) -> Vec<PublicFile> {
        if self.locked { Vec::new() } else { self.files }
    }
}
