//! Session persistence configuration.

use serde::{Deserialize, Serialize};

/// Where the authenticated session is kept between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the JSON file holding the persisted session.
    #[serde(default = "default_store_path")]
    pub store_path: String,
    /// Persist the session to `store_path`. When false the session only
    /// lives for the duration of one process.
    #[serde(default = "default_persist")]
    pub persist: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            persist: default_persist(),
        }
    }
}

fn default_store_path() -> String {
    "data/session.json".to_string()
}

fn default_persist() -> bool {
    true
}
