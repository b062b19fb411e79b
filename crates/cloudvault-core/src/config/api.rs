//! CloudVault API endpoint configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Where and how the client talks to the CloudVault API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base path every endpoint is appended to (e.g. `https://host/api`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Base used for direct public file links. Defaults to `base_url`.
    #[serde(default)]
    pub public_base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            public_base_url: None,
            request_timeout_seconds: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Base URL for public download links.
    pub fn public_base(&self) -> &str {
        self.public_base_url.as_deref().unwrap_or(&self.base_url)
    }

    pub(crate) fn validate(&self) -> Result<(), AppError> {
        for url in std::iter::once(self.base_url.as_str()).chain(self.public_base_url.as_deref()) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::configuration(format!(
                    "API URL must start with http:// or https://, got '{url}'"
                )));
            }
        }
        if self.request_timeout_seconds == 0 {
            return Err(AppError::configuration(
                "api.request_timeout_seconds must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("cloudvault/{}", env!("CARGO_PKG_VERSION"))
}
