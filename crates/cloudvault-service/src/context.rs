//! Everything a view needs: the API client and the session.

use std::sync::Arc;

use cloudvault_client::ApiClient;
use cloudvault_core::config::AppConfig;
use cloudvault_core::result::AppResult;

use crate::routing;
use crate::session::{FileSessionStore, MemorySessionStore, SessionContext, SessionStore};

/// Shared context handed to every view operation.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// HTTP client for the CloudVault API.
    pub api: ApiClient,
    /// Current session.
    pub session: SessionContext,
}

impl AppContext {
    /// Assemble a context from parts.
    pub fn new(api: ApiClient, session: SessionContext) -> Self {
        Self { api, session }
    }

    /// Build the client from configuration and restore the persisted session.
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let api = ApiClient::new(&config.api)?;
        let store: Arc<dyn SessionStore> = if config.session.persist {
            Arc::new(FileSessionStore::new(&config.session.store_path))
        } else {
            Arc::new(MemorySessionStore::new())
        };
        let session = SessionContext::init(store).await?;
        Ok(Self { api, session })
    }

    /// Token for dashboard operations.
    ///
    /// Fails when signed out or while a password change is pending.
    pub fn dashboard_token(&self) -> AppResult<String> {
        routing::require_dashboard(self.session.session())?;
        Ok(self.session.require_token()?.to_string())
    }

    /// See [`SessionContext::settle`].
    pub async fn settle<T>(&mut self, result: AppResult<T>) -> AppResult<T> {
        self.session.settle(result).await
    }
}
