//! The session context every view is handed.

use std::sync::Arc;

use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;
use cloudvault_core::types::{Session, User};

use super::store::{MemorySessionStore, SessionStore};

/// Why the last logout happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// The user asked to sign out.
    UserInitiated,
    /// An API call reported the token as expired.
    TokenExpired,
}

/// Owner of the current [`Session`].
///
/// Created once at start-up with [`SessionContext::init`], which restores
/// the persisted session; torn down by [`logout`](Self::logout) or
/// [`handle_token_expiration`](Self::handle_token_expiration). Every state
/// change is written through to the store.
#[derive(Debug, Clone)]
pub struct SessionContext {
    session: Session,
    store: Arc<dyn SessionStore>,
    last_logout: Option<LogoutReason>,
}

impl SessionContext {
    /// A signed-out context backed by `store`, without loading from it.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            session: Session::anonymous(),
            store,
            last_logout: None,
        }
    }

    /// A context that persists nothing.
    pub fn ephemeral() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Restore the persisted session from `store`.
    pub async fn init(store: Arc<dyn SessionStore>) -> AppResult<Self> {
        let session = store.load().await?.unwrap_or_default();
        if let Some(user) = session.user() {
            tracing::debug!(username = %user.username, "Restored persisted session");
        }
        Ok(Self {
            session,
            store,
            last_logout: None,
        })
    }

    /// The current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether a bearer token is held.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// The bearer token, if signed in.
    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    /// The signed-in user.
    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    /// Whether a password change is pending.
    pub fn must_change_password(&self) -> bool {
        self.session.must_change_password()
    }

    /// Reason of the most recent logout since the last login.
    pub fn last_logout(&self) -> Option<LogoutReason> {
        self.last_logout
    }

    /// The bearer token, or an authentication error when signed out.
    pub fn require_token(&self) -> AppResult<&str> {
        self.session
            .token()
            .ok_or_else(|| AppError::authentication("Not logged in. Run `cloudvault login` first."))
    }

    /// Replace the session with a signed-in one.
    ///
    /// All three fields are set together, and only once the store has
    /// accepted the new session. Also used to clear
    /// `must_change_password` after a successful password change.
    pub async fn login(
        &mut self,
        token: impl Into<String>,
        user: User,
        must_change_password: bool,
    ) -> AppResult<()> {
        tracing::info!(
            username = %user.username,
            must_change_password,
            "Session established"
        );
        let session = Session::authenticated(token, user, must_change_password);
        self.store.save(&session).await?;
        self.session = session;
        self.last_logout = None;
        Ok(())
    }

    /// Sign out at the user's request.
    pub async fn logout(&mut self) -> AppResult<()> {
        self.teardown(LogoutReason::UserInitiated).await
    }

    /// Sign out because the API reported the token as expired.
    ///
    /// Ends in the same state as [`logout`](Self::logout); only the recorded
    /// reason differs.
    pub async fn handle_token_expiration(&mut self) -> AppResult<()> {
        tracing::warn!("Session token expired, signing out");
        self.teardown(LogoutReason::TokenExpired).await
    }

    /// Pass a call result through, ending the session first when the error
    /// is classified as token-expired.
    pub async fn settle<T>(&mut self, result: AppResult<T>) -> AppResult<T> {
        if let Err(err) = &result {
            if err.is_token_expired() {
                if let Err(store_err) = self.handle_token_expiration().await {
                    tracing::error!(error = %store_err, "Failed to clear persisted session");
                }
            }
        }
        result
    }

    async fn teardown(&mut self, reason: LogoutReason) -> AppResult<()> {
        if let Some(user) = self.session.user() {
            tracing::info!(username = %user.username, ?reason, "Session ended");
        }
        self.session = Session::anonymous();
        self.last_logout = Some(reason);
        self.store.clear().await
    }
}
