//! Client session state.

use serde::{Deserialize, Serialize};

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name.
    pub username: String,
}

impl User {
    /// Create a user from a login name.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Bearer token, identity and password-change flag of the current client.
///
/// The three fields only change together: see [`Session::authenticated`]
/// and [`Session::anonymous`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    #[serde(default)]
    must_change_password: bool,
}

impl Session {
    /// A signed-in session.
    pub fn authenticated(token: impl Into<String>, user: User, must_change_password: bool) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
            must_change_password,
        }
    }

    /// The signed-out session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Whether a bearer token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The signed-in user.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether the user must change their password before continuing.
    pub fn must_change_password(&self) -> bool {
        self.must_change_password
    }
}
