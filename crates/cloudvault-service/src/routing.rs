//! Client routes and the guard deciding what a session may see.

use std::fmt;

use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;
use cloudvault_core::types::Session;

/// A client-side route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/login`
    Login,
    /// `/`
    Home,
    /// `/share/:id`
    PublicShare(String),
    /// `/download/:id`, the form share links are generated in.
    Download(String),
    /// Anything else.
    Unknown(String),
}

impl Route {
    /// Parse the path part of a URL. Query strings and fragments are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["share", id] => Self::PublicShare((*id).to_string()),
            ["download", id] => Self::Download((*id).to_string()),
            _ => Self::Unknown(path.to_string()),
        }
    }

    /// Public share id carried by the route, if any.
    pub fn public_id(&self) -> Option<&str> {
        match self {
            Self::PublicShare(id) | Self::Download(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "/login"),
            Self::Home => write!(f, "/"),
            Self::PublicShare(id) => write!(f, "/share/{id}"),
            Self::Download(id) => write!(f, "/download/{id}"),
            Self::Unknown(path) => write!(f, "{path}"),
        }
    }
}

/// What gets rendered once a route is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Credentials form.
    Login,
    /// Mandatory password change.
    ChangePassword,
    /// Upload and share management.
    Dashboard,
    /// Anonymous share view.
    PublicShare(String),
}

/// Outcome of routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Show a screen.
    Render(Screen),
    /// Navigate elsewhere instead.
    Redirect(Route),
}

/// Decide what `route` shows for `session`.
///
/// Public share routes ignore the session entirely.
pub fn resolve(route: &Route, session: &Session) -> RouteDecision {
    match route {
        Route::PublicShare(id) | Route::Download(id) => {
            RouteDecision::Render(Screen::PublicShare(id.clone()))
        }
        Route::Login if session.is_authenticated() => RouteDecision::Redirect(Route::Home),
        Route::Login => RouteDecision::Render(Screen::Login),
        Route::Home if !session.is_authenticated() => RouteDecision::Redirect(Route::Login),
        Route::Home if session.must_change_password() => {
            RouteDecision::Render(Screen::ChangePassword)
        }
        Route::Home => RouteDecision::Render(Screen::Dashboard),
        Route::Unknown(_) => RouteDecision::Redirect(Route::Home),
    }
}

/// Follow redirects until a screen is reached.
pub fn screen_for(route: &Route, session: &Session) -> Screen {
    let mut current = route.clone();
    // Every redirect chain ends within two hops: unknown -> home -> login.
    for _ in 0..3 {
        match resolve(&current, session) {
            RouteDecision::Render(screen) => return screen,
            RouteDecision::Redirect(next) => current = next,
        }
    }
    Screen::Login
}

/// Gate for dashboard operations: signed in and no pending password change.
pub fn require_dashboard(session: &Session) -> AppResult<()> {
    match screen_for(&Route::Home, session) {
        Screen::Dashboard => Ok(()),
        Screen::ChangePassword => Err(AppError::authentication(
            "You must change your password before continuing. Run `cloudvault change-password`.",
        )),
        _ => Err(AppError::authentication(
            "Not logged in. Run `cloudvault login` first.",
        )),
    }
}
