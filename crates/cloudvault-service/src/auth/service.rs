//! Auth operations on the shared context.

use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;
use cloudvault_core::types::User;

use super::password::PasswordPolicy;
use crate::context::AppContext;

/// Exchange credentials for a token and establish the session.
///
/// A failed login leaves the session untouched; there is nothing to tear
/// down, so the token-expired flag carries no meaning here.
pub async fn login(ctx: &mut AppContext, username: &str, password: &str) -> AppResult<()> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::validation("Username and password are required"));
    }

    let token = ctx.api.login(username, password).await.map_err(|e| {
        tracing::warn!(username, error = %e, "Login failed");
        e
    })?;

    ctx.session
        .login(
            token.access_token,
            User::new(username),
            token.must_change_password,
        )
        .await
}

/// Change the signed-in user's password.
///
/// Local validation failures issue no request. On success the session is
/// re-established with the same token and the pending-change flag cleared.
pub async fn change_password(
    ctx: &mut AppContext,
    new_password: &str,
    confirm_password: &str,
) -> AppResult<()> {
    let token = ctx.session.require_token()?.to_string();
    let user = ctx
        .session
        .user()
        .cloned()
        .ok_or_else(|| AppError::authentication("Session has no user"))?;

    PasswordPolicy::default().validate(new_password, confirm_password)?;

    let result = ctx.api.change_password(new_password, &token).await;
    ctx.settle(result).await?;

    tracing::info!(username = %user.username, "Password changed");
    ctx.session.login(token, user, false).await
}

/// Sign out at the user's request.
pub async fn logout(ctx: &mut AppContext) -> AppResult<()> {
    ctx.session.logout().await
}
