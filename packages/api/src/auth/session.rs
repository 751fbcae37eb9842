//! Admin flag stored in the `tower_sessions` session.

use tower_sessions::Session;

use super::password::verify_password;
use crate::error::ApiError;
use crate::settings::AdminSettings;

/// Session key holding `true` once the operator has logged in.
pub const SESSION_ADMIN_KEY: &str = "admin";

fn session_error(e: tower_sessions::session::Error) -> ApiError {
    ApiError::Internal(format!("session: {}", e))
}

/// Check `password` against the configured hash. With no hash configured the admin
/// area stays locked; a malformed hash is logged and treated as a mismatch.
pub fn password_matches(admin: &AdminSettings, password: &str) -> bool {
    let Some(hash) = admin.password_hash.as_deref() else {
        tracing::warn!("Admin login attempted but no password hash is configured");
        return false;
    };
    verify_password(password, hash).unwrap_or_else(|e| {
        tracing::error!("{}", e);
        false
    })
}

pub async fn is_admin(session: &Session) -> Result<bool, ApiError> {
    let flag: Option<bool> = session
        .get(SESSION_ADMIN_KEY)
        .await
        .map_err(session_error)?;
    Ok(flag.unwrap_or(false))
}

pub async fn require_admin(session: &Session) -> Result<(), ApiError> {
    if is_admin(session).await? {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

/// Verify the password and mark the session as admin. The session id is rotated
/// on success.
pub async fn login(session: &Session, admin: &AdminSettings, password: &str) -> Result<(), ApiError> {
    if !password_matches(admin, password) {
        tracing::warn!("Rejected admin login");
        return Err(ApiError::Unauthorized);
    }
    session.cycle_id().await.map_err(session_error)?;
    session
        .insert(SESSION_ADMIN_KEY, true)
        .await
        .map_err(session_error)?;
    tracing::info!("Admin logged in");
    Ok(())
}

pub async fn logout(session: &Session) -> Result<(), ApiError> {
    session.flush().await.map_err(session_error)
}
