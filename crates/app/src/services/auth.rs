//! Admin login.
//!
//! The admin password is checked against an Argon2id PHC hash from
//! configuration. A successful login yields an [`AdminSession`] held by
//! the caller; nothing about the session is persisted.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::Serialize;
use studio_core::error::CoreError;
use studio_core::types::Timestamp;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::services::chat;
use crate::state::AppState;

pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const MSG_LOGIN_DISABLED: &str = "Admin login is not configured.";

// ---------------------------------------------------------------------------
// Password hashing
// ---------------------------------------------------------------------------

/// Hash a plaintext password using Argon2id with a random salt, returning
/// the PHC string to put in `ADMIN_PASSWORD_HASH`.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// `Ok(false)` on a wrong password; `Err` only for a malformed hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

// ---------------------------------------------------------------------------
// Authenticator
// ---------------------------------------------------------------------------

/// Decides whether a username/password pair is the admin.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, username: &str, password: &str) -> AppResult<bool>;
}

/// The single admin account from configuration.
#[derive(Debug, Clone)]
pub struct ConfiguredAdmin {
    username: String,
    password_hash: Option<String>,
}

impl ConfiguredAdmin {
    pub fn new(username: impl Into<String>, password_hash: Option<String>) -> Self {
        Self {
            username: username.into(),
            password_hash,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.admin_username.clone(), config.admin_password_hash.clone())
    }
}

impl Authenticator for ConfiguredAdmin {
    fn authenticate(&self, username: &str, password: &str) -> AppResult<bool> {
        let Some(hash) = self.password_hash.as_deref() else {
            return Err(CoreError::Unauthorized(MSG_LOGIN_DISABLED.into()).into());
        };
        if username.trim() != self.username {
            return Ok(false);
        }
        verify_password(password, hash)
            .map_err(|e| AppError::Internal(format!("Admin password hash is invalid: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminSession {
    pub username: String,
    pub logged_in_at: Timestamp,
}

pub fn login(
    state: &AppState,
    authenticator: &dyn Authenticator,
    username: &str,
    password: &str,
) -> AppResult<AdminSession> {
    if !authenticator.authenticate(username, password)? {
        tracing::warn!(username, "Admin login rejected");
        return Err(CoreError::Unauthorized(MSG_INVALID_CREDENTIALS.into()).into());
    }
    tracing::info!(username, "Admin logged in");
    Ok(AdminSession {
        username: username.trim().to_string(),
        logged_in_at: state.now(),
    })
}

/// End the session and go offline so visitors get the auto-reply.
pub async fn logout(state: &AppState, session: AdminSession) -> AppResult<()> {
    chat::set_admin_online(state, false).await?;
    tracing::info!(username = %session.username, "Admin logged out");
    Ok(())
}
