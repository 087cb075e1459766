//! Request and response models for the API.
//!
//! Form payloads keep every field optional so handlers can report exactly
//! which one is missing instead of failing extraction.

use serde::{Deserialize, Serialize};

// ============================================================================
// Users
// ============================================================================

/// A user as held by the user store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub hashed_password: String,
    pub reset_token: Option<String>,
    pub created_at: u64,
}

/// Public view of a user. Never carries the password hash or reset token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub created_at: u64,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        UserInfo {
            id: user.id.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Auth Models
// ============================================================================

/// Email + password form, used by registration and session login.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request for a password reset token.
#[derive(Debug, Default, Deserialize)]
pub struct ResetTokenForm {
    pub email: Option<String>,
}

/// Password update using a reset token.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePasswordForm {
    pub email: Option<String>,
    pub reset_token: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub email: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetTokenResponse {
    pub email: String,
    pub reset_token: String,
}

/// Current UNIX time in seconds.
pub fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
