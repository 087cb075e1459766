//! Session and password-reset endpoints.

use crate::auth::middleware::AppState;
use crate::auth::request::session_cookie_header;
use crate::error::AppError;
use crate::models::{
    CredentialsForm, ResetTokenForm, ResetTokenResponse, UpdatePasswordForm, UserInfo,
};
use crate::storage::user::{self, UserResolver, UserStoreError};
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    Form, Json,
};

/// Return the value or a 400 naming the missing field.
pub fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{} missing", field)))
}

/// Return the value or a bare 403. Password reset never says which field
/// was wrong.
pub fn required_or_forbidden(value: Option<String>) -> Result<String, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Forbidden("Forbidden".to_string()))
}

/// POST /api/v1/auth_session/login: verify credentials and start a session
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<impl IntoResponse, AppError> {
    let email = required(form.email, "email")?;
    let password = required(form.password, "password")?;

    let session = state
        .strategy
        .as_session()
        .ok_or_else(|| AppError::NotFound("Session authentication is disabled".to_string()))?;

    let user = state
        .users
        .find_by(&[("email", email.as_str())])?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound("no user found for this email".to_string()))?;

    if !user::valid_login(&state.users, &email, &password) {
        tracing::warn!(action = "login_failed", email = %email, "Wrong password");
        return Err(AppError::Unauthorized("wrong password".to_string()));
    }

    let cookie_name = session
        .cookie_name()
        .ok_or_else(|| AppError::Internal("SESSION_NAME is not configured".to_string()))?;

    let token = session
        .create_session(Some(user.id.as_str()))
        .ok_or_else(|| AppError::Internal(format!("Cannot create session for user {}", user.id)))?;

    let cookie = HeaderValue::from_str(&session_cookie_header(cookie_name, &token))
        .map_err(|e| AppError::Internal(format!("Invalid session cookie: {}", e)))?;

    tracing::info!(
        action = "login",
        user_id = %user.id,
        active_sessions = session.store().len(),
        "Session started"
    );

    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, cookie);
    Ok((headers, Json(UserInfo::from(&user))))
}

/// DELETE /api/v1/auth_session/logout: destroy the session named by the cookie
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .strategy
        .as_session()
        .ok_or_else(|| AppError::NotFound("Session authentication is disabled".to_string()))?;

    if !session.destroy_session(Some(&headers)) {
        return Err(AppError::NotFound("Session not found".to_string()));
    }

    tracing::info!(action = "logout", "Session destroyed");
    Ok(Json(serde_json::json!({})))
}

/// POST /api/v1/reset_password: issue a password reset token
pub async fn reset_password_token(
    State(state): State<AppState>,
    Form(form): Form<ResetTokenForm>,
) -> Result<impl IntoResponse, AppError> {
    let email = required_or_forbidden(form.email)?;

    let reset_token = match user::get_reset_password_token(&state.users, &email) {
        Ok(token) => token,
        Err(UserStoreError::NotFound) => {
            return Err(AppError::Forbidden("Forbidden".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(action = "reset_token_issued", email = %email, "Password reset token issued");
    Ok(Json(ResetTokenResponse { email, reset_token }))
}

/// PUT /api/v1/reset_password: set a new password using a reset token
pub async fn update_password(
    State(state): State<AppState>,
    Form(form): Form<UpdatePasswordForm>,
) -> Result<impl IntoResponse, AppError> {
    let email = required_or_forbidden(form.email)?;
    let reset_token = required_or_forbidden(form.reset_token)?;
    let new_password = required_or_forbidden(form.new_password)?;

    // The token must belong to the account named in the form.
    let owner = state
        .users
        .find_by(&[("reset_token", reset_token.as_str())])?
        .into_iter()
        .next();
    if owner.map(|u| u.email) != Some(email.clone()) {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }

    match user::update_password(&state.users, &reset_token, &new_password) {
        Ok(()) => {}
        Err(UserStoreError::NotFound) => {
            return Err(AppError::Forbidden("Forbidden".to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(action = "password_updated", email = %email, "Password updated");
    Ok(Json(serde_json::json!({
        "email": email,
        "message": "Password updated"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required(Some("x".to_string()), "email").unwrap(), "x");
        assert!(matches!(
            required(None, "email"),
            Err(AppError::BadRequest(msg)) if msg == "email missing"
        ));
        assert!(matches!(
            required(Some(String::new()), "password"),
            Err(AppError::BadRequest(msg)) if msg == "password missing"
        ));
    }

    #[test]
    fn test_required_or_forbidden() {
        assert_eq!(required_or_forbidden(Some("x".to_string())).unwrap(), "x");
        assert!(matches!(required_or_forbidden(None), Err(AppError::Forbidden(_))));
        assert!(matches!(
            required_or_forbidden(Some(String::new())),
            Err(AppError::Forbidden(_))
        ));
    }
}
