//! User endpoints.

use super::auth::required;
use crate::auth::middleware::{AppState, CurrentUser};
use crate::error::AppError;
use crate::models::{CredentialsForm, MessageResponse, UserInfo};
use crate::storage::user;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Form, Json};

/// POST /api/v1/users: register a new user
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<impl IntoResponse, AppError> {
    let email = required(form.email, "email")?;
    let password = required(form.password, "password")?;

    let user = user::register_user(&state.users, &email, &password)?;

    tracing::info!(action = "user_registered", user_id = %user.id, "New user registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            email: user.email,
            message: "user created".to_string(),
        }),
    ))
}

/// GET /api/v1/users/me: the authenticated user
pub async fn me(user: Option<CurrentUser>) -> Result<Json<UserInfo>, AppError> {
    let CurrentUser(user) = user.ok_or_else(|| AppError::NotFound("Not found".to_string()))?;
    Ok(Json(UserInfo::from(&user)))
}
