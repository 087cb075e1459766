//! Request gate that enforces the active authentication strategy.

use crate::auth::middleware::{AppState, CurrentUser};
use crate::error::AppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Runs before every handler.
///
/// - Exempt paths (and everything under `NoAuth`) pass straight through.
/// - No `Authorization` header and no session cookie: 401.
/// - Credentials present but not resolvable to a user: 403.
/// - Otherwise the user is stored in request extensions for [`CurrentUser`].
///
/// # Usage
///
/// ```rust,ignore
/// let app = routes::api_router()
///     .layer(axum::middleware::from_fn_with_state(state.clone(), authenticate))
///     .with_state(state);
/// ```
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.requires_auth(Some(request.uri().path())) {
        return Ok(next.run(request).await);
    }

    let headers = request.headers();
    if state.strategy.authorization_header(Some(headers)).is_none()
        && state.strategy.session_cookie(Some(headers)).is_none()
    {
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    }

    let Some(user) = state.strategy.current_user(Some(headers)) else {
        tracing::debug!(
            action = "auth_denied",
            path = %request.uri().path(),
            strategy = state.strategy.name(),
            "Credentials did not resolve to a user"
        );
        return Err(AppError::Forbidden("Forbidden".to_string()));
    };

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}
