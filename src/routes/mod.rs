//! API route handlers.

pub mod auth;
pub mod index;
pub mod users;

use crate::auth::middleware::AppState;
use crate::middleware::authenticate;
use axum::{routing::get, routing::post, Router};
use tower_http::trace::TraceLayer;

/// Build the API router with all endpoints.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Probes
        .route("/api/v1/status", get(index::status))
        .route("/api/v1/unauthorized", get(index::unauthorized))
        .route("/api/v1/forbidden", get(index::forbidden))
        // Users
        .route("/api/v1/users", post(users::register))
        .route("/api/v1/users/me", get(users::me))
        // Sessions
        .route("/api/v1/auth_session/login", post(auth::login))
        .route(
            "/api/v1/auth_session/logout",
            axum::routing::delete(auth::logout),
        )
        // Password reset
        .route(
            "/api/v1/reset_password",
            post(auth::reset_password_token).put(auth::update_password),
        )
}

/// Full application: routes behind the authentication gate, with request tracing.
pub fn app(state: AppState) -> Router {
    api_router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            authenticate,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
