//! Shared state and axum extractors for authentication.

use super::exemption::ExemptionList;
use super::strategy::AuthStrategy;
use crate::config::Config;
use crate::error::AppError;
use crate::models::User;
use crate::storage::session::SessionStore;
use crate::storage::user::InMemoryUserStore;
use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use std::convert::Infallible;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<InMemoryUserStore>,
    pub sessions: SessionStore,
    pub strategy: Arc<AuthStrategy>,
    pub exemptions: Arc<ExemptionList>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the configured strategy to the given stores.
    ///
    /// `sessions` is the one store every session strategy built from this
    /// state shares.
    pub fn new(config: Config, users: Arc<InMemoryUserStore>, sessions: SessionStore) -> Self {
        let strategy = AuthStrategy::from_config(
            config.auth_type,
            users.clone(),
            sessions.clone(),
            config.session_name.clone(),
        );
        let exemptions = ExemptionList::new(&config.excluded_paths);

        AppState {
            users,
            sessions,
            strategy: Arc::new(strategy),
            exemptions: Arc::new(exemptions),
            config: Arc::new(config),
        }
    }

    /// Whether a request to `path` must carry valid credentials.
    pub fn requires_auth(&self, path: Option<&str>) -> bool {
        self.strategy.requires_auth(path, Some(self.exemptions.as_slice()))
    }
}

/// The authenticated user for this request.
///
/// Taken from request extensions when the gate middleware already resolved
/// it, otherwise resolved here through the active strategy.
/// Returns 401 Unauthorized when nobody is authenticated.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

fn resolve_current_user(parts: &Parts, state: &AppState) -> Option<CurrentUser> {
    if let Some(user) = parts.extensions.get::<CurrentUser>() {
        return Some(user.clone());
    }
    state
        .strategy
        .current_user(Some(&parts.headers))
        .map(CurrentUser)
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_current_user(parts, state)
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))
    }
}

/// Optional variant: `None` instead of a rejection.
impl OptionalFromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(resolve_current_user(parts, state))
    }
}
