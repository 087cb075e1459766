//! Cookie-backed session authentication.
//!
//! The client presents a session token in the cookie named by
//! `SESSION_NAME`. Tokens are random UUIDv4 strings issued by
//! [`SessionAuth::create_session`] and live in the shared [`SessionStore`]
//! until [`SessionAuth::destroy_session`] removes them.

use super::request::AuthRequest;
use crate::models::User;
use crate::storage::session::SessionStore;
use crate::storage::user::UserResolver;
use std::sync::Arc;

#[derive(Clone)]
pub struct SessionAuth {
    store: SessionStore,
    resolver: Arc<dyn UserResolver>,
    cookie_name: Option<String>,
}

/// Generate a fresh session token (UUIDv4, hyphenated).
pub fn generate_session_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A user id is usable as a session owner when it is non-empty and has no
/// surrounding whitespace or control characters.
fn is_well_formed_user_id(user_id: &str) -> bool {
    !user_id.is_empty()
        && user_id.trim() == user_id
        && !user_id.chars().any(char::is_control)
}

impl SessionAuth {
    pub fn new(
        store: SessionStore,
        resolver: Arc<dyn UserResolver>,
        cookie_name: Option<String>,
    ) -> Self {
        Self {
            store,
            resolver,
            cookie_name,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn cookie_name(&self) -> Option<&str> {
        self.cookie_name.as_deref()
    }

    /// Session token carried by the request's cookie.
    pub fn session_cookie<R: AuthRequest + ?Sized>(&self, request: &R) -> Option<String> {
        request.cookie(self.cookie_name.as_deref()?)
    }

    pub fn extract_token<R: AuthRequest + ?Sized>(&self, request: &R) -> Option<String> {
        self.session_cookie(request)
    }

    /// Start a session for `user_id` and return its new token.
    ///
    /// Every call issues a distinct token, even for the same user.
    pub fn create_session(&self, user_id: Option<&str>) -> Option<String> {
        let user_id = user_id.filter(|id| is_well_formed_user_id(id))?;

        let token = generate_session_token();
        self.store.insert(token.clone(), user_id.to_string());
        tracing::debug!(action = "session_created", user_id = %user_id, "Session created");
        Some(token)
    }

    pub fn user_id_for_session(&self, token: Option<&str>) -> Option<String> {
        self.store.get(token?)
    }

    pub fn current_user<R: AuthRequest + ?Sized>(&self, request: &R) -> Option<User> {
        let token = self.session_cookie(request)?;
        let user_id = self.user_id_for_session(Some(token.as_str()))?;

        match self.resolver.find_by_id(&user_id) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "User lookup failed for session");
                None
            }
        }
    }

    /// End the session referenced by the request's cookie.
    ///
    /// Returns false when there is no request, no cookie, or no such session.
    pub fn destroy_session<R: AuthRequest + ?Sized>(&self, request: Option<&R>) -> bool {
        let Some(token) = request.and_then(|r| self.session_cookie(r)) else {
            return false;
        };

        match self.store.remove(&token) {
            Some(user_id) => {
                tracing::debug!(action = "session_destroyed", user_id = %user_id, "Session destroyed");
                true
            }
            None => false,
        }
    }
}
