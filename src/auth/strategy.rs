//! The active authentication strategy.
//!
//! One of a closed set of variants, picked at startup from `AUTH_TYPE`.
//! Every operation is total: bad input or failed lookups come back as
//! `None`/`false`, never as an error.

use super::basic::BasicAuth;
use super::exemption;
use super::request::AuthRequest;
use super::session::SessionAuth;
use crate::config::AuthType;
use crate::models::User;
use crate::storage::session::SessionStore;
use crate::storage::user::UserResolver;
use axum::http::header;
use std::sync::Arc;

#[derive(Clone)]
pub enum AuthStrategy {
    /// Authentication disabled: nothing is protected, nobody is identified.
    NoAuth,
    Basic(BasicAuth),
    Session(SessionAuth),
}

impl AuthStrategy {
    /// Build the strategy selected by configuration.
    pub fn from_config(
        auth_type: AuthType,
        resolver: Arc<dyn UserResolver>,
        sessions: SessionStore,
        session_name: Option<String>,
    ) -> Self {
        match auth_type {
            AuthType::None => AuthStrategy::NoAuth,
            AuthType::Basic => AuthStrategy::Basic(BasicAuth::new(resolver)),
            AuthType::Session => {
                AuthStrategy::Session(SessionAuth::new(sessions, resolver, session_name))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AuthStrategy::NoAuth => "none",
            AuthStrategy::Basic(_) => "basic_auth",
            AuthStrategy::Session(_) => "session_auth",
        }
    }

    /// Whether `path` must be authenticated under this strategy.
    pub fn requires_auth(&self, path: Option<&str>, exemptions: Option<&[String]>) -> bool {
        match self {
            AuthStrategy::NoAuth => false,
            AuthStrategy::Basic(_) | AuthStrategy::Session(_) => {
                exemption::requires_auth(path, exemptions)
            }
        }
    }

    /// Raw `Authorization` header value.
    pub fn authorization_header<'r, R: AuthRequest + ?Sized>(
        &self,
        request: Option<&'r R>,
    ) -> Option<&'r str> {
        request?.header(header::AUTHORIZATION.as_str())
    }

    /// Session cookie value. Only the session strategy knows the cookie name.
    pub fn session_cookie<R: AuthRequest + ?Sized>(&self, request: Option<&R>) -> Option<String> {
        match self {
            AuthStrategy::Session(auth) => auth.session_cookie(request?),
            AuthStrategy::NoAuth | AuthStrategy::Basic(_) => None,
        }
    }

    pub fn extract_token<R: AuthRequest + ?Sized>(&self, request: Option<&R>) -> Option<String> {
        match self {
            AuthStrategy::NoAuth => None,
            AuthStrategy::Basic(auth) => auth.extract_token(request?),
            AuthStrategy::Session(auth) => auth.extract_token(request?),
        }
    }

    pub fn current_user<R: AuthRequest + ?Sized>(&self, request: Option<&R>) -> Option<User> {
        match self {
            AuthStrategy::NoAuth => None,
            AuthStrategy::Basic(auth) => auth.current_user(request?),
            AuthStrategy::Session(auth) => auth.current_user(request?),
        }
    }

    pub fn as_session(&self) -> Option<&SessionAuth> {
        match self {
            AuthStrategy::Session(auth) => Some(auth),
            AuthStrategy::NoAuth | AuthStrategy::Basic(_) => None,
        }
    }
}

impl std::fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AuthStrategy").field(&self.name()).finish()
    }
}
