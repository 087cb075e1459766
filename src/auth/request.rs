//! Narrow view of an incoming request.
//!
//! Strategies only ever need a header and a cookie, so they depend on this
//! trait rather than on a concrete HTTP framework type.

use axum::http::{header, request::Parts, HeaderMap};

pub trait AuthRequest {
    /// Value of the named header, if present and valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Value of the named cookie from the `Cookie` header(s).
    fn cookie(&self, name: &str) -> Option<String>;
}

impl AuthRequest for HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.to_str().ok())
    }

    fn cookie(&self, name: &str) -> Option<String> {
        self.get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|raw| find_cookie(raw, name))
    }
}

impl AuthRequest for Parts {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.header(name)
    }

    fn cookie(&self, name: &str) -> Option<String> {
        self.headers.cookie(name)
    }
}

/// Find a cookie value in a raw `Cookie` header (`a=1; b=2`).
pub fn find_cookie(raw: &str, name: &str) -> Option<String> {
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim().trim_matches('"').to_string())
    })
}

/// Build a `Set-Cookie` value for a session token.
pub fn session_cookie_header(name: &str, token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", name, token)
}
