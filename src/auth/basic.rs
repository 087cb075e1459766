//! HTTP Basic authentication.

use super::codec::{self, Credential};
use super::request::AuthRequest;
use crate::models::User;
use crate::storage::user::UserResolver;
use axum::http::header;
use std::sync::Arc;
use zeroize::Zeroizing;

#[derive(Clone)]
pub struct BasicAuth {
    resolver: Arc<dyn UserResolver>,
}

impl BasicAuth {
    pub fn new(resolver: Arc<dyn UserResolver>) -> Self {
        Self { resolver }
    }

    /// Base64 part of a `Basic` authorization header.
    pub fn extract_base64_authorization_header<'a>(
        &self,
        header: Option<&'a str>,
    ) -> Option<&'a str> {
        codec::extract_base64_token(header?)
    }

    pub fn decode_base64_authorization_header(
        &self,
        token: Option<&str>,
    ) -> Option<Zeroizing<String>> {
        codec::decode_base64_token(token?)
    }

    pub fn extract_user_credentials(&self, decoded: Option<&str>) -> Option<Credential> {
        codec::split_credentials(decoded?)
    }

    /// First user with this email whose password verifies.
    ///
    /// Candidates are tried in resolver order. Lookup errors deny.
    pub fn user_object_from_credentials(&self, email: &str, password: &str) -> Option<User> {
        let candidates = match self.resolver.find_by(&[("email", email)]) {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!(error = %e, "User lookup failed during basic auth");
                return None;
            }
        };

        candidates
            .into_iter()
            .find(|user| self.resolver.verify_secret(user, password))
    }

    /// Raw Base64 token from the request's `Authorization` header.
    pub fn extract_token<R: AuthRequest + ?Sized>(&self, request: &R) -> Option<String> {
        self.extract_base64_authorization_header(request.header(header::AUTHORIZATION.as_str()))
            .map(str::to_string)
    }

    pub fn current_user<R: AuthRequest + ?Sized>(&self, request: &R) -> Option<User> {
        let token = self.extract_token(request)?;
        let decoded = self.decode_base64_authorization_header(Some(token.as_str()))?;
        let credential = self.extract_user_credentials(Some(decoded.as_str()))?;

        let user = self.user_object_from_credentials(&credential.identifier, &credential.secret);
        if user.is_none() {
            tracing::debug!(action = "basic_auth_failed", email = %credential.identifier, "Credentials rejected");
        }
        user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::user::{register_user, InMemoryUserStore, UserStoreError};
    use axum::http::{HeaderMap, HeaderValue};
    use base64::{engine::general_purpose, Engine as _};

    fn basic_header(raw: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let value = format!("Basic {}", general_purpose::STANDARD.encode(raw));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
        headers
    }

    fn auth_with_user(email: &str, password: &str) -> (BasicAuth, User) {
        let store = Arc::new(InMemoryUserStore::new());
        let user = register_user(&store, email, password).unwrap();
        (BasicAuth::new(store), user)
    }

    /// Resolver whose lookups always fail.
    struct BrokenResolver;

    impl UserResolver for BrokenResolver {
        fn find_by(&self, _: &[(&str, &str)]) -> Result<Vec<User>, UserStoreError> {
            Err(UserStoreError::InvalidAttribute("email".to_string()))
        }

        fn find_by_id(&self, _: &str) -> Result<Option<User>, UserStoreError> {
            Err(UserStoreError::NotFound)
        }

        fn verify_secret(&self, _: &User, _: &str) -> bool {
            true
        }
    }

    /// Resolver returning several users with the same email.
    struct DuplicateResolver(Vec<User>);

    impl UserResolver for DuplicateResolver {
        fn find_by(&self, _: &[(&str, &str)]) -> Result<Vec<User>, UserStoreError> {
            Ok(self.0.clone())
        }

        fn find_by_id(&self, _: &str) -> Result<Option<User>, UserStoreError> {
            Ok(None)
        }

        fn verify_secret(&self, user: &User, secret: &str) -> bool {
            user.hashed_password == secret
        }
    }

    /// Resolver that fails the test if it is ever consulted.
    struct UntouchedResolver;

    impl UserResolver for UntouchedResolver {
        fn find_by(&self, fields: &[(&str, &str)]) -> Result<Vec<User>, UserStoreError> {
            panic!("unexpected lookup: {:?}", fields);
        }

        fn find_by_id(&self, id: &str) -> Result<Option<User>, UserStoreError> {
            panic!("unexpected lookup: {}", id);
        }

        fn verify_secret(&self, _: &User, _: &str) -> bool {
            panic!("unexpected verify");
        }
    }

    fn plain_user(id: &str, password: &str) -> User {
        User {
            id: id.to_string(),
            email: "dup@example.com".to_string(),
            hashed_password: password.to_string(),
            reset_token: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_current_user_valid_credentials() {
        let (auth, user) = auth_with_user("alice@example.com", "secret");
        let found = auth.current_user(&basic_header("alice@example.com:secret")).unwrap();
        assert_eq!(found.id, user.id);
    }

    #[test]
    fn test_current_user_wrong_password() {
        let (auth, _) = auth_with_user("alice@example.com", "secret");
        assert!(auth.current_user(&basic_header("alice@example.com:nope")).is_none());
    }

    #[test]
    fn test_current_user_unknown_email() {
        let (auth, _) = auth_with_user("alice@example.com", "secret");
        assert!(auth.current_user(&basic_header("bob@example.com:secret")).is_none());
    }

    #[test]
    fn test_password_containing_colon() {
        let (auth, user) = auth_with_user("alice@example.com", "se:cr:et");
        let found = auth.current_user(&basic_header("alice@example.com:se:cr:et")).unwrap();
        assert_eq!(found.id, user.id);
    }

    #[test]
    fn test_malformed_headers_deny() {
        let (auth, _) = auth_with_user("alice@example.com", "secret");

        assert!(auth.current_user(&HeaderMap::new()).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        assert!(auth.current_user(&headers).is_none());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic %%%%"));
        assert!(auth.current_user(&headers).is_none());

        assert!(auth.current_user(&basic_header("no-colon-here")).is_none());
        assert!(auth.current_user(&basic_header(":")).is_none());
        assert!(auth.current_user(&basic_header("alice@example.com:")).is_none());
        assert!(auth.current_user(&basic_header(":secret")).is_none());
        assert!(auth.extract_user_credentials(Some("a:")).is_none());
        assert!(auth.extract_user_credentials(Some(":b")).is_none());
    }

    #[test]
    fn test_empty_credentials_skip_lookup() {
        let auth = BasicAuth::new(Arc::new(UntouchedResolver));
        assert!(auth.current_user(&basic_header(":")).is_none());
        assert!(auth.current_user(&basic_header("alice@example.com:")).is_none());
        assert!(auth.current_user(&basic_header(":secret")).is_none());
    }

    #[test]
    fn test_step_functions_accept_missing_input() {
        let (auth, _) = auth_with_user("alice@example.com", "secret");
        assert!(auth.extract_base64_authorization_header(None).is_none());
        assert!(auth.decode_base64_authorization_header(None).is_none());
        assert!(auth.extract_user_credentials(None).is_none());
    }

    #[test]
    fn test_extract_token() {
        let (auth, _) = auth_with_user("alice@example.com", "secret");
        let headers = basic_header("alice@example.com:secret");
        assert_eq!(
            auth.extract_token(&headers),
            Some(general_purpose::STANDARD.encode("alice@example.com:secret"))
        );
    }

    #[test]
    fn test_resolver_failure_denies() {
        let auth = BasicAuth::new(Arc::new(BrokenResolver));
        assert!(auth.current_user(&basic_header("alice@example.com:secret")).is_none());
    }

    #[test]
    fn test_first_verifying_candidate_wins() {
        let resolver = DuplicateResolver(vec![
            plain_user("u1", "other"),
            plain_user("u2", "secret"),
            plain_user("u3", "secret"),
        ]);
        let auth = BasicAuth::new(Arc::new(resolver));

        let found = auth.current_user(&basic_header("dup@example.com:secret")).unwrap();
        assert_eq!(found.id, "u2");
    }
}
