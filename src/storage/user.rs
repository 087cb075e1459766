//! User lookup boundary and the in-memory user store.
//!
//! Strategies only see [`UserResolver`]. [`InMemoryUserStore`] is the
//! implementation the server ships with; the account functions at the
//! bottom (`register_user`, `valid_login`, ...) drive registration, login
//! and password reset on top of it.

use crate::auth::password::{self, PasswordError};
use crate::models::{now_secs, User};
use parking_lot::RwLock;

/// Attributes accepted by [`UserResolver::find_by`].
pub const SEARCHABLE_ATTRIBUTES: &[&str] = &["id", "email", "reset_token"];

#[derive(Debug, thiserror::Error)]
pub enum UserStoreError {
    #[error("User not found")]
    NotFound,

    #[error("Invalid user attribute: {0}")]
    InvalidAttribute(String),

    #[error("User {0} already exists")]
    AlreadyExists(String),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Lookup service the authentication strategies depend on.
pub trait UserResolver: Send + Sync {
    /// All users whose attributes equal every `(name, value)` pair, in
    /// insertion order.
    fn find_by(&self, fields: &[(&str, &str)]) -> Result<Vec<User>, UserStoreError>;

    fn find_by_id(&self, id: &str) -> Result<Option<User>, UserStoreError>;

    /// Check a candidate password against the user's stored hash.
    fn verify_secret(&self, user: &User, secret: &str) -> bool;
}

/// Field updates accepted by [`InMemoryUserStore::update_user`].
#[derive(Debug, Clone)]
pub enum UserUpdate {
    HashedPassword(String),
    ResetToken(Option<String>),
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user. Emails are unique.
    pub fn add_user(&self, email: &str, hashed_password: &str) -> Result<User, UserStoreError> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.email == email) {
            return Err(UserStoreError::AlreadyExists(email.to_string()));
        }

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            reset_token: None,
            created_at: now_secs(),
        };
        users.push(user.clone());
        Ok(user)
    }

    /// Apply updates to one user. All or nothing.
    pub fn update_user(&self, id: &str, updates: &[UserUpdate]) -> Result<(), UserStoreError> {
        let mut users = self.users.write();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserStoreError::NotFound)?;

        for update in updates {
            match update {
                UserUpdate::HashedPassword(hash) => user.hashed_password = hash.clone(),
                UserUpdate::ResetToken(token) => user.reset_token = token.clone(),
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

fn attribute_matches(user: &User, name: &str, value: &str) -> bool {
    match name {
        "id" => user.id == value,
        "email" => user.email == value,
        "reset_token" => user.reset_token.as_deref() == Some(value),
        _ => false,
    }
}

impl UserResolver for InMemoryUserStore {
    fn find_by(&self, fields: &[(&str, &str)]) -> Result<Vec<User>, UserStoreError> {
        if let Some((name, _)) = fields
            .iter()
            .find(|(name, _)| !SEARCHABLE_ATTRIBUTES.contains(name))
        {
            return Err(UserStoreError::InvalidAttribute(name.to_string()));
        }

        Ok(self
            .users
            .read()
            .iter()
            .filter(|user| {
                fields
                    .iter()
                    .all(|(name, value)| attribute_matches(user, name, value))
            })
            .cloned()
            .collect())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<User>, UserStoreError> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    fn verify_secret(&self, user: &User, secret: &str) -> bool {
        match password::verify_password(secret, &user.hashed_password) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                false
            }
        }
    }
}

// ============================================================================
// Account operations
// ============================================================================

fn find_one_by_email(store: &InMemoryUserStore, email: &str) -> Result<User, UserStoreError> {
    store
        .find_by(&[("email", email)])?
        .into_iter()
        .next()
        .ok_or(UserStoreError::NotFound)
}

/// Hash the password and create the user.
pub fn register_user(
    store: &InMemoryUserStore,
    email: &str,
    password: &str,
) -> Result<User, UserStoreError> {
    if store.find_by(&[("email", email)])?.first().is_some() {
        return Err(UserStoreError::AlreadyExists(email.to_string()));
    }
    let hashed = password::hash_password(password)?;
    store.add_user(email, &hashed)
}

/// Create the user if the email is free, otherwise replace its password.
pub fn upsert_user(
    store: &InMemoryUserStore,
    email: &str,
    password: &str,
) -> Result<User, UserStoreError> {
    match find_one_by_email(store, email) {
        Ok(user) => {
            let hashed = password::hash_password(password)?;
            store.update_user(&user.id, &[UserUpdate::HashedPassword(hashed)])?;
            find_one_by_email(store, email)
        }
        Err(UserStoreError::NotFound) => register_user(store, email, password),
        Err(e) => Err(e),
    }
}

/// True when the email exists and the password verifies.
pub fn valid_login(store: &InMemoryUserStore, email: &str, password: &str) -> bool {
    match find_one_by_email(store, email) {
        Ok(user) => store.verify_secret(&user, password),
        Err(_) => false,
    }
}

/// Issue and store a fresh reset token for the user with this email.
pub fn get_reset_password_token(
    store: &InMemoryUserStore,
    email: &str,
) -> Result<String, UserStoreError> {
    let user = find_one_by_email(store, email)?;
    let token = uuid::Uuid::new_v4().to_string();
    store.update_user(&user.id, &[UserUpdate::ResetToken(Some(token.clone()))])?;
    Ok(token)
}

/// Replace the password of the user holding `reset_token` and consume the token.
pub fn update_password(
    store: &InMemoryUserStore,
    reset_token: &str,
    new_password: &str,
) -> Result<(), UserStoreError> {
    let user = store
        .find_by(&[("reset_token", reset_token)])?
        .into_iter()
        .next()
        .ok_or(UserStoreError::NotFound)?;

    let hashed = password::hash_password(new_password)?;
    store.update_user(
        &user.id,
        &[
            UserUpdate::HashedPassword(hashed),
            UserUpdate::ResetToken(None),
        ],
    )
}
