//! In-memory session store.
//!
//! Maps session token -> user id. One store is created at startup and the
//! same handle is cloned into every strategy that needs it; clones share the
//! underlying map. Nothing is persisted and entries never expire: the only
//! way out is [`SessionStore::remove`].

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `token -> user_id`, replacing any previous owner of the token.
    pub fn insert(&self, token: String, user_id: String) {
        self.inner.lock().insert(token, user_id);
    }

    /// User id bound to `token`.
    pub fn get(&self, token: &str) -> Option<String> {
        self.inner.lock().get(token).cloned()
    }

    /// Remove `token` and return its user id.
    ///
    /// Lookup and removal happen under one lock, so two concurrent removals
    /// of the same token cannot both succeed.
    pub fn remove(&self, token: &str) -> Option<String> {
        self.inner.lock().remove(token)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
