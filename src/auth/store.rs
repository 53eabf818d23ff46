//! Session-scoped key/value storage
//!
//! The bearer token and the OAuth CSRF nonce are the only session state
//! the crate keeps. Both live behind an injectable store interface so the
//! rest of the system never touches a concrete global and tests can
//! substitute an in-memory fake.

use std::collections::HashMap;
use std::sync::RwLock;

/// Storage key for the GitHub bearer token
pub const ACCESS_TOKEN_KEY: &str = "github_access_token";

/// Storage key for the single-use OAuth CSRF nonce
pub const CSRF_STATE_KEY: &str = "oauth_csrf_state";

/// Injectable session store
///
/// Implementations must be safe to share across tasks; the fetcher reads
/// the token before every authenticated request while the session manager
/// owns all writes.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn delete(&self, key: &str);
}

/// Default in-memory store (one browser-session equivalent per process)
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    // A poisoned lock only means a panic elsewhere mid-access; the map
    // itself stays valid, so reads and writes continue on the inner value.
    fn get(&self, key: &str) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.inner
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    fn delete(&self, key: &str) {
        self.inner
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }
}
