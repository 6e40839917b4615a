//! Session-scoped token storage.
//!
//! The token is an opaque string. Nothing here issues, refreshes or
//! inspects it.

use std::sync::RwLock;

/// Supplies the bearer token for the current session, if any.
pub trait TokenSource {
    fn token(&self) -> Option<String>;
}

impl TokenSource for Option<String> {
    fn token(&self) -> Option<String> {
        self.clone()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for &T {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

/// In-memory token store shared across one session.
#[derive(Debug, Default)]
pub struct SessionStore {
    token: RwLock<Option<String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set(token);
        store
    }

    pub fn set(&self, token: &str) {
        // A poisoned lock still holds a valid Option.
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.to_string());
    }

    pub fn clear(&self) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

impl TokenSource for SessionStore {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .filter(|t| !t.is_empty())
    }
}
