//! Auth token storage
//!
//! The token is an opaque string kept in browser local storage. Nothing here
//! validates it: a non-empty value under the key counts as signed in.

use std::sync::{Arc, Mutex};

/// Read access to the current auth token
pub trait TokenSource {
    /// The stored token, or `None` if absent or unreadable
    fn token(&self) -> Option<String>;

    /// Presence check used by the navigation guard. Empty strings count as
    /// absent.
    fn has_token(&self) -> bool {
        self.token().is_some_and(|t| !t.is_empty())
    }
}

/// Token storage that the login and logout flows write to
pub trait TokenStore: TokenSource {
    fn store(&self, token: &str);
    fn clear(&self);
}

impl<T: TokenSource + ?Sized> TokenSource for Arc<T> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    fn store(&self, token: &str) {
        (**self).store(token)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// Token kept as a raw string in `window.localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorageTokens {
    key: String,
}

impl LocalStorageTokens {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl TokenSource for LocalStorageTokens {
    fn token(&self) -> Option<String> {
        Self::storage()?.get_item(&self.key).ok().flatten()
    }
}

impl TokenStore for LocalStorageTokens {
    fn store(&self, token: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(&self.key, token).is_err() {
                    tracing::warn!(key = %self.key, "failed to write auth token");
                }
            }
            None => tracing::warn!("local storage unavailable, token not persisted"),
        }
    }

    fn clear(&self) {
        match Self::storage() {
            Some(storage) => {
                if storage.remove_item(&self.key).is_err() {
                    tracing::warn!(key = %self.key, "failed to remove auth token");
                }
            }
            None => tracing::warn!("local storage unavailable, token not removed"),
        }
    }
}

/// In-process token holder
#[derive(Debug, Default)]
pub struct MemoryTokens {
    token: Mutex<Option<String>>,
}

impl MemoryTokens {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: Mutex::new(token.map(str::to_string)),
        }
    }
}

impl TokenSource for MemoryTokens {
    fn token(&self) -> Option<String> {
        // A poisoned lock reads as signed out
        self.token.lock().ok().and_then(|t| t.clone())
    }
}

impl TokenStore for MemoryTokens {
    fn store(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}
