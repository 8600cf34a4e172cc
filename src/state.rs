//! Global application state

use std::sync::Arc;

use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;

use crate::auth::{TokenSource, TokenStore};
use crate::config::UiConfig;
use crate::types::{LoginResponse, User};

const STORAGE_KEY_USER: &str = "user";

/// Shared token storage handle
pub type SharedTokens = Arc<dyn TokenStore + Send + Sync>;

/// Token as the navigation guard sees it; empty counts as absent
fn stored_token<T: TokenSource + ?Sized>(tokens: &T) -> Option<String> {
    tokens.token().filter(|t| !t.is_empty())
}

/// Global application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<UiConfig>,
    /// Where the token is persisted; the navigation guard reads the same store
    pub tokens: SharedTokens,
    /// Authentication token, mirrored from `tokens` for reactive views
    pub token: RwSignal<Option<String>>,
    /// Signed-in user profile
    pub user: RwSignal<Option<User>>,
    /// Error message
    pub error: RwSignal<Option<String>>,
}

impl AppState {
    pub fn new(config: Arc<UiConfig>, tokens: SharedTokens) -> Self {
        let token = stored_token(&*tokens);
        let user: Option<User> = LocalStorage::get(STORAGE_KEY_USER).ok();

        Self {
            config,
            tokens,
            token: RwSignal::new(token),
            user: RwSignal::new(user),
            error: RwSignal::new(None),
        }
    }

    pub fn save_auth(&self, auth: &LoginResponse) {
        self.tokens.store(&auth.access_token);
        self.set_user(auth.user.clone());
        self.token.set(Some(auth.access_token.clone()));
    }

    pub fn clear_auth(&self) {
        self.tokens.clear();
        LocalStorage::delete(STORAGE_KEY_USER);

        // A failed removal leaves the token in place
        self.token.set(stored_token(&*self.tokens));
        self.user.set(None);
    }

    pub fn set_user(&self, user: User) {
        if LocalStorage::set(STORAGE_KEY_USER, &user).is_err() {
            tracing::warn!("failed to cache user profile");
        }
        self.user.set(Some(user));
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.get().is_some()
    }

    pub fn set_error(&self, msg: impl Into<String>) {
        self.error.set(Some(msg.into()));
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokens;

    /// Store whose removal always fails
    struct StuckTokens(MemoryTokens);

    impl TokenSource for StuckTokens {
        fn token(&self) -> Option<String> {
            self.0.token()
        }
    }

    impl TokenStore for StuckTokens {
        fn store(&self, token: &str) {
            self.0.store(token);
        }

        fn clear(&self) {}
    }

    #[test]
    fn test_stored_token_after_failed_clear() {
        let tokens: SharedTokens = Arc::new(StuckTokens(MemoryTokens::new(Some("abc123"))));
        tokens.clear();
        assert_eq!(stored_token(&*tokens).as_deref(), Some("abc123"));
        assert!(tokens.has_token());
    }

    #[test]
    fn test_stored_token_after_clear() {
        let tokens: SharedTokens = Arc::new(MemoryTokens::new(Some("abc123")));
        tokens.clear();
        assert_eq!(stored_token(&*tokens), None);
    }

    #[test]
    fn test_empty_stored_token_is_none() {
        assert_eq!(stored_token(&MemoryTokens::new(Some(""))), None);
    }
}
