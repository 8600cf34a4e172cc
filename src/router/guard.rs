//! Navigation guard
//!
//! Runs before every route transition, including the initial load. If the
//! target's matched chain contains a protected route and no auth token is
//! present, the transition is replaced by a redirect to the login route.
//! Token presence is the whole check: no signature, expiry or revocation.

use crate::auth::TokenSource;

use super::table::RouteTable;

/// A pending transition, consumed once by [`NavigationGuard::check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub to: String,
    pub from: Option<String>,
}

impl NavigationRequest {
    pub fn new(to: impl Into<String>, from: Option<String>) -> Self {
        Self {
            to: to.into(),
            from,
        }
    }

    /// The first navigation after the app starts
    pub fn initial(to: impl Into<String>) -> Self {
        Self::new(to, None)
    }
}

/// Guard outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(String),
}

pub struct NavigationGuard<S> {
    tokens: S,
}

impl<S: TokenSource> NavigationGuard<S> {
    pub fn new(tokens: S) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    pub fn check<V>(&self, table: &RouteTable<V>, request: &NavigationRequest) -> Navigation {
        let protected = table
            .resolve(&request.to)
            .is_some_and(|m| m.requires_auth());

        if protected && !self.tokens.has_token() {
            tracing::info!(
                to = %request.to,
                from = ?request.from,
                "no auth token, redirecting to login"
            );
            return Navigation::Redirect(table.login_path().to_string());
        }

        tracing::debug!(to = %request.to, protected, "navigation allowed");
        Navigation::Proceed
    }
}
