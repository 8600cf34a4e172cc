//! Parley UI - Leptos frontend shell
//!
//! Bootstraps the app, owns the route table and gates protected routes on
//! the presence of a locally stored auth token.

pub mod api;
pub mod auth;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod routes;
pub mod state;
pub mod types;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Meta, Title};
use leptos_router::components::Router;

use auth::LocalStorageTokens;
use config::UiConfig;
use pages::not_found::NotFound;
use router::{GuardedOutlet, NavigationGuard};
use state::{AppState, SharedTokens};

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    let config = match UiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}, falling back to defaults", e);
            UiConfig::default()
        }
    };
    let config = Arc::new(config);
    let tokens: SharedTokens = Arc::new(LocalStorageTokens::new(config.token_key.clone()));

    // State store
    provide_context(AppState::new(config, tokens.clone()));

    // Router
    let routes = match routes::app_routes() {
        Ok(table) => Arc::new(table),
        Err(e) => {
            tracing::error!("invalid route table: {}", e);
            return view! { <StartupError message=e.to_string() /> }.into_any();
        }
    };
    provide_context(routes.clone());
    let guard = Arc::new(NavigationGuard::new(tokens));

    // UI metadata
    provide_meta_context();

    view! {
        <Title text="Parley" />
        <Meta name="color-scheme" content="dark" />
        <Router>
            <main class="min-h-screen bg-slate-900 text-slate-100">
                <GuardedOutlet routes=routes guard=guard fallback=|| view! { <NotFound /> } />
            </main>
        </Router>
    }
    .into_any()
}

/// Shown when the app cannot start
#[component]
fn StartupError(message: String) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-3xl font-bold text-slate-300 mb-4">"Parley failed to start"</h1>
                <p class="text-slate-500 font-mono">{message}</p>
            </div>
        </div>
    }
}
