//! Header component

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api::logout;
use crate::state::AppState;

/// Main application header
#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    let is_auth = Signal::derive({
        let state = state.clone();
        move || state.token.get().is_some()
    });
    let user_name = {
        let state = state.clone();
        move || state.user.get().map(|u| u.display_name()).unwrap_or_default()
    };

    view! {
        <header class="header h-16 sticky top-0 z-40">
            <div class="h-full max-w-7xl mx-auto px-4 flex items-center justify-between">
                <a href="/" class="logo hover:opacity-80 transition-opacity">
                    <img src="/favicon.ico" alt="Parley" class="logo-image" />
                    <h1 class="text-xl font-bold text-gradient">"Parley"</h1>
                </a>

                <nav class="flex items-center gap-2">
                    <Show when=move || is_auth.get()>
                        <a href="/conversations" class="btn btn-ghost">"Conversations"</a>
                        <a href="/monitoring" class="btn btn-ghost">"Monitoring"</a>
                        <a href="/settings" class="btn btn-ghost">"Settings"</a>
                    </Show>

                    {move || {
                        if is_auth.get() {
                            let state = state.clone();
                            let navigate = navigate.clone();
                            view! {
                                <span class="text-sm text-[var(--text-muted)] px-2">{user_name.clone()}</span>
                                <button
                                    on:click=move |_| {
                                        if let Some(token) = state.token.get_untracked() {
                                            let base = state.config.api_base.clone();
                                            spawn_local(async move {
                                                if let Err(e) = logout(&base, &token).await {
                                                    tracing::warn!("logout request failed: {}", e);
                                                }
                                            });
                                        }
                                        state.clear_auth();
                                        navigate(state.config.login_path, Default::default());
                                    }
                                    class="btn btn-ghost"
                                >
                                    "Sign Out"
                                </button>
                            }.into_any()
                        } else {
                            view! {
                                <a href="/login" class="btn btn-primary">"Sign In"</a>
                            }.into_any()
                        }
                    }}
                </nav>
            </div>
        </header>
    }
}
