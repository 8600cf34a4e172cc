//! Login page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api::login;
use crate::components::{ErrorBanner, Header, LoadingSpinner};
use crate::state::AppState;

/// Where a successful sign-in lands
const AFTER_LOGIN: &str = "/conversations";

/// Login page
///
/// Reachable with or without a token; a signed-in visitor sees a notice
/// instead of being bounced elsewhere.
#[component]
pub fn LoginPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let is_loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    let signed_in_as = {
        let state = state.clone();
        move || {
            state.token.get().map(|_| {
                state
                    .user
                    .get()
                    .map(|u| u.display_name())
                    .unwrap_or_else(|| "an existing account".to_string())
            })
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let username_val = username.get_untracked();
        let password_val = password.get_untracked();
        let state = state.clone();
        let navigate = navigate.clone();

        spawn_local(async move {
            is_loading.set(true);
            error.set(None);

            let base_url = state.config.api_base.clone();
            let result = login(&base_url, &username_val, &password_val).await;

            is_loading.set(false);

            match result {
                Ok(auth) => {
                    tracing::info!(user = %auth.user.display_name(), "signed in");
                    state.save_auth(&auth);
                    password.set(String::new());
                    navigate(AFTER_LOGIN, Default::default());
                }
                Err(e) => {
                    tracing::warn!("login failed: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="min-h-screen flex flex-col bg-[var(--bg-primary)]">
            <Header />

            <main class="auth-container flex-1">
                <div class="w-full max-w-md px-4">
                    <div class="auth-card">
                        <div class="auth-header">
                            <h1 class="auth-title text-gradient">"Welcome Back"</h1>
                            <p class="auth-subtitle">"Sign in to continue"</p>
                        </div>

                        {move || signed_in_as().map(|name| view! {
                            <div class="mb-6 card p-4 text-sm text-[var(--text-secondary)]">
                                "You are already signed in as " {name} ". "
                                <a href=AFTER_LOGIN class="auth-link">"Go to conversations"</a>
                            </div>
                        })}

                        {move || error.get().map(|message| view! { <ErrorBanner message=message /> })}

                        <form on:submit=on_submit class="auth-form">
                            <div class="auth-input-group">
                                <label class="auth-label">"Username"</label>
                                <input
                                    type="text"
                                    prop:value=move || username.get()
                                    on:input=move |ev| username.set(event_target_value(&ev))
                                    placeholder="username"
                                    autocomplete="username"
                                    required=true
                                    class="input"
                                />
                            </div>

                            <div class="auth-input-group">
                                <label class="auth-label">"Password"</label>
                                <input
                                    type="password"
                                    prop:value=move || password.get()
                                    on:input=move |ev| password.set(event_target_value(&ev))
                                    placeholder="••••••••"
                                    autocomplete="current-password"
                                    required=true
                                    class="input"
                                />
                            </div>

                            <button
                                type="submit"
                                disabled=move || is_loading.get()
                                class="btn btn-primary w-full py-3"
                            >
                                <Show when=move || is_loading.get()>
                                    <LoadingSpinner />
                                </Show>
                                "Sign In"
                            </button>
                        </form>
                    </div>
                </div>
            </main>
        </div>
    }
}
