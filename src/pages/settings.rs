//! Account settings

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{change_password, load_profile};
use crate::components::{ErrorBanner, Header, LoadingSpinner};
use crate::state::AppState;
use crate::types::PasswordChange;

const MIN_PASSWORD_LEN: usize = 8;

/// Check the password form before it is sent
pub fn validate_password_change(
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<PasswordChange, &'static str> {
    if current.is_empty() {
        return Err("Enter your current password");
    }
    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err("New password must be at least 8 characters");
    }
    if new != confirm {
        return Err("Passwords do not match");
    }
    if new == current {
        return Err("New password must differ from the current one");
    }
    Ok(PasswordChange {
        current_password: current.to_string(),
        new_password: new.to_string(),
    })
}

/// Profile and password management
#[component]
pub fn SettingsPage() -> impl IntoView {
    let state = expect_context::<AppState>();

    let current = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let is_saving = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);
    let notice = RwSignal::new(Option::<String>::None);

    let state_for_load = state.clone();
    Effect::new(move |_| {
        load_profile(state_for_load.clone());
    });

    let state_for_submit = state.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        notice.set(None);

        let change = match validate_password_change(
            &current.get_untracked(),
            &new_password.get_untracked(),
            &confirm.get_untracked(),
        ) {
            Ok(change) => change,
            Err(msg) => {
                error.set(Some(msg.to_string()));
                return;
            }
        };
        let Some(token) = state_for_submit.token.get_untracked() else {
            return;
        };
        let base_url = state_for_submit.config.api_base.clone();

        spawn_local(async move {
            is_saving.set(true);
            let result = change_password(&base_url, &token, &change).await;
            is_saving.set(false);

            match result {
                Ok(resp) => {
                    current.set(String::new());
                    new_password.set(String::new());
                    confirm.set(String::new());
                    notice.set(Some(resp.message));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    let profile = move || {
        state.user.get().map(|user| {
            let last_login = user
                .last_login
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string());
            view! {
                <dl class="grid grid-cols-2 gap-2 text-sm">
                    <dt class="text-slate-400">"Username"</dt>
                    <dd>{user.username.clone().unwrap_or_default()}</dd>
                    <dt class="text-slate-400">"Email"</dt>
                    <dd>{user.email.clone().unwrap_or_default()}</dd>
                    <dt class="text-slate-400">"Role"</dt>
                    <dd>{if user.is_admin { "Administrator" } else { "User" }}</dd>
                    <dt class="text-slate-400">"Member since"</dt>
                    <dd>{user.created_at.format("%Y-%m-%d").to_string()}</dd>
                    <dt class="text-slate-400">"Last login"</dt>
                    <dd>{last_login}</dd>
                </dl>
            }
        })
    };

    view! {
        <div class="min-h-screen flex flex-col">
            <Header />
            <main class="flex-1 max-w-2xl w-full mx-auto px-4 py-8 space-y-8">
                <h1 class="text-3xl font-bold">"Settings"</h1>

                <section class="p-6 bg-slate-800 rounded-xl border border-slate-700">
                    <h2 class="text-lg font-semibold mb-4">"Profile"</h2>
                    {profile}
                </section>

                <section class="p-6 bg-slate-800 rounded-xl border border-slate-700">
                    <h2 class="text-lg font-semibold mb-4">"Change password"</h2>

                    {move || error.get().map(|message| view! { <ErrorBanner message=message /> })}
                    {move || notice.get().map(|message| view! {
                        <div class="mb-6 p-4 text-sm text-green-400">{message}</div>
                    })}

                    <form on:submit=on_submit class="auth-form">
                        <input
                            type="password"
                            placeholder="Current password"
                            autocomplete="current-password"
                            prop:value=move || current.get()
                            on:input=move |ev| current.set(event_target_value(&ev))
                            class="input"
                        />
                        <input
                            type="password"
                            placeholder="New password"
                            autocomplete="new-password"
                            prop:value=move || new_password.get()
                            on:input=move |ev| new_password.set(event_target_value(&ev))
                            class="input"
                        />
                        <input
                            type="password"
                            placeholder="Confirm new password"
                            autocomplete="new-password"
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                            class="input"
                        />
                        <button type="submit" disabled=move || is_saving.get() class="btn btn-primary">
                            <Show when=move || is_saving.get()>
                                <LoadingSpinner />
                            </Show>
                            "Update password"
                        </button>
                    </form>
                </section>
            </main>
        </div>
    }
}
