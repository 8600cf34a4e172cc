//! Backend monitoring page

use std::time::Duration;

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{fetch_health, ApiError};
use crate::components::{ErrorBanner, Header, LoadingSpinner};
use crate::state::AppState;
use crate::types::HealthStatus;

const POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
struct HealthCheck {
    result: Result<HealthStatus, ApiError>,
    checked_at: DateTime<Utc>,
}

fn check_health(base_url: String, last: RwSignal<Option<HealthCheck>>) {
    spawn_local(async move {
        let result = fetch_health(&base_url).await;
        if let Err(e) = &result {
            tracing::warn!("health check failed: {}", e);
        }
        last.set(Some(HealthCheck {
            result,
            checked_at: Utc::now(),
        }));
    });
}

/// Backend status, polled while the page is open
#[component]
pub fn MonitoringPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let base_url = state.config.api_base.clone();
    let last = RwSignal::new(Option::<HealthCheck>::None);

    check_health(base_url.clone(), last);

    let poll_base = base_url.clone();
    match set_interval_with_handle(move || check_health(poll_base.clone(), last), POLL_INTERVAL) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(_) => tracing::warn!("could not schedule health polling"),
    }

    let refresh_base = base_url.clone();

    view! {
        <div class="min-h-screen flex flex-col">
            <Header />
            <main class="flex-1 max-w-4xl w-full mx-auto px-4 py-8">
                <div class="flex items-center justify-between mb-6">
                    <h1 class="text-3xl font-bold">"Monitoring"</h1>
                    <button
                        class="btn btn-ghost"
                        on:click=move |_| check_health(refresh_base.clone(), last)
                    >
                        "Check now"
                    </button>
                </div>

                <div class="p-6 bg-slate-800 rounded-xl border border-slate-700">
                    <div class="text-sm text-slate-400 mb-2">"Backend"</div>
                    <div class="font-mono text-sm mb-4">{base_url}</div>
                    {move || match last.get() {
                        None => view! { <LoadingSpinner /> }.into_any(),
                        Some(check) => {
                            let checked = check.checked_at.format("%H:%M:%S UTC").to_string();
                            match check.result {
                                Ok(health) if health.is_ok() => view! {
                                    <div class="text-green-400 font-semibold">"● Online"</div>
                                    <div class="text-xs text-slate-500 mt-2">"Last checked " {checked}</div>
                                }.into_any(),
                                Ok(health) => view! {
                                    <div class="text-amber-400 font-semibold">"● Degraded: " {health.status}</div>
                                    <div class="text-xs text-slate-500 mt-2">"Last checked " {checked}</div>
                                }.into_any(),
                                Err(e) => view! {
                                    <div class="text-red-400 font-semibold mb-2">"● Offline"</div>
                                    <ErrorBanner message=e.to_string() />
                                    <div class="text-xs text-slate-500">"Last checked " {checked}</div>
                                }.into_any(),
                            }
                        }
                    }}
                </div>
            </main>
        </div>
    }
}
