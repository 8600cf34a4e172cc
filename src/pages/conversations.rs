//! Conversation list

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{fetch_conversations, ApiError};
use crate::components::{ErrorBanner, Header, Skeleton};
use crate::routes::AppRoutes;
use crate::state::AppState;
use crate::types::ConversationSummary;

/// All conversations of the signed-in user, newest first
#[component]
pub fn ConversationsPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let routes = expect_context::<AppRoutes>();
    let conversations = RwSignal::new(Option::<Result<Vec<ConversationSummary>, ApiError>>::None);

    Effect::new(move |_| {
        let state = state.clone();
        spawn_local(async move {
            let Some(token) = state.token.get_untracked() else {
                return;
            };
            let result = fetch_conversations(&state.config.api_base, &token)
                .await
                .map(|mut list| {
                    list.sort_by(|a, b| {
                        let a = a.updated_at.unwrap_or(a.created_at);
                        let b = b.updated_at.unwrap_or(b.created_at);
                        b.cmp(&a)
                    });
                    list
                });
            if let Err(e) = &result {
                tracing::error!("Failed to load conversations: {}", e);
            }
            conversations.set(Some(result));
        });
    });

    view! {
        <div class="min-h-screen flex flex-col">
            <Header />
            <main class="flex-1 max-w-4xl w-full mx-auto px-4 py-8">
                <h1 class="text-3xl font-bold mb-6">"Conversations"</h1>
                {move || match conversations.get() {
                    None => view! {
                        <div class="space-y-3">
                            <Skeleton class="h-12 w-full" />
                            <Skeleton class="h-12 w-full" />
                            <Skeleton class="h-12 w-full" />
                        </div>
                    }.into_any(),
                    Some(Err(e)) => view! { <ErrorBanner message=e.to_string() /> }.into_any(),
                    Some(Ok(list)) if list.is_empty() => view! {
                        <p class="text-slate-400">"No conversations yet."</p>
                    }.into_any(),
                    Some(Ok(list)) => {
                        let routes = routes.clone();
                        view! {
                            <ul class="space-y-2">
                                {list.into_iter().map(|c| {
                                    let id = c.id.to_string();
                                    let href = routes
                                        .href("Conversation", &[("id", id.as_str())])
                                        .unwrap_or_default();
                                    let when = c.updated_at.unwrap_or(c.created_at);
                                    view! {
                                        <li>
                                            <a
                                                href=href
                                                class="block p-4 bg-slate-800 rounded-xl border border-slate-700 hover:border-blue-500/50 transition-colors"
                                            >
                                                <div class="font-medium">{c.title}</div>
                                                <div class="text-xs text-slate-500 mt-1">
                                                    {when.format("%Y-%m-%d %H:%M").to_string()}
                                                </div>
                                            </a>
                                        </li>
                                    }
                                }).collect::<Vec<_>>()}
                            </ul>
                        }.into_any()
                    }
                }}
            </main>
        </div>
    }
}
