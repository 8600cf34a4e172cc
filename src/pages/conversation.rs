//! Single conversation view

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{fetch_conversation, ApiError};
use crate::components::{ErrorBanner, Header, LoadingSpinner, MessageContent};
use crate::state::AppState;
use crate::types::{Conversation, Message, MessageRole};

/// Messages of one conversation
#[component]
pub fn ConversationPage(id: String) -> impl IntoView {
    let state = expect_context::<AppState>();
    let conversation = RwSignal::new(Option::<Result<Conversation, ApiError>>::None);

    Effect::new(move |_| {
        let state = state.clone();
        let id = id.clone();
        spawn_local(async move {
            let Some(token) = state.token.get_untracked() else {
                return;
            };
            let result = fetch_conversation(&state.config.api_base, &token, &id).await;
            if let Err(e) = &result {
                tracing::error!(conversation = %id, "Failed to load conversation: {}", e);
            }
            conversation.set(Some(result));
        });
    });

    view! {
        <div class="min-h-screen flex flex-col">
            <Header />
            <main class="flex-1 max-w-4xl w-full mx-auto px-4 py-8">
                <a href="/conversations" class="text-sm text-slate-400 hover:text-slate-200">"← All conversations"</a>
                {move || match conversation.get() {
                    None => view! {
                        <div class="flex justify-center py-16"><LoadingSpinner size="w-8 h-8" /></div>
                    }.into_any(),
                    Some(Err(e)) => view! { <ErrorBanner message=e.to_string() /> }.into_any(),
                    Some(Ok(c)) => view! {
                        <h1 class="text-2xl font-bold my-6">{c.title}</h1>
                        <div class="flex flex-col gap-4">
                            {c.messages.into_iter().map(|m| view! { <MessageBubble message=m /> }).collect::<Vec<_>>()}
                        </div>
                    }.into_any(),
                }}
            </main>
        </div>
    }
}

#[component]
fn MessageBubble(message: Message) -> impl IntoView {
    let is_user = message.role == MessageRole::User;
    let tokens = message.total_tokens();

    view! {
        <div class=format!(
            "flex flex-col gap-1 max-w-[80%] {}",
            if is_user { "self-end items-end" } else { "self-start items-start" }
        )>
            <div class=if is_user {
                "px-4 py-3 rounded-2xl bg-blue-600 text-white rounded-tr-sm"
            } else {
                "px-4 py-3 rounded-2xl bg-slate-800 text-slate-100 rounded-tl-sm"
            }>
                <MessageContent content=message.content />
            </div>
            <span class="text-xs text-slate-600">
                {message.created_at.format("%H:%M").to_string()}
                {tokens.map(|t| format!(" · {} tokens", t))}
            </span>
        </div>
    }
}
