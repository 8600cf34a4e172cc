//! Home/landing page

use leptos::prelude::*;

use crate::components::Header;
use crate::state::AppState;

/// Home page with hero section
#[component]
pub fn HomePage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let is_auth = move || state.token.get().is_some();

    view! {
        <div class="min-h-screen flex flex-col">
            <Header />

            <section class="flex-1 flex items-center justify-center px-4 py-16">
                <div class="max-w-4xl mx-auto text-center">
                    <h1 class="text-5xl md:text-7xl font-bold mb-6 animate-slide-up">
                        <span class="gradient-text">"Parley"</span>
                    </h1>

                    <p class="text-xl md:text-2xl text-slate-400 mb-12 animate-slide-up" style="animation-delay: 0.1s">
                        "Your own assistant, your own history, your own budget."
                    </p>

                    <div class="flex flex-col sm:flex-row gap-4 justify-center animate-slide-up" style="animation-delay: 0.2s">
                        <Show
                            when=is_auth
                            fallback=move || view! {
                                <a href="/login" class="btn btn-primary px-8 py-4 text-lg">"Sign In"</a>
                            }
                        >
                            <a href="/conversations" class="btn btn-primary px-8 py-4 text-lg">"Open Conversations"</a>
                            <a href="/monitoring" class="btn btn-ghost px-8 py-4 text-lg">"Usage & Status"</a>
                        </Show>
                    </div>
                </div>
            </section>

            <section class="py-16 px-4 bg-slate-800/50">
                <div class="max-w-6xl mx-auto grid md:grid-cols-3 gap-8">
                    <FeatureCard
                        icon="💬"
                        title="Conversations"
                        description="Every exchange is kept and can be picked up later"
                    />
                    <FeatureCard
                        icon="📈"
                        title="Monitoring"
                        description="Backend status and token usage at a glance"
                    />
                    <FeatureCard
                        icon="⚙️"
                        title="Settings"
                        description="Profile and password management"
                    />
                </div>
            </section>
        </div>
    }
}

/// Feature card component
#[component]
fn FeatureCard(
    icon: &'static str,
    title: &'static str,
    description: &'static str,
) -> impl IntoView {
    view! {
        <div class="p-6 bg-slate-800 rounded-xl border border-slate-700 hover:border-slate-600 transition-colors">
            <div class="text-4xl mb-4">{icon}</div>
            <h3 class="text-xl font-semibold mb-2">{title}</h3>
            <p class="text-slate-400">{description}</p>
        </div>
    }
}
