//! Loading and error indicators

use leptos::prelude::*;

/// Spinner loading indicator
#[component]
pub fn LoadingSpinner(
    #[prop(default = "w-5 h-5")] size: &'static str,
) -> impl IntoView {
    view! {
        <svg
            class=format!("{} animate-spin text-blue-500", size)
            xmlns="http://www.w3.org/2000/svg"
            fill="none"
            viewBox="0 0 24 24"
        >
            <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
            <path
                class="opacity-75"
                fill="currentColor"
                d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4zm2 5.291A7.962 7.962 0 014 12H0c0 3.042 1.135 5.824 3 7.938l3-2.647z"
            ></path>
        </svg>
    }
}

/// Skeleton loader for content
#[component]
pub fn Skeleton(
    #[prop(default = "h-4 w-full")] class: &'static str,
) -> impl IntoView {
    view! {
        <div class=format!("bg-slate-700 rounded animate-pulse {}", class)></div>
    }
}

/// Inline error message
#[component]
pub fn ErrorBanner(message: String) -> impl IntoView {
    view! {
        <div class="mb-6 p-4 bg-[var(--accent-error)]/10 border border-[var(--accent-error)]/50
                    rounded-[var(--radius-md)] text-[var(--accent-error)] text-sm animate-fade-in">
            {message}
        </div>
    }
}
