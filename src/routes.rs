//! Application route table

use std::sync::Arc;

use leptos::prelude::*;

use crate::config::LOGIN_PATH;
use crate::pages::{
    conversation::ConversationPage, conversations::ConversationsPage, home::HomePage,
    login::LoginPage, monitoring::MonitoringPage, settings::SettingsPage,
};
use crate::router::outlet::PageView;
use crate::router::{RouteEntry, RouteError, RouteParams, RouteTable, ViewProvider};

/// Route table shared through context
pub type AppRoutes = Arc<RouteTable<PageView>>;

fn home(_: RouteParams) -> AnyView {
    view! { <HomePage /> }.into_any()
}

fn login(_: RouteParams) -> AnyView {
    view! { <LoginPage /> }.into_any()
}

fn conversations(_: RouteParams) -> AnyView {
    view! { <ConversationsPage /> }.into_any()
}

fn conversation(params: RouteParams) -> AnyView {
    let id = params.get("id").unwrap_or_default().to_string();
    view! { <ConversationPage id=id /> }.into_any()
}

fn monitoring(_: RouteParams) -> AnyView {
    view! { <MonitoringPage /> }.into_any()
}

fn settings(_: RouteParams) -> AnyView {
    view! { <SettingsPage /> }.into_any()
}

/// Build the route table. The login page is loaded eagerly, everything
/// else on first visit.
pub fn app_routes() -> Result<RouteTable<PageView>, RouteError> {
    RouteTable::new(
        vec![
            RouteEntry::new("/", "Home", ViewProvider::lazy(|| home as PageView)),
            RouteEntry::new("/login", "Login", ViewProvider::eager(login as PageView)),
            RouteEntry::new(
                "/conversations",
                "Conversations",
                ViewProvider::lazy(|| conversations as PageView),
            )
            .requires_auth(),
            RouteEntry::new(
                "/conversation/:id",
                "Conversation",
                ViewProvider::lazy(|| conversation as PageView),
            )
            .requires_auth(),
            RouteEntry::new(
                "/monitoring",
                "Monitoring",
                ViewProvider::lazy(|| monitoring as PageView),
            )
            .requires_auth(),
            RouteEntry::new("/settings", "Settings", ViewProvider::lazy(|| settings as PageView))
                .requires_auth(),
        ],
        LOGIN_PATH,
    )
}
