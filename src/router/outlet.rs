//! Guarded outlet
//!
//! Mounted directly inside the `Router`, with no `Routes` in between. Every
//! pathname change is turned into a [`NavigationRequest`] and checked before
//! any view is built.

use std::sync::Arc;

use leptos::children::ViewFn;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::auth::TokenSource;

use super::guard::{Navigation, NavigationGuard, NavigationRequest};
use super::table::{RouteParams, RouteTable};

/// Page constructor bound to a route
pub type PageView = fn(RouteParams) -> AnyView;

/// What the outlet shows for one navigation
#[derive(Debug, PartialEq)]
pub enum Outcome<'a, V> {
    /// The guard refused; the target view was not resolved
    Redirect(String),
    /// Resolved view of the matched leaf, with its captured params
    Render {
        route: &'static str,
        view: &'a V,
        params: RouteParams,
    },
    NotFound,
}

/// Run the guard for `request` and, only if it allows the transition,
/// resolve the matched leaf's view.
pub fn decide<'a, S, V>(
    routes: &'a RouteTable<V>,
    guard: &NavigationGuard<S>,
    request: &NavigationRequest,
) -> Outcome<'a, V>
where
    S: TokenSource,
{
    if let Navigation::Redirect(path) = guard.check(routes, request) {
        return Outcome::Redirect(path);
    }

    match routes.resolve(&request.to) {
        Some(matched) => {
            let leaf = matched.leaf();
            Outcome::Render {
                route: leaf.name,
                view: leaf.view.resolve(),
                params: matched.into_params(),
            }
        }
        None => Outcome::NotFound,
    }
}

/// Render the view for the current location, or redirect to login
#[component]
pub fn GuardedOutlet<S>(
    routes: Arc<RouteTable<PageView>>,
    guard: Arc<NavigationGuard<S>>,
    /// Rendered when no route matches
    #[prop(into)]
    fallback: ViewFn,
) -> impl IntoView
where
    S: TokenSource + Send + Sync + 'static,
{
    let location = use_location();
    let previous = StoredValue::new(Option::<String>::None);

    move || {
        let to = location.pathname.get();
        let request = NavigationRequest::new(to.clone(), previous.get_value());
        previous.set_value(Some(to.clone()));

        match decide(&*routes, &*guard, &request) {
            Outcome::Redirect(path) => view! { <Redirect path=path /> }.into_any(),
            Outcome::Render {
                route,
                view: page,
                params,
            } => {
                tracing::debug!(route, "rendering route");
                page(params)
            }
            Outcome::NotFound => {
                tracing::warn!(path = %to, "no route matches");
                fallback.run()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokens;
    use crate::router::table::RouteEntry;
    use crate::router::view::ViewProvider;
    use rstest::rstest;

    fn table() -> RouteTable<&'static str> {
        RouteTable::new(
            vec![
                RouteEntry::new("/", "Home", ViewProvider::lazy(|| "home")),
                RouteEntry::new("/login", "Login", ViewProvider::eager("login")),
                RouteEntry::new(
                    "/conversation/:id",
                    "Conversation",
                    ViewProvider::lazy(|| "conversation"),
                )
                .requires_auth(),
                RouteEntry::new("/settings", "Settings", ViewProvider::lazy(|| "settings"))
                    .requires_auth(),
            ],
            "/login",
        )
        .unwrap()
    }

    fn guard(token: Option<&str>) -> NavigationGuard<MemoryTokens> {
        NavigationGuard::new(MemoryTokens::new(token))
    }

    fn is_resolved(table: &RouteTable<&'static str>, name: &str) -> bool {
        table.find(name).map(|e| e.view.is_resolved()).unwrap_or(false)
    }

    #[rstest]
    #[case(NavigationRequest::initial("/settings"))]
    #[case(NavigationRequest::new("/settings", Some("/".to_string())))]
    #[case(NavigationRequest::new("/conversation/9", Some("/login".to_string())))]
    fn test_redirect_never_resolves_target(#[case] request: NavigationRequest) {
        let table = table();
        let outcome = decide(&table, &guard(None), &request);

        assert_eq!(outcome, Outcome::Redirect("/login".to_string()));
        assert!(!is_resolved(&table, "Settings"));
        assert!(!is_resolved(&table, "Conversation"));
    }

    #[rstest]
    #[case(NavigationRequest::initial("/settings"))]
    #[case(NavigationRequest::new("/settings", Some("/conversation/1".to_string())))]
    fn test_allowed_navigation_resolves_target(#[case] request: NavigationRequest) {
        let table = table();
        match decide(&table, &guard(Some("abc123")), &request) {
            Outcome::Render { route, view, params } => {
                assert_eq!(route, "Settings");
                assert_eq!(*view, "settings");
                assert!(params.is_empty());
            }
            other => panic!("expected render, got {:?}", other),
        }
        assert!(is_resolved(&table, "Settings"));
        assert!(!is_resolved(&table, "Home"));
    }

    #[test]
    fn test_render_carries_params() {
        let table = table();
        let request = NavigationRequest::initial("/conversation/a%20b");
        match decide(&table, &guard(Some("abc123")), &request) {
            Outcome::Render { route, params, .. } => {
                assert_eq!(route, "Conversation");
                assert_eq!(params.get("id"), Some("a b"));
            }
            other => panic!("expected render, got {:?}", other),
        }
    }

    #[rstest]
    #[case(None)]
    #[case(Some("abc123"))]
    fn test_unknown_path_is_not_found(#[case] token: Option<&str>) {
        let table = table();
        let outcome = decide(&table, &guard(token), &NavigationRequest::initial("/nowhere"));
        assert_eq!(outcome, Outcome::NotFound);
    }

    #[test]
    fn test_initial_and_later_requests_decide_alike() {
        let table = table();
        for token in [None, Some("abc123")] {
            let guard = guard(token);
            for path in ["/", "/login", "/settings", "/conversation/3", "/nowhere"] {
                let initial = decide(&table, &guard, &NavigationRequest::initial(path));
                let later = decide(
                    &table,
                    &guard,
                    &NavigationRequest::new(path, Some("/".to_string())),
                );
                assert_eq!(initial, later, "path {} token {:?}", path, token);
            }
        }
    }
}
