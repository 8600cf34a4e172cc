//! Route table: ordered path to view bindings with auth metadata

use std::collections::{BTreeMap, HashSet};

use super::view::ViewProvider;

/// Errors raised while building a [`RouteTable`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("Invalid route path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("Duplicate route name: {0}")]
    DuplicateName(String),

    #[error("No route matches the login path {0}")]
    MissingLoginRoute(String),

    #[error("Login route {0} must not require authentication")]
    LoginRequiresAuth(String),
}

/// Annotations consulted by the navigation guard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
}

/// A single route binding
#[derive(Debug)]
pub struct RouteEntry<V> {
    pub path: &'static str,
    pub name: &'static str,
    pub view: ViewProvider<V>,
    pub meta: RouteMeta,
    pub children: Vec<RouteEntry<V>>,
}

impl<V> RouteEntry<V> {
    pub fn new(path: &'static str, name: &'static str, view: ViewProvider<V>) -> Self {
        Self {
            path,
            name,
            view,
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    /// Mark this route (and everything nested under it) as protected
    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    pub fn child(mut self, child: RouteEntry<V>) -> Self {
        self.children.push(child);
        self
    }
}

/// Path parameters captured during matching, already percent-decoded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, name: &str, value: String) {
        self.0.insert(name.to_string(), value);
    }
}

/// Result of resolving a location against the table.
///
/// Only [`RouteTable::resolve`] builds one, and always with a non-empty chain.
#[derive(Debug)]
pub struct RouteMatch<'a, V> {
    /// Matched entries, outermost ancestor first, leaf last
    matched: Vec<&'a RouteEntry<V>>,
    leaf: &'a RouteEntry<V>,
    params: RouteParams,
}

impl<'a, V> RouteMatch<'a, V> {
    pub fn leaf(&self) -> &'a RouteEntry<V> {
        self.leaf
    }

    pub fn matched(&self) -> &[&'a RouteEntry<V>] {
        &self.matched
    }

    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    pub fn into_params(self) -> RouteParams {
        self.params
    }

    pub fn name(&self) -> &'static str {
        self.leaf().name
    }

    /// True if any entry in the chain is protected
    pub fn requires_auth(&self) -> bool {
        self.matched.iter().any(|entry| entry.meta.requires_auth)
    }
}

/// Ordered, immutable set of routes
#[derive(Debug)]
pub struct RouteTable<V> {
    routes: Vec<RouteEntry<V>>,
    login_path: &'static str,
}

impl<V> RouteTable<V> {
    /// Build and validate a table. `login_path` is where the guard sends
    /// unauthenticated visitors, so it has to resolve to an open route.
    pub fn new(routes: Vec<RouteEntry<V>>, login_path: &'static str) -> Result<Self, RouteError> {
        let mut names = HashSet::new();
        validate(&routes, true, &mut names)?;

        let table = Self { routes, login_path };
        let login_protected = table.resolve(login_path).map(|m| m.requires_auth());
        match login_protected {
            None => Err(RouteError::MissingLoginRoute(login_path.to_string())),
            Some(true) => Err(RouteError::LoginRequiresAuth(login_path.to_string())),
            Some(false) => Ok(table),
        }
    }

    pub fn login_path(&self) -> &'static str {
        self.login_path
    }

    pub fn routes(&self) -> &[RouteEntry<V>] {
        &self.routes
    }

    /// Match a location (path, optionally with query and fragment).
    ///
    /// Entries are tried in declaration order and children before their
    /// parent. Returns `None` when nothing matches.
    pub fn resolve(&self, location: &str) -> Option<RouteMatch<'_, V>> {
        let segments = split_location(location);
        let (matched, params) = match_entries(&self.routes, "", &segments)?;
        let leaf = *matched.last()?;
        Some(RouteMatch {
            matched,
            leaf,
            params,
        })
    }

    /// Find a route by name anywhere in the table
    pub fn find(&self, name: &str) -> Option<&RouteEntry<V>> {
        fn walk<'a, V>(entries: &'a [RouteEntry<V>], name: &str) -> Option<&'a RouteEntry<V>> {
            entries.iter().find_map(|entry| {
                if entry.name == name {
                    Some(entry)
                } else {
                    walk(&entry.children, name)
                }
            })
        }
        walk(&self.routes, name)
    }

    /// Build the concrete path of a named route, filling `:param` segments.
    ///
    /// Returns `None` for an unknown name or a missing parameter.
    pub fn href(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        let pattern = full_pattern(&self.routes, "", name)?;
        let mut out = String::new();
        for segment in pattern.split('/').filter(|s| !s.is_empty()) {
            out.push('/');
            match segment.strip_prefix(':') {
                Some(param) => {
                    let (_, value) = params.iter().find(|(key, _)| *key == param)?;
                    out.push_str(&urlencoding::encode(value));
                }
                None => out.push_str(segment),
            }
        }
        if out.is_empty() {
            out.push('/');
        }
        Some(out)
    }
}

fn validate<V>(
    entries: &[RouteEntry<V>],
    top_level: bool,
    names: &mut HashSet<&'static str>,
) -> Result<(), RouteError> {
    for entry in entries {
        if top_level && !entry.path.starts_with('/') {
            return Err(RouteError::InvalidPath {
                path: entry.path.to_string(),
                reason: "top-level paths must start with '/'",
            });
        }
        if entry.path.split('/').any(|segment| segment == ":") {
            return Err(RouteError::InvalidPath {
                path: entry.path.to_string(),
                reason: "parameter segment without a name",
            });
        }
        if !names.insert(entry.name) {
            return Err(RouteError::DuplicateName(entry.name.to_string()));
        }
        validate(&entry.children, false, names)?;
    }
    Ok(())
}

/// Path segments of a location, without query, fragment or empty segments
fn split_location(location: &str) -> Vec<&str> {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    location[..end].split('/').filter(|s| !s.is_empty()).collect()
}

fn join(parent: &str, path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("{}/{}", parent.trim_end_matches('/'), path)
    }
}

type Matched<'a, V> = (Vec<&'a RouteEntry<V>>, RouteParams);

fn match_entries<'a, V>(
    entries: &'a [RouteEntry<V>],
    parent: &str,
    segments: &[&str],
) -> Option<Matched<'a, V>> {
    for entry in entries {
        let pattern = join(parent, entry.path);

        if let Some((mut chain, params)) = match_entries(&entry.children, &pattern, segments) {
            chain.insert(0, entry);
            return Some((chain, params));
        }
        if let Some(params) = match_pattern(&pattern, segments) {
            return Some((vec![entry], params));
        }
    }
    None
}

fn match_pattern(pattern: &str, segments: &[&str]) -> Option<RouteParams> {
    let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if parts.len() != segments.len() {
        return None;
    }

    let mut params = RouteParams::default();
    for (part, segment) in parts.iter().zip(segments) {
        match part.strip_prefix(':') {
            Some(name) => {
                let value = urlencoding::decode(segment)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| segment.to_string());
                params.insert(name, value);
            }
            None if part.eq_ignore_ascii_case(segment) => {}
            None => return None,
        }
    }
    Some(params)
}

fn full_pattern<V>(entries: &[RouteEntry<V>], parent: &str, name: &str) -> Option<String> {
    entries.iter().find_map(|entry| {
        let pattern = join(parent, entry.path);
        if entry.name == name {
            Some(pattern)
        } else {
            full_pattern(&entry.children, &pattern, name)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn page(name: &'static str) -> ViewProvider<&'static str> {
        ViewProvider::eager(name)
    }

    fn table() -> RouteTable<&'static str> {
        RouteTable::new(
            vec![
                RouteEntry::new("/", "Home", page("home")),
                RouteEntry::new("/login", "Login", page("login")),
                RouteEntry::new("/conversation/:id", "Conversation", page("conversation"))
                    .requires_auth(),
                RouteEntry::new("/admin", "Admin", page("admin"))
                    .requires_auth()
                    .child(RouteEntry::new("users", "AdminUsers", page("users")))
                    .child(RouteEntry::new("/audit", "Audit", page("audit"))),
            ],
            "/login",
        )
        .expect("table should be valid")
    }

    #[rstest]
    #[case("/", "Home")]
    #[case("/login", "Login")]
    #[case("/login/", "Login")]
    #[case("/LOGIN", "Login")]
    #[case("/login?next=/settings", "Login")]
    #[case("/login#top", "Login")]
    #[case("/conversation/42", "Conversation")]
    #[case("/admin", "Admin")]
    #[case("/admin/users", "AdminUsers")]
    #[case("/audit", "Audit")]
    fn test_resolve_names(#[case] location: &str, #[case] expected: &str) {
        let table = table();
        let m = table.resolve(location).expect("should match");
        assert_eq!(m.name(), expected);
    }

    #[rstest]
    #[case("/nowhere")]
    #[case("/conversation")]
    #[case("/conversation/1/extra")]
    #[case("/admin/unknown")]
    fn test_resolve_unmatched(#[case] location: &str) {
        assert!(table().resolve(location).is_none());
    }

    #[test]
    fn test_params_are_decoded() {
        let table = table();
        let m = table.resolve("/conversation/a%20b").unwrap();
        assert_eq!(m.params().get("id"), Some("a b"));
        assert_eq!(m.params().get("missing"), None);
    }

    #[rstest]
    #[case("/")]
    #[case("/conversation/1")]
    #[case("/admin/users")]
    #[case("/audit")]
    fn test_match_chain_ends_at_leaf(#[case] location: &str) {
        let table = table();
        let m = table.resolve(location).unwrap();
        assert!(!m.matched().is_empty());
        let last = m.matched()[m.matched().len() - 1];
        assert!(std::ptr::eq(last, m.leaf()));
        assert_eq!(m.name(), m.leaf().name);
    }

    #[test]
    fn test_child_chain_inherits_protection() {
        let table = table();
        let m = table.resolve("/admin/users").unwrap();
        let names: Vec<_> = m.matched().iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Admin", "AdminUsers"]);
        assert!(!m.leaf().meta.requires_auth);
        assert!(m.requires_auth());
    }

    #[test]
    fn test_resolve_does_not_load_views() {
        let table = RouteTable::new(
            vec![
                RouteEntry::new("/login", "Login", ViewProvider::eager("login")),
                RouteEntry::new("/settings", "Settings", ViewProvider::lazy(|| "settings")),
            ],
            "/login",
        )
        .unwrap();

        let m = table.resolve("/settings").unwrap();
        assert!(!m.leaf().view.is_resolved());
        assert_eq!(*m.leaf().view.resolve(), "settings");
    }

    #[test]
    fn test_href_fills_params() {
        let table = table();
        assert_eq!(table.href("Home", &[]).as_deref(), Some("/"));
        assert_eq!(
            table.href("Conversation", &[("id", "7")]).as_deref(),
            Some("/conversation/7")
        );
        assert_eq!(
            table.href("Conversation", &[("id", "a b")]).as_deref(),
            Some("/conversation/a%20b")
        );
        assert_eq!(table.href("AdminUsers", &[]).as_deref(), Some("/admin/users"));
        assert_eq!(table.href("Conversation", &[]), None);
        assert_eq!(table.href("Nope", &[]), None);
    }

    #[test]
    fn test_find_nested() {
        let table = table();
        assert_eq!(table.find("Audit").map(|e| e.path), Some("/audit"));
        assert!(table.find("Nope").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = RouteTable::new(
            vec![
                RouteEntry::new("/login", "Login", page("a")),
                RouteEntry::new("/signin", "Login", page("b")),
            ],
            "/login",
        )
        .unwrap_err();
        assert_eq!(err, RouteError::DuplicateName("Login".to_string()));
    }

    #[rstest]
    #[case("login")]
    #[case("/conversation/:")]
    fn test_invalid_paths_rejected(#[case] path: &'static str) {
        let err = RouteTable::new(
            vec![
                RouteEntry::new("/login", "Login", page("login")),
                RouteEntry::new(path, "Broken", page("broken")),
            ],
            "/login",
        )
        .unwrap_err();
        assert!(matches!(err, RouteError::InvalidPath { .. }));
    }

    #[test]
    fn test_missing_login_route_rejected() {
        let err = RouteTable::new(vec![RouteEntry::new("/", "Home", page("home"))], "/login")
            .unwrap_err();
        assert_eq!(err, RouteError::MissingLoginRoute("/login".to_string()));
    }

    #[test]
    fn test_protected_login_route_rejected() {
        let err = RouteTable::new(
            vec![RouteEntry::new("/login", "Login", page("login")).requires_auth()],
            "/login",
        )
        .unwrap_err();
        assert_eq!(err, RouteError::LoginRequiresAuth("/login".to_string()));
        assert_eq!(
            err.to_string(),
            "Login route /login must not require authentication"
        );
    }
}
