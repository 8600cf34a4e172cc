//! View providers for route entries
//!
//! A route either carries its view ready to use (eager) or a loader that
//! produces the view on first navigation (lazy). The router consumes both
//! through [`ViewProvider::resolve`].

use std::fmt;
use std::sync::OnceLock;

/// Source of the view bound to a route
pub enum ViewProvider<V> {
    /// Already resolved at startup
    Eager(V),
    /// Built by `loader` on first use, then cached
    Lazy {
        loader: fn() -> V,
        resolved: OnceLock<V>,
    },
}

impl<V> ViewProvider<V> {
    pub fn eager(view: V) -> Self {
        Self::Eager(view)
    }

    pub fn lazy(loader: fn() -> V) -> Self {
        Self::Lazy {
            loader,
            resolved: OnceLock::new(),
        }
    }

    /// Get the view, running the loader if this is the first use
    pub fn resolve(&self) -> &V {
        match self {
            Self::Eager(view) => view,
            Self::Lazy { loader, resolved } => resolved.get_or_init(|| {
                tracing::debug!("loading lazy view");
                loader()
            }),
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy { .. })
    }

    /// Whether `resolve` can return without running a loader
    pub fn is_resolved(&self) -> bool {
        match self {
            Self::Eager(_) => true,
            Self::Lazy { resolved, .. } => resolved.get().is_some(),
        }
    }
}

impl<V> fmt::Debug for ViewProvider<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager(_) => f.write_str("Eager"),
            Self::Lazy { resolved, .. } => f
                .debug_struct("Lazy")
                .field("resolved", &resolved.get().is_some())
                .finish(),
        }
    }
}
