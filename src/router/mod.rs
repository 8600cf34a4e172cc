//! Client-side routing: route table, view providers and the auth guard

pub mod guard;
pub mod outlet;
pub mod table;
pub mod view;

pub use guard::{Navigation, NavigationGuard, NavigationRequest};
pub use outlet::GuardedOutlet;
pub use table::{RouteEntry, RouteError, RouteMatch, RouteMeta, RouteParams, RouteTable};
pub use view::ViewProvider;
