//! Client-side route table.
//!
//! # Route Structure
//!
//! ```text
//! /             - Home
//! /attractions  - Attractions
//! /planning     - Trip planning
//! /hotels       - Hotels
//! /about        - About
//! /auth         - Login / register
//! /profile      - Profile and order history
//! ```
//!
//! The table is static. A [`RouteTable`] only adds the base path the app is
//! served under, so `/app/hotels` resolves to [`View::Hotels`] when the base
//! is `/app/`.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// Error parsing a [`View`] from its route name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view: {0}")]
pub struct RouteError(String);

/// Logical views the app can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Landing page.
    Home,
    /// Sights and activities to book.
    Attractions,
    /// Trip itinerary builder.
    Planning,
    /// Hotel search and booking.
    Hotels,
    /// About the app.
    About,
    /// Sign-in and registration.
    Auth,
    /// The signed-in user's profile and orders.
    Profile,
}

impl View {
    /// Route name of the view.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Attractions => "attractions",
            Self::Planning => "planning",
            Self::Hotels => "hotels",
            Self::About => "about",
            Self::Auth => "auth",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for View {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ROUTES
            .iter()
            .find(|route| route.view.name() == s)
            .map(|route| route.view)
            .ok_or_else(|| RouteError(s.to_owned()))
    }
}

/// A path and the view it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Path relative to the app base, always starting with `/`.
    pub path: &'static str,
    /// View rendered at this path.
    pub view: View,
}

/// All routes, in declaration order.
pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        view: View::Home,
    },
    Route {
        path: "/attractions",
        view: View::Attractions,
    },
    Route {
        path: "/planning",
        view: View::Planning,
    },
    Route {
        path: "/hotels",
        view: View::Hotels,
    },
    Route {
        path: "/about",
        view: View::About,
    },
    Route {
        path: "/auth",
        view: View::Auth,
    },
    Route {
        path: "/profile",
        view: View::Profile,
    },
];

/// The route table mounted under a base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    base: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    /// Route table served from `/`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: "/".to_string(),
        }
    }

    /// Route table served from `base`.
    ///
    /// The base is normalized to begin and end with `/`, so `app`,
    /// `/app`, and `/app/` are equivalent.
    #[must_use]
    pub fn with_base(base: &str) -> Self {
        let trimmed = base.trim().trim_matches('/');
        let base = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{trimmed}/")
        };
        Self { base }
    }

    /// The normalized base path.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// All routes, in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &'static Route> {
        ROUTES.iter()
    }

    /// Resolve a full path to its view.
    ///
    /// Query strings and fragments are ignored, as is one trailing slash.
    /// Paths outside the base or without an exact match resolve to `None`.
    ///
    /// ```rust
    /// use travel_planner_core::{RouteTable, View};
    ///
    /// let table = RouteTable::with_base("/trips/");
    /// assert_eq!(table.resolve("/trips/hotels?city=rome"), Some(View::Hotels));
    /// assert_eq!(table.resolve("/trips"), Some(View::Home));
    /// assert_eq!(table.resolve("/hotels"), None);
    /// ```
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<View> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        let relative = self.strip_base(path)?;
        let relative = match relative.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => relative,
        };

        ROUTES
            .iter()
            .find(|route| route.path == relative)
            .map(|route| route.view)
    }

    /// Full path for `view`, including the base.
    #[must_use]
    pub fn path_for(&self, view: View) -> String {
        let path = ROUTES
            .iter()
            .find(|route| route.view == view)
            .map_or("/", |route| route.path);
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }

    /// Path relative to the base, starting with `/`.
    fn strip_base<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.base == "/" {
            return path.starts_with('/').then_some(path);
        }

        // "/trips" with base "/trips/" is the base itself
        let bare_base = self.base.trim_end_matches('/');
        if path == bare_base {
            return Some("/");
        }

        path.strip_prefix(bare_base)
            .filter(|rest| rest.starts_with('/'))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_resolves_to_itself() {
        let table = RouteTable::new();
        for route in table.routes() {
            assert_eq!(table.resolve(route.path), Some(route.view));
        }
        assert_eq!(table.routes().count(), 7);
    }

    #[test]
    fn test_resolve_ignores_query_fragment_and_trailing_slash() {
        let table = RouteTable::new();
        assert_eq!(table.resolve("/planning/"), Some(View::Planning));
        assert_eq!(table.resolve("/auth?next=/profile"), Some(View::Auth));
        assert_eq!(table.resolve("/about#team"), Some(View::About));
        assert_eq!(table.resolve("/?ref=mail"), Some(View::Home));
    }

    #[test]
    fn test_resolve_unknown_paths() {
        let table = RouteTable::new();
        assert_eq!(table.resolve("/hotels/42"), None);
        assert_eq!(table.resolve("/Hotels"), None);
        assert_eq!(table.resolve("hotels"), None);
        assert_eq!(table.resolve(""), None);
    }

    #[test]
    fn test_base_is_normalized() {
        assert_eq!(RouteTable::with_base("app").base(), "/app/");
        assert_eq!(RouteTable::with_base("/app").base(), "/app/");
        assert_eq!(RouteTable::with_base("/app/").base(), "/app/");
        assert_eq!(RouteTable::with_base("").base(), "/");
        assert_eq!(RouteTable::with_base("/").base(), "/");
    }

    #[test]
    fn test_resolve_under_base() {
        let table = RouteTable::with_base("/app/");
        assert_eq!(table.resolve("/app/"), Some(View::Home));
        assert_eq!(table.resolve("/app"), Some(View::Home));
        assert_eq!(table.resolve("/app/profile"), Some(View::Profile));
        assert_eq!(table.resolve("/apple/profile"), None);
        assert_eq!(table.resolve("/profile"), None);
    }

    #[test]
    fn test_path_for_includes_base() {
        assert_eq!(RouteTable::new().path_for(View::Home), "/");
        assert_eq!(RouteTable::new().path_for(View::Hotels), "/hotels");

        let table = RouteTable::with_base("/app");
        assert_eq!(table.path_for(View::Home), "/app/");
        assert_eq!(table.path_for(View::Auth), "/app/auth");
    }

    #[test]
    fn test_view_name_round_trip() {
        for route in ROUTES {
            assert_eq!(route.view.name().parse::<View>().unwrap(), route.view);
            assert_eq!(route.view.to_string(), route.view.name());
        }
        assert_eq!(
            "checkout".parse::<View>(),
            Err(RouteError("checkout".to_string()))
        );
    }
}
