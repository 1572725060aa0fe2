//! Static route table
//!
//! Exact-match mapping from URL path to the content type served for it.
//! The table is built once at startup and never mutated, so concurrent
//! lookups from in-flight connections need no synchronization.

/// A static association between a URL path and its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub content_type: &'static str,
}

/// Immutable path -> route mapping.
///
/// Matching is exact and case-sensitive. Query strings are never part of
/// the match key; callers pass the bare URL path.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// The fixed set of served assets.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            routes: vec![
                Route {
                    path: "/index.html",
                    content_type: "text/html",
                },
                Route {
                    path: "/about.html",
                    content_type: "text/html",
                },
                Route {
                    path: "/contact.html",
                    content_type: "text/html",
                },
                Route {
                    path: "/style.css",
                    content_type: "text/css",
                },
                Route {
                    path: "/scripts.js",
                    content_type: "application/javascript",
                },
            ],
        }
    }

    /// Look up a route by exact path match.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.path == path)
    }

}

impl Default for RouteTable {
    fn default() -> Self {
        Self::builtin()
    }
}
