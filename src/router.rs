use std::collections::BTreeSet;

/// Decides whether a message route can be dispatched.
pub trait Router {
    fn has_route(&self, route: &str) -> bool;
}

/// A `Router` backed by a fixed set of registered routes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: BTreeSet<String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Default::default()
    }

    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.add_route(route);
        self
    }

    pub fn add_route(&mut self, route: impl Into<String>) {
        self.routes.insert(route.into());
    }
}

impl<'a> FromIterator<&'a str> for RouteTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().map(String::from).collect(),
        }
    }
}

impl Router for RouteTable {
    fn has_route(&self, route: &str) -> bool {
        self.routes.contains(route)
    }
}

impl<R: Router + ?Sized> Router for &R {
    fn has_route(&self, route: &str) -> bool {
        (**self).has_route(route)
    }
}
