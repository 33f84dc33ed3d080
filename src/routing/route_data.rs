//! Route data and routing lookups.
//!
//! # Responsibilities
//! - Hold the values and data tokens recorded for a matched route
//! - Look up area / controller / action by routing type
//! - Expose the lookup on every request view a handler may hold
//!
//! # Design Decisions
//! - Keys normalized to lowercase on insert
//! - Missing route data or missing key yields an empty string

use axum::http::{request::Parts, Extensions, Request};
use std::collections::HashMap;
use std::fmt;

/// Requested routing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutingType {
    /// Area route name (read from data tokens).
    Area,
    /// Controller route name.
    Controller,
    /// Action route name.
    Action,
}

impl RoutingType {
    /// All routing categories.
    pub const ALL: [RoutingType; 3] = [Self::Area, Self::Controller, Self::Action];

    /// Lowercase key used in route data.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Controller => "controller",
            Self::Action => "action",
        }
    }
}

impl fmt::Display for RoutingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Values and data tokens describing the route that matched a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteData {
    values: HashMap<String, String>,
    data_tokens: HashMap<String, String>,
}

impl RouteData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route value (builder style).
    pub fn with_value(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert_value(key, value);
        self
    }

    /// Add a data token (builder style).
    pub fn with_data_token(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert_data_token(key, value);
        self
    }

    pub fn insert_value(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.values
            .insert(key.as_ref().to_lowercase(), value.into());
    }

    pub fn insert_data_token(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.data_tokens
            .insert(key.as_ref().to_lowercase(), value.into());
    }

    /// Route value for `key` (case-insensitive).
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Data token for `key` (case-insensitive).
    pub fn data_token(&self, key: &str) -> Option<&str> {
        self.data_tokens.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    pub fn data_tokens(&self) -> &HashMap<String, String> {
        &self.data_tokens
    }

    /// Look up the value for a routing category.
    ///
    /// Area is read from the data tokens, controller and action from the
    /// route values.
    pub fn lookup(&self, kind: RoutingType) -> Option<&str> {
        match kind {
            RoutingType::Area => self.data_token(kind.key()),
            RoutingType::Controller | RoutingType::Action => self.value(kind.key()),
        }
    }
}

/// Current routing value lookups for anything that can reach route data.
pub trait RoutingExt {
    /// Route data attached to this value, if any.
    fn route_data(&self) -> Option<&RouteData>;

    /// Get the current routing value, or an empty string when absent.
    fn routing(&self, kind: RoutingType) -> String {
        self.route_data()
            .and_then(|data| data.lookup(kind))
            .map(str::to_string)
            .unwrap_or_default()
    }
}

impl RoutingExt for RouteData {
    fn route_data(&self) -> Option<&RouteData> {
        Some(self)
    }
}

impl RoutingExt for Option<&RouteData> {
    fn route_data(&self) -> Option<&RouteData> {
        *self
    }
}

impl RoutingExt for Option<RouteData> {
    fn route_data(&self) -> Option<&RouteData> {
        self.as_ref()
    }
}

impl RoutingExt for Extensions {
    fn route_data(&self) -> Option<&RouteData> {
        self.get::<RouteData>()
    }
}

impl RoutingExt for Parts {
    fn route_data(&self) -> Option<&RouteData> {
        self.extensions.get::<RouteData>()
    }
}

impl<B> RoutingExt for Request<B> {
    fn route_data(&self) -> Option<&RouteData> {
        self.extensions().get::<RouteData>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn sample() -> RouteData {
        RouteData::new()
            .with_value("Controller", "Books")
            .with_value("action", "Index")
            .with_data_token("area", "Admin")
    }

    #[test]
    fn test_lookup_by_type() {
        let data = sample();
        assert_eq!(data.routing(RoutingType::Area), "Admin");
        assert_eq!(data.routing(RoutingType::Controller), "Books");
        assert_eq!(data.routing(RoutingType::Action), "Index");
    }

    #[test]
    fn test_area_only_from_data_tokens() {
        // An "area" route value is not a data token.
        let data = RouteData::new().with_value("area", "Admin");
        assert_eq!(data.routing(RoutingType::Area), "");
    }

    #[test]
    fn test_absent_keys_yield_empty() {
        let empty = RouteData::new();
        for kind in RoutingType::ALL {
            assert_eq!(empty.routing(kind), "");
            assert_eq!(None::<&RouteData>.routing(kind), "");
        }
    }

    #[test]
    fn test_request_without_route_data() {
        let req = Request::builder().uri("/books").body(Body::empty()).unwrap();
        for kind in RoutingType::ALL {
            assert_eq!(req.routing(kind), "");
        }
    }

    #[test]
    fn test_request_and_parts_lookup() {
        let mut req = Request::builder().uri("/books").body(Body::empty()).unwrap();
        req.extensions_mut().insert(sample());
        assert_eq!(req.routing(RoutingType::Controller), "Books");

        let (parts, _) = req.into_parts();
        assert_eq!(parts.routing(RoutingType::Action), "Index");
        assert_eq!(parts.extensions.routing(RoutingType::Area), "Admin");
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let data = RouteData::new().with_value("CONTROLLER", "Home");
        assert_eq!(data.value("controller"), Some("Home"));
        assert_eq!(data.value("Controller"), Some("Home"));
        assert_eq!(RoutingType::Controller.to_string(), "controller");
    }
}
