//! Routing information subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → axum Router (route match, path parameters)
//!     → middleware.rs (capture parameters + data tokens)
//!     → RouteData stored in request extensions
//!
//! Handler:
//!     → RoutingExt::routing(RoutingType) on request / parts / context
//!     → Return: matched value or ""
//! ```
//!
//! # Design Decisions
//! - axum owns route matching; this module only records what matched
//! - Keys are lowercase, lookups never fail (absent = empty string)
//! - Area lives in data tokens, controller/action in route values

pub mod middleware;
pub mod route_data;

pub use middleware::{capture_route_data, DataTokens};
pub use route_data::{RouteData, RoutingExt, RoutingType};
