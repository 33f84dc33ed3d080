//! Request helpers for axum handlers.
//!
//! Extension-style lookups for the current route (area / controller /
//! action), absolute site URLs, client IP address and hostname resolution,
//! and raw request bodies.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::HelperConfig;
pub use http::{HttpServer, RawBodyExt, RequestContext, UrlExt};
pub use lifecycle::Shutdown;
pub use net::{client_hostname, client_ip_address, DnsResolver, Resolve};
pub use routing::{RouteData, RoutingExt, RoutingType};
