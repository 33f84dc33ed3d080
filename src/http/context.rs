//! Per-request helper context.
//!
//! `RequestContext` is the handler-side view of a request: routing values,
//! site URLs, and client identity, all derived from the request parts and
//! the extensions the server installs (`SiteSettings`, `SharedResolver`).

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, HeaderMap, Uri};
use std::convert::Infallible;

use crate::http::url::{self, SiteSettings};
use crate::net::{self, DnsResolver, SharedResolver};
use crate::routing::{RouteData, RoutingExt};

#[derive(Clone)]
pub struct RequestContext {
    uri: Uri,
    headers: HeaderMap,
    route_data: Option<RouteData>,
    settings: SiteSettings,
    user_host_address: String,
    resolver: SharedResolver,
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("uri", &self.uri)
            .field("route_data", &self.route_data)
            .field("user_host_address", &self.user_host_address)
            .finish_non_exhaustive()
    }
}

impl RequestContext {
    /// Build a context from request parts.
    ///
    /// Falls back to default settings and the process-wide system resolver
    /// when the extensions are missing.
    pub fn from_parts(parts: &Parts) -> Self {
        let settings = parts
            .extensions
            .get::<SiteSettings>()
            .cloned()
            .unwrap_or_default();
        let resolver = parts
            .extensions
            .get::<SharedResolver>()
            .cloned()
            .unwrap_or_else(DnsResolver::shared_system);
        let user_host_address = net::user_host_address(
            &parts.headers,
            &parts.extensions,
            settings.trust_forwarded_headers,
        );

        Self {
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
            route_data: parts.extensions.get::<RouteData>().cloned(),
            settings,
            user_host_address,
            resolver,
        }
    }

    /// Use a specific resolver for client lookups.
    pub fn with_resolver(mut self, resolver: SharedResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// `scheme://host` of the request, or "".
    pub fn host_url(&self) -> String {
        url::host_url(&self.uri, &self.headers, &self.settings)
    }

    /// Absolute site URL (host URL + path base).
    pub fn application_url(&self) -> String {
        url::application_url(&self.uri, &self.headers, &self.settings)
    }

    /// Raw remote address of the client, or "".
    pub fn user_host_address(&self) -> &str {
        &self.user_host_address
    }

    /// Client address resolved to IPv4 where possible.
    pub async fn client_ip_address(&self) -> String {
        net::client_ip_address(&self.user_host_address, self.resolver.as_ref()).await
    }

    /// Hostname of `ip`, or of the client when `ip` is empty. "" on failure.
    pub async fn client_hostname(&self, ip: &str) -> String {
        let ip = if ip.trim().is_empty() {
            self.client_ip_address().await
        } else {
            ip.to_string()
        };
        net::client_hostname(&ip, self.resolver.as_ref()).await
    }
}

impl RoutingExt for RequestContext {
    fn route_data(&self) -> Option<&RouteData> {
        self.route_data.as_ref()
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
