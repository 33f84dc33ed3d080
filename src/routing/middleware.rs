//! Route data capture middleware.
//!
//! Records the path parameters axum matched for a route, together with
//! per-route defaults and data tokens, as a [`RouteData`] request extension.
//!
//! Must be installed with `Router::route_layer` (or on a method router):
//! path parameters only exist once the route has been matched.

use axum::{
    extract::{rejection::RawPathParamsRejection, RawPathParams, Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::route_data::{RouteData, RoutingType};

/// Static metadata attached to a group of routes.
#[derive(Debug, Clone, Default)]
pub struct DataTokens {
    defaults: Arc<HashMap<String, String>>,
    tokens: Arc<HashMap<String, String>>,
}

impl DataTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes registered under an area.
    pub fn area(name: impl Into<String>) -> Self {
        Self::new().with_token(RoutingType::Area.key(), name)
    }

    /// Add a data token.
    pub fn with_token(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.tokens).insert(key.as_ref().to_lowercase(), value.into());
        self
    }

    /// Add a route value used when the path does not capture `key`.
    pub fn with_default(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.defaults).insert(key.as_ref().to_lowercase(), value.into());
        self
    }

    /// Build the route data for a request from its captured parameters.
    pub fn route_data<'a>(&self, params: impl IntoIterator<Item = (&'a str, &'a str)>) -> RouteData {
        let mut data = RouteData::new();
        for (key, value) in self.defaults.iter() {
            data.insert_value(key, value.clone());
        }
        for (key, value) in params {
            data.insert_value(key, value);
        }
        for (key, value) in self.tokens.iter() {
            data.insert_data_token(key, value.clone());
        }
        data
    }
}

/// Store the matched route's data in the request extensions.
pub async fn capture_route_data(
    State(tokens): State<DataTokens>,
    params: Result<RawPathParams, RawPathParamsRejection>,
    mut request: Request,
    next: Next,
) -> Response {
    let data = match &params {
        Ok(params) => tokens.route_data(params),
        Err(e) => {
            tracing::debug!(
                path = %request.uri().path(),
                error = %e,
                "No path parameters captured"
            );
            tokens.route_data(std::iter::empty())
        }
    };

    request.extensions_mut().insert(data);
    next.run(request).await
}
