//! Diagnostics HTTP server.
//!
//! # Responsibilities
//! - Create Axum Router exercising every helper
//! - Install helper extensions (site settings, resolver, body limit)
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve with connect info and graceful shutdown
//!
//! # Routes
//! - `GET /` → host URL and application URL
//! - `ANY /{controller}/{action}` → routing values and client identity
//! - `ANY /admin/{controller}/{action}` → same, under the `admin` area
//! - `POST /echo` → raw request body

use axum::{
    extract::Request,
    middleware,
    routing::{any, get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::HelperConfig;
use crate::http::body::{BodyLimit, RawBodyExt};
use crate::http::context::RequestContext;
use crate::http::url::SiteSettings;
use crate::net::{DnsResolver, SharedResolver};
use crate::routing::{capture_route_data, DataTokens, RoutingExt, RoutingType};

/// Site URLs of the current request.
#[derive(Debug, Serialize)]
pub struct SiteInfo {
    pub host_url: String,
    pub application_url: String,
}

/// Routing values and client identity of the current request.
#[derive(Debug, Serialize)]
pub struct RouteInfo {
    pub area: String,
    pub controller: String,
    pub action: String,
    pub user_host_address: String,
    pub client_ip: String,
    pub client_hostname: String,
}

/// HTTP server exposing the helpers.
pub struct HttpServer {
    router: Router,
    config: HelperConfig,
}

impl HttpServer {
    /// Create a server resolving client names with the configured DNS settings.
    pub fn new(config: HelperConfig) -> Self {
        let resolver: SharedResolver = Arc::new(DnsResolver::new(&config.resolver));
        Self::with_resolver(config, resolver)
    }

    /// Create a server with a specific resolver.
    pub fn with_resolver(config: HelperConfig, resolver: SharedResolver) -> Self {
        let router = Self::build_router(&config, resolver);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &HelperConfig, resolver: SharedResolver) -> Router {
        let site = Router::new()
            .route("/{controller}/{action}", any(describe))
            .route_layer(middleware::from_fn_with_state(
                DataTokens::new(),
                capture_route_data,
            ));

        let admin = Router::new()
            .route("/{controller}/{action}", any(describe))
            .route_layer(middleware::from_fn_with_state(
                DataTokens::area("admin"),
                capture_route_data,
            ));

        Router::new()
            .route("/", get(index))
            .route("/echo", post(echo))
            .nest("/admin", admin)
            .merge(site)
            .layer(Extension(SiteSettings::from(&config.site)))
            .layer(Extension(resolver))
            .layer(Extension(BodyLimit(config.body.max_size)))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router (without connect info).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path_base = %self.config.site.path_base,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &HelperConfig {
        &self.config
    }
}

async fn index(ctx: RequestContext) -> Json<SiteInfo> {
    Json(SiteInfo {
        host_url: ctx.host_url(),
        application_url: ctx.application_url(),
    })
}

async fn describe(ctx: RequestContext) -> Json<RouteInfo> {
    let client_ip = ctx.client_ip_address().await;
    let client_hostname = ctx.client_hostname(&client_ip).await;

    tracing::debug!(
        controller = %ctx.routing(RoutingType::Controller),
        action = %ctx.routing(RoutingType::Action),
        client_ip = %client_ip,
        "Describing request"
    );

    Json(RouteInfo {
        area: ctx.routing(RoutingType::Area),
        controller: ctx.routing(RoutingType::Controller),
        action: ctx.routing(RoutingType::Action),
        user_host_address: ctx.user_host_address().to_string(),
        client_ip,
        client_hostname,
    })
}

async fn echo(mut request: Request) -> String {
    request.raw().await
}
