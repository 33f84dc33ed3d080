//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HelperConfig {
    /// Listener configuration for the diagnostics server.
    pub listener: ListenerConfig,

    /// How absolute site URLs are built.
    pub site: SiteConfig,

    /// DNS resolver settings for client IP / hostname lookups.
    pub resolver: ResolverConfig,

    /// Raw body reading limits.
    pub body: BodyConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Site URL configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root-relative path the application is mounted at (e.g., "/app/").
    pub path_base: String,

    /// Scheme used when the request URI carries none.
    pub default_scheme: String,

    /// Fixed `scheme://host[:port]` overriding the request-derived origin.
    pub public_origin: Option<String>,

    /// Honor X-Forwarded-* / X-Real-Ip headers.
    /// Only enable behind a proxy that sets them.
    pub trust_forwarded_headers: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            path_base: "/".to_string(),
            default_scheme: "http".to_string(),
            public_origin: None,
            trust_forwarded_headers: false,
        }
    }
}

/// DNS resolver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Name server IPs replacing the system ones (empty = system).
    pub name_servers: Vec<String>,

    /// Per-query timeout in milliseconds.
    pub timeout_ms: u64,

    /// Attempts per query.
    pub attempts: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            name_servers: Vec::new(),
            timeout_ms: 2000,
            attempts: 2,
        }
    }
}

/// Body reading configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Maximum raw body size in bytes.
    pub max_size: usize,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            max_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when RUST_LOG is unset (e.g. "info", "mvc_helper=debug").
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
