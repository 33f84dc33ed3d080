//! Absolute URL construction.
//!
//! # Responsibilities
//! - Host URL (`scheme://host`) of the current request
//! - Application URL (host URL + path base)
//!
//! # Design Decisions
//! - Host from the Host header, falling back to the URI authority (HTTP/2)
//! - Scheme from the URI, falling back to the configured default
//! - X-Forwarded-Proto / X-Forwarded-Host only when trusted
//! - No host available = empty host URL

use axum::http::{header, request::Parts, HeaderMap, Request, Uri};

use crate::config::SiteConfig;

pub const X_FORWARDED_HOST: &str = "x-forwarded-host";
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Root-relative path the application is mounted at.
///
/// Always starts and ends with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathBase(String);

impl PathBase {
    pub fn new(path: &str) -> Self {
        let trimmed = path.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Self::default();
        }
        Self(format!("/{trimmed}/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PathBase {
    fn default() -> Self {
        Self("/".to_string())
    }
}

/// Site-wide URL settings, shared with handlers as a request extension.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub path_base: PathBase,
    pub default_scheme: String,
    pub public_origin: Option<String>,
    pub trust_forwarded_headers: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self::from(&SiteConfig::default())
    }
}

impl From<&SiteConfig> for SiteSettings {
    fn from(config: &SiteConfig) -> Self {
        Self {
            path_base: PathBase::new(&config.path_base),
            default_scheme: config.default_scheme.clone(),
            public_origin: config
                .public_origin
                .as_ref()
                .map(|o| o.trim_end_matches('/').to_string()),
            trust_forwarded_headers: config.trust_forwarded_headers,
        }
    }
}

fn first_header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// `scheme://host` of a request, or an empty string when the host is unknown.
pub fn host_url(uri: &Uri, headers: &HeaderMap, settings: &SiteSettings) -> String {
    if let Some(origin) = &settings.public_origin {
        return origin.clone();
    }

    let forwarded = |name| {
        settings
            .trust_forwarded_headers
            .then(|| first_header_value(headers, name))
            .flatten()
    };

    let host = forwarded(X_FORWARDED_HOST)
        .or_else(|| {
            headers
                .get(header::HOST)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
        })
        .or_else(|| uri.authority().map(|a| a.as_str()));
    let Some(host) = host else {
        return String::new();
    };

    let scheme = forwarded(X_FORWARDED_PROTO)
        .or_else(|| uri.scheme_str())
        .unwrap_or(settings.default_scheme.as_str());

    format!("{}://{}", scheme.to_lowercase(), host)
}

/// Absolute site URL: host URL followed by the path base.
pub fn application_url(uri: &Uri, headers: &HeaderMap, settings: &SiteSettings) -> String {
    host_url(uri, headers, settings) + settings.path_base.as_str()
}

/// Site URL lookups for request views.
///
/// Settings come from the `SiteSettings` request extension, or defaults.
pub trait UrlExt {
    fn host_url(&self) -> String;
    fn application_url(&self) -> String;
}

impl UrlExt for Parts {
    fn host_url(&self) -> String {
        let settings = self.extensions.get::<SiteSettings>().cloned().unwrap_or_default();
        host_url(&self.uri, &self.headers, &settings)
    }

    fn application_url(&self) -> String {
        let settings = self.extensions.get::<SiteSettings>().cloned().unwrap_or_default();
        application_url(&self.uri, &self.headers, &settings)
    }
}

impl<B> UrlExt for Request<B> {
    fn host_url(&self) -> String {
        let settings = self.extensions().get::<SiteSettings>().cloned().unwrap_or_default();
        host_url(self.uri(), self.headers(), &settings)
    }

    fn application_url(&self) -> String {
        let settings = self.extensions().get::<SiteSettings>().cloned().unwrap_or_default();
        application_url(self.uri(), self.headers(), &settings)
    }
}
