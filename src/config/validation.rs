//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HelperConfig → Result<(), Vec<ValidationError>>

use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

use crate::config::schema::HelperConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("site.path_base `{0}` must start with '/'")]
    PathBase(String),

    #[error("site.default_scheme `{0}` must be http or https")]
    Scheme(String),

    #[error("site.public_origin `{0}` must be an absolute http(s) origin")]
    PublicOrigin(String),

    #[error("resolver.name_servers entry `{0}` is not an IP address")]
    NameServer(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Check a parsed configuration.
pub fn validate_config(config: &HelperConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if !config.site.path_base.starts_with('/') {
        errors.push(ValidationError::PathBase(config.site.path_base.clone()));
    }

    if !matches!(config.site.default_scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::Scheme(config.site.default_scheme.clone()));
    }

    if let Some(origin) = &config.site.public_origin {
        let valid = url::Url::parse(origin)
            .map(|u| {
                matches!(u.scheme(), "http" | "https")
                    && u.has_host()
                    && matches!(u.path(), "" | "/")
                    && u.query().is_none()
            })
            .unwrap_or(false);
        if !valid {
            errors.push(ValidationError::PublicOrigin(origin.clone()));
        }
    }

    for ns in &config.resolver.name_servers {
        if ns.trim().parse::<IpAddr>().is_err() {
            errors.push(ValidationError::NameServer(ns.clone()));
        }
    }

    if config.resolver.timeout_ms == 0 {
        errors.push(ValidationError::Zero("resolver.timeout_ms"));
    }
    if config.resolver.attempts == 0 {
        errors.push(ValidationError::Zero("resolver.attempts"));
    }
    if config.body.max_size == 0 {
        errors.push(ValidationError::Zero("body.max_size"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
