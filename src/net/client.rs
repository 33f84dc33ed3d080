//! Client address and hostname resolution.
//!
//! # Responsibilities
//! - Determine the raw remote address of a request
//! - Resolve it to an IPv4 string, preferring real IPv4 records
//! - Reverse-resolve a client address to a hostname
//!
//! # Design Decisions
//! - Never fails: resolution errors fall back to the input (IP) or "" (hostname)
//! - Forwarded headers are only read when explicitly trusted

use axum::extract::ConnectInfo;
use axum::http::{Extensions, HeaderMap};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use super::resolver::{host_entry, Resolve};

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_REAL_IP: &str = "x-real-ip";

/// Raw remote address of a request, or an empty string when unknown.
///
/// With `trust_forwarded` the first `X-Forwarded-For` entry wins, then
/// `X-Real-Ip`, then the connection peer address.
pub fn user_host_address(headers: &HeaderMap, extensions: &Extensions, trust_forwarded: bool) -> String {
    if trust_forwarded {
        let forwarded = headers
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
        let real_ip = headers
            .get(X_REAL_IP)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(ip) = real_ip {
            return ip.to_string();
        }
    }

    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_default()
}

/// Map an address to IPv4. IPv6 keeps its low 32 bits.
pub fn map_to_ipv4(ip: IpAddr) -> Ipv4Addr {
    match ip {
        IpAddr::V4(v4) => v4,
        IpAddr::V6(v6) => {
            let bits = u128::from(v6) as u32;
            Ipv4Addr::from(bits)
        }
    }
}

/// Resolve the client address to an IPv4 string.
///
/// Order of preference:
/// 1. first IPv4 address the remote address resolves to
/// 2. first IPv4 address in the host entry of a resolved IPv6 address
/// 3. first resolved address mapped to IPv4
/// 4. the remote address unchanged
pub async fn client_ip_address(remote: &str, resolver: &dyn Resolve) -> String {
    match resolve_ipv4(remote, resolver).await {
        Ok(Some(ip)) => ip.to_string(),
        Ok(None) => remote.to_string(),
        Err(e) => {
            tracing::debug!(remote = %remote, error = %e, "Client address resolution failed");
            remote.to_string()
        }
    }
}

async fn resolve_ipv4(remote: &str, resolver: &dyn Resolve) -> super::resolver::Result<Option<Ipv4Addr>> {
    let addrs = resolver.lookup_ip(remote.trim()).await?;

    if let Some(v4) = addrs.iter().find_map(|ip| match ip {
        IpAddr::V4(v4) => Some(*v4),
        IpAddr::V6(_) => None,
    }) {
        return Ok(Some(v4));
    }

    for ip in addrs.iter().filter(|ip| ip.is_ipv6()) {
        let entry = host_entry(resolver, *ip).await?;
        if let Some(IpAddr::V4(v4)) = entry.addresses.iter().find(|a| a.is_ipv4()) {
            return Ok(Some(*v4));
        }
    }

    Ok(addrs.first().map(|ip| map_to_ipv4(*ip)))
}

/// Resolve `ip` to a hostname, or an empty string on any failure.
///
/// An address is reverse-resolved. A name is forward-resolved to its
/// canonical name.
pub async fn client_hostname(ip: &str, resolver: &dyn Resolve) -> String {
    let ip = ip.trim();
    if ip.is_empty() {
        return String::new();
    }

    let result = match ip.parse::<IpAddr>() {
        Ok(addr) => resolver.reverse_lookup(addr).await,
        Err(_) => resolver.lookup_host(ip).await.map(|entry| entry.hostname),
    };
    match result {
        Ok(hostname) => hostname,
        Err(e) => {
            tracing::debug!(ip = %ip, error = %e, "Client hostname resolution failed");
            String::new()
        }
    }
}
