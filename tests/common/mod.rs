//! Shared utilities for integration tests.

use async_trait::async_trait;
use mvc_helper::net::resolver::{Error, Resolve, Result};
use std::collections::HashMap;
use std::net::IpAddr;

/// Resolver answering from fixed tables.
///
/// IP literals resolve to themselves unless overridden.
#[derive(Default)]
pub struct StubResolver {
    forward: HashMap<String, Vec<IpAddr>>,
    reverse: HashMap<IpAddr, String>,
}

#[allow(dead_code)]
impl StubResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forward(mut self, host: &str, addrs: &[&str]) -> Self {
        let addrs = addrs.iter().map(|a| a.parse().unwrap()).collect();
        self.forward.insert(host.to_string(), addrs);
        self
    }

    pub fn reverse(mut self, ip: &str, name: &str) -> Self {
        self.reverse.insert(ip.parse().unwrap(), name.to_string());
        self
    }

    /// Loopback names as a typical /etc/hosts declares them.
    pub fn loopback() -> Self {
        Self::new()
            .reverse("127.0.0.1", "localhost")
            .reverse("::1", "localhost")
            .forward("localhost", &["::1", "127.0.0.1"])
    }
}

#[async_trait]
impl Resolve for StubResolver {
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>> {
        if let Some(addrs) = self.forward.get(host) {
            return Ok(addrs.clone());
        }
        host.parse::<IpAddr>()
            .map(|ip| vec![ip])
            .map_err(|_| Error::NoRecords(host.to_string()))
    }

    async fn reverse_lookup(&self, ip: IpAddr) -> Result<String> {
        self.reverse
            .get(&ip)
            .cloned()
            .ok_or_else(|| Error::NoRecords(ip.to_string()))
    }
}
