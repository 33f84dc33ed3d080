//! Name resolution.
//!
//! # Responsibilities
//! - Forward lookups (name → addresses), IP literals resolve to themselves
//! - Reverse lookups (address → PTR name)
//! - Host entries (reverse then forward, name + address list)
//!
//! # Design Decisions
//! - `Resolve` is the seam; callers hold `Arc<dyn Resolve>`
//! - `DnsResolver` reads the system resolver configuration once at build time
//! - No caching beyond what hickory does internally

use async_trait::async_trait;
use hickory_resolver::config::{
    LookupIpStrategy, NameServerConfigGroup, ResolverConfig, ResolverOpts,
};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::{ResolveError, Resolver, TokioResolver};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::ResolverConfig as ResolverSettings;

/// Errors from name resolution.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying resolver failed (timeout, NXDOMAIN, no records).
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Lookup succeeded but returned nothing usable.
    #[error("no records found for {0}")]
    NoRecords(String),

    /// Empty host name.
    #[error("empty host name")]
    EmptyHost,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Shared resolver handle.
pub type SharedResolver = Arc<dyn Resolve>;

/// Forward and reverse name resolution.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Resolve a host name (or IP literal) to its addresses.
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>>;

    /// Resolve an address to its host name, without trailing dot.
    async fn reverse_lookup(&self, ip: IpAddr) -> Result<String>;

    /// Forward-resolve a host name to its canonical name and addresses.
    ///
    /// Resolvers without alias information report the name as given.
    async fn lookup_host(&self, host: &str) -> Result<HostEntry> {
        let addresses = self.lookup_ip(host).await?;
        Ok(HostEntry {
            hostname: host.trim().to_string(),
            addresses,
        })
    }
}

/// A host name together with the addresses it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    pub hostname: String,
    pub addresses: Vec<IpAddr>,
}

/// Reverse-resolve `ip`, then forward-resolve the obtained name.
pub async fn host_entry(resolver: &dyn Resolve, ip: IpAddr) -> Result<HostEntry> {
    let hostname = resolver.reverse_lookup(ip).await?;
    let addresses = resolver.lookup_ip(&hostname).await?;
    Ok(HostEntry { hostname, addresses })
}

/// Hickory-backed resolver.
#[derive(Clone)]
pub struct DnsResolver {
    inner: TokioResolver,
}

impl std::fmt::Debug for DnsResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsResolver").finish_non_exhaustive()
    }
}

impl DnsResolver {
    /// Build a resolver from the system configuration and the given settings.
    pub fn new(settings: &ResolverSettings) -> Self {
        let (config, options) = resolver_conf(settings);
        let mut builder =
            Resolver::builder_with_config(config, TokioConnectionProvider::default());
        *builder.options_mut() = options;
        Self {
            inner: builder.build(),
        }
    }

    /// Resolver using the system configuration with default settings.
    pub fn system() -> Self {
        Self::new(&ResolverSettings::default())
    }

    /// Process-wide system resolver.
    pub fn shared_system() -> SharedResolver {
        static SYSTEM: std::sync::OnceLock<SharedResolver> = std::sync::OnceLock::new();
        SYSTEM
            .get_or_init(|| Arc::new(DnsResolver::system()))
            .clone()
    }
}

/// Merge the system resolver configuration with local overrides.
fn resolver_conf(settings: &ResolverSettings) -> (ResolverConfig, ResolverOpts) {
    let (mut config, mut options) = match read_system_conf() {
        Ok(conf) => conf,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read system resolver configuration, using defaults");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };

    let ips = settings
        .name_servers
        .iter()
        .filter_map(|s| s.trim().parse::<IpAddr>().ok())
        .collect::<Vec<_>>();
    if !ips.is_empty() {
        let name_servers = NameServerConfigGroup::from_ips_clear(&ips, 53, true);
        config = ResolverConfig::from_parts(
            config.domain().cloned(),
            config.search().to_vec(),
            name_servers,
        );
    }

    options.timeout = Duration::from_millis(settings.timeout_ms);
    options.attempts = settings.attempts;
    options.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;

    (config, options)
}

#[async_trait]
impl Resolve for DnsResolver {
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>> {
        let host = host.trim();
        if host.is_empty() {
            return Err(Error::EmptyHost);
        }
        // IP literals skip search domains (ndots) entirely.
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![ip]);
        }
        let lookup = self.inner.lookup_ip(host).await?;
        let addrs: Vec<IpAddr> = lookup.iter().collect();
        if addrs.is_empty() {
            return Err(Error::NoRecords(host.to_string()));
        }
        Ok(addrs)
    }

    async fn reverse_lookup(&self, ip: IpAddr) -> Result<String> {
        let lookup = self.inner.reverse_lookup(ip).await?;
        lookup
            .iter()
            .map(|ptr| ptr.to_string().trim_end_matches('.').to_string())
            .find(|name| !name.is_empty())
            .ok_or_else(|| Error::NoRecords(ip.to_string()))
    }

    async fn lookup_host(&self, host: &str) -> Result<HostEntry> {
        let host = host.trim();
        if host.is_empty() {
            return Err(Error::EmptyHost);
        }
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(HostEntry {
                hostname: host.to_string(),
                addresses: vec![ip],
            });
        }
        let lookup = self.inner.lookup_ip(host).await?;
        let addresses: Vec<IpAddr> = lookup.iter().collect();
        if addresses.is_empty() {
            return Err(Error::NoRecords(host.to_string()));
        }
        // Address records are owned by the end of any CNAME chain.
        let hostname = lookup
            .as_lookup()
            .records()
            .iter()
            .find(|r| matches!(r.record_type(), RecordType::A | RecordType::AAAA))
            .map(|r| r.name().to_string().trim_end_matches('.').to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| host.to_string());
        Ok(HostEntry { hostname, addresses })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::net::Ipv4Addr;

    struct FixedResolver {
        names: HashMap<IpAddr, String>,
        addrs: HashMap<String, Vec<IpAddr>>,
    }

    #[async_trait]
    impl Resolve for FixedResolver {
        async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>> {
            self.addrs
                .get(host)
                .cloned()
                .ok_or_else(|| Error::NoRecords(host.to_string()))
        }

        async fn reverse_lookup(&self, ip: IpAddr) -> Result<String> {
            self.names
                .get(&ip)
                .cloned()
                .ok_or_else(|| Error::NoRecords(ip.to_string()))
        }
    }

    #[tokio::test]
    async fn test_host_entry_reverse_then_forward() {
        let ip: IpAddr = "10.0.0.7".parse().unwrap();
        let resolver = FixedResolver {
            names: HashMap::from([(ip, "db.internal".to_string())]),
            addrs: HashMap::from([("db.internal".to_string(), vec![ip])]),
        };

        let entry = host_entry(&resolver, ip).await.unwrap();
        assert_eq!(entry.hostname, "db.internal");
        assert_eq!(entry.addresses, vec![ip]);

        let missing = host_entry(&resolver, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 8))).await;
        assert!(matches!(missing, Err(Error::NoRecords(_))));
    }

    #[test]
    fn test_name_server_override() {
        let settings = ResolverSettings {
            name_servers: vec!["1.1.1.1".into(), "not-an-ip".into()],
            timeout_ms: 1500,
            attempts: 1,
        };
        let (config, options) = resolver_conf(&settings);
        assert!(config
            .name_servers()
            .iter()
            .all(|ns| ns.socket_addr.ip() == IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1))));
        assert_eq!(options.timeout, Duration::from_millis(1500));
        assert_eq!(options.attempts, 1);
    }

    #[tokio::test]
    async fn test_ip_literal_resolves_to_itself() {
        let resolver = DnsResolver::system();
        let addrs = resolver.lookup_ip("127.0.0.1").await.unwrap();
        assert_eq!(addrs, vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]);
        assert!(matches!(resolver.lookup_ip("  ").await, Err(Error::EmptyHost)));
    }

    #[tokio::test]
    async fn test_default_lookup_host_keeps_name() {
        let ip: IpAddr = "10.0.0.7".parse().unwrap();
        let resolver = FixedResolver {
            names: HashMap::new(),
            addrs: HashMap::from([("db.internal".to_string(), vec![ip])]),
        };
        let entry = resolver.lookup_host(" db.internal ").await.unwrap();
        assert_eq!(entry.hostname, "db.internal");
        assert_eq!(entry.addresses, vec![ip]);
    }
}
