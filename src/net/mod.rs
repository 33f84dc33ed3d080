//! Network identity of the client.
//!
//! # Data Flow
//! ```text
//! Request (ConnectInfo, X-Forwarded-For)
//!     → client.rs (user host address)
//!     → resolver.rs (forward lookup, host entry)
//!     → client.rs (prefer IPv4, fall back to input)
//!
//! Hostname:
//!     IP → resolver.rs (reverse lookup) → name or ""
//! ```
//!
//! # Design Decisions
//! - DNS access goes through the `Resolve` trait so callers can swap it
//! - All helpers return strings; failures are logged at debug and absorbed

pub mod client;
pub mod resolver;

pub use client::{client_hostname, client_ip_address, map_to_ipv4, user_host_address};
pub use resolver::{host_entry, DnsResolver, HostEntry, Resolve, SharedResolver};
