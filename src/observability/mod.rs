//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Helpers and server produce:
//!     → tracing events (debug for absorbed failures, info for lifecycle)
//!     → logging.rs (subscriber: env filter + fmt layer)
//! ```
//!
//! # Design Decisions
//! - RUST_LOG wins over the configured log level
//! - Library code only emits events; installing a subscriber is the binary's job

pub mod logging;

pub use logging::init_logging;
