//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → HelperConfig (validated, immutable)
//!     → SiteSettings / DnsResolver / body limit for the server
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal (or empty) configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BodyConfig, HelperConfig, ListenerConfig, ObservabilityConfig, ResolverConfig, SiteConfig,
    TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
