//! HTTP-facing helpers.
//!
//! # Data Flow
//! ```text
//! Request parts + extensions (RouteData, SiteSettings, SharedResolver)
//!     → context.rs (RequestContext extractor)
//!     → url.rs (host URL, application URL)
//!     → routing / net (route values, client identity)
//!
//! Request body
//!     → body.rs (raw text, bounded by BodyLimit)
//! ```

pub mod body;
pub mod context;
pub mod server;
pub mod url;

pub use body::{read_raw, BodyError, BodyLimit, RawBodyExt};
pub use context::RequestContext;
pub use server::HttpServer;
pub use url::{PathBase, SiteSettings, UrlExt};
