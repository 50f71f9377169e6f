//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! SIGNING_PROXY_* environment variables
//!     → loader.rs (lookup, parse, validate)
//!     → ProxySettings (immutable once loaded)
//!     → passed by reference into server and handler construction
//! ```
//!
//! Settings are read once at startup and never reloaded; a malformed value
//! is fatal before any listener opens.

pub mod loader;
pub mod schema;

pub use loader::{from_env, ConfigError};
pub use schema::{ObservabilityConfig, ProxySettings, TimeoutConfig, UpstreamConfig};
