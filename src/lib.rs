//! Signing reverse proxy library.
//!
//! A single-hop reverse proxy that rewrites every inbound request to a fixed
//! upstream destination and delegates transmission to an injected
//! [`proxy::Sender`], so local clients without long-lived credentials can
//! talk to an authenticated remote API through an unauthenticated listener.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod proxy;

pub use config::ProxySettings;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::{Destination, ProxyHandler};
