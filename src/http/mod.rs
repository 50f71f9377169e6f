//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route)
//!     → middleware/ (request logging, request counting)
//!     → proxy::ProxyHandler (rewrite, send, relay)
//!     → client
//! ```

pub mod middleware;
pub mod server;

pub use server::HttpServer;
