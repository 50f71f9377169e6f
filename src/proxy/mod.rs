//! The request-rewrite-and-forward core.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → handler.rs (rewrite scheme/host/Host header, keep everything else)
//!     → sender.rs (transmit, optionally adding authentication)
//!     → handler.rs (copy status + headers, stream body back)
//! ```

pub mod destination;
pub mod error;
pub mod handler;
pub mod sender;

pub use destination::{Destination, DestinationError};
pub use error::{ProxyError, TransportError};
pub use handler::ProxyHandler;
pub use sender::{BearerSender, HttpSender, Sender, DEFAULT_SEND_TIMEOUT};
