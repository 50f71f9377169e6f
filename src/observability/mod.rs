//! Observability subsystem: structured logging and metrics exposition.
//!
//! Both sinks are write-only and fire-and-forget; neither can fail or delay
//! a request.

pub mod logging;
pub mod metrics;
