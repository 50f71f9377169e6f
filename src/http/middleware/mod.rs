//! Cross-cutting request stages.
//!
//! Each stage is a tower `Layer`/`Service` pair that does its pre-processing
//! and then delegates to the wrapped service exactly once; no stage runs
//! after the delegate. Stages are composed in a fixed order on the router at
//! startup.

pub mod logging;
pub mod metrics;

pub use logging::RequestLogLayer;
pub use metrics::RequestCountLayer;
