//! Network support: outbound trust material.

pub mod tls;
