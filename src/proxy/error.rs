//! Error taxonomy for the forwarding core.
//!
//! Construction errors go back to the caller (typically fatal at startup);
//! per-request errors map to a response status through [`ProxyError::status`]
//! and never terminate the serving task.

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

/// Failures surfaced by the proxy handler.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Handler constructed without a destination.
    #[error("no destination specified")]
    MissingDestination,

    /// The inbound request could not be rewritten into an outbound one.
    #[error("failed to build proxied request: {0}")]
    RequestBuild(#[from] axum::http::Error),

    /// The sender could not reach or complete against the upstream.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ProxyError {
    /// The single mapping from error kind to response status.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingDestination => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::RequestBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Transmission failures reported by a [`crate::proxy::Sender`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("upstream request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),
}
