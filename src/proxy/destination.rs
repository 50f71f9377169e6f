//! The fixed upstream target.

use std::fmt;

use axum::http::uri::{Authority, Scheme};
use thiserror::Error;
use url::Url;

/// Error type for destination parsing.
#[derive(Debug, Error)]
pub enum DestinationError {
    #[error("invalid destination url: {0}")]
    Parse(#[from] url::ParseError),

    #[error("destination url has no host")]
    MissingHost,

    #[error("destination is not a valid http target: {0}")]
    Components(#[from] axum::http::Error),
}

/// The upstream scheme and host every request is rewritten to.
///
/// Parsed once at startup and immutable for the handler's lifetime. Any path
/// or query on the configured URL is ignored; only scheme and authority are
/// kept.
#[derive(Debug, Clone)]
pub struct Destination {
    scheme: Scheme,
    authority: Authority,
}

impl Destination {
    /// Parse a base URL (scheme + host, optional port) into a destination.
    pub fn parse(raw: &str) -> Result<Self, DestinationError> {
        let url = Url::parse(raw)?;
        let host = url.host_str().ok_or(DestinationError::MissingHost)?;

        let scheme = Scheme::try_from(url.scheme()).map_err(axum::http::Error::from)?;
        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let authority =
            Authority::try_from(authority.as_str()).map_err(axum::http::Error::from)?;

        Ok(Self { scheme, authority })
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.authority)
    }
}
