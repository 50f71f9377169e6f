//! The request-rewrite-and-forward handler.
//!
//! # Responsibilities
//! - Rewrite the inbound request to target the configured destination
//! - Delegate transmission to the injected [`Sender`]
//! - Copy status and headers (repeated names preserved) to the client
//! - Stream both bodies without buffering
//!
//! Per-request failures are mapped to a response status and contained to that
//! request; nothing here panics or terminates the serving task.

use std::sync::Arc;

use axum::body::Body;
use axum::http::uri::PathAndQuery;
use axum::http::{header, HeaderValue, Request, Response, Uri};
use futures_util::TryStreamExt;

use crate::proxy::destination::Destination;
use crate::proxy::error::ProxyError;
use crate::proxy::sender::{HttpSender, Sender, DEFAULT_SEND_TIMEOUT};

/// Forwards every inbound request to a fixed destination.
///
/// Immutable after construction and therefore safe to share across
/// arbitrarily many concurrent requests.
pub struct ProxyHandler {
    destination: Destination,
    sender: Arc<dyn Sender>,
}

impl ProxyHandler {
    /// Create a handler for the given destination.
    ///
    /// A missing destination is an error; a missing sender falls back to a
    /// plain transport with a fixed timeout.
    pub fn new(
        destination: Option<Destination>,
        sender: Option<Arc<dyn Sender>>,
    ) -> Result<Self, ProxyError> {
        let destination = destination.ok_or(ProxyError::MissingDestination)?;
        let sender = sender
            .unwrap_or_else(|| Arc::new(HttpSender::with_default_roots(DEFAULT_SEND_TIMEOUT)));

        Ok(Self {
            destination,
            sender,
        })
    }

    /// Handle one inbound request.
    ///
    /// Body streams are released on every exit path: an early return drops
    /// the inbound request, and the client dropping the response drops the
    /// upstream body.
    pub async fn handle(&self, request: Request<Body>) -> Response<Body> {
        let outbound = match self.rewrite(request) {
            Ok(outbound) => outbound,
            Err(err) => {
                tracing::warn!(error = %err, "failed to build proxied request");
                return error_response(&err);
            }
        };

        let upstream = match self.sender.send(outbound).await {
            Ok(upstream) => upstream,
            Err(err) => {
                let err = ProxyError::from(err);
                tracing::error!(
                    error = %err,
                    destination = %self.destination,
                    "upstream send failed"
                );
                return error_response(&err);
            }
        };

        relay(upstream)
    }

    /// Build the outbound request: scheme, authority and `Host` header are
    /// replaced with the destination's; method, path, raw query, remaining
    /// headers and the body stream pass through untouched.
    fn rewrite(&self, request: Request<Body>) -> Result<Request<Body>, ProxyError> {
        let (mut parts, body) = request.into_parts();

        let mut uri = parts.uri.into_parts();
        uri.scheme = Some(self.destination.scheme().clone());
        uri.authority = Some(self.destination.authority().clone());
        if uri.path_and_query.is_none() {
            uri.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        parts.uri = Uri::from_parts(uri).map_err(axum::http::Error::from)?;

        let host = HeaderValue::from_str(self.destination.authority().as_str())
            .map_err(axum::http::Error::from)?;
        parts.headers.insert(header::HOST, host);

        Ok(Request::from_parts(parts, body))
    }
}

/// Copy the upstream response to the client: all headers first (append, so a
/// name repeated upstream stays repeated downstream), then the status, then
/// the body as a stream.
fn relay(upstream: Response<Body>) -> Response<Body> {
    let (parts, body) = upstream.into_parts();

    // A copy failure here happens after the status is committed and cannot be
    // corrected; it is logged and the stream error is propagated so the
    // downstream connection closes without a proper message end.
    let body = Body::from_stream(body.into_data_stream().inspect_err(|err| {
        tracing::error!(error = %err, "response body copy aborted mid-stream");
    }));

    let mut response = Response::new(body);
    for (name, value) in parts.headers.iter() {
        response.headers_mut().append(name.clone(), value.clone());
    }
    *response.status_mut() = parts.status;
    response
}

fn error_response(err: &ProxyError) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = err.status();
    response
}
