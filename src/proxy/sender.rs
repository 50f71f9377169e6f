//! The outbound transmission capability.
//!
//! The handler depends on [`Sender`] abstractly; concrete implementations are
//! wired at startup and fully substitutable in tests. [`HttpSender`] is the
//! standard unauthenticated transport; [`BearerSender`] decorates any sender
//! with a static `Authorization` header before delegating.

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderValue, Request, Response};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::proxy::error::TransportError;

/// Per-send timeout used when no sender is supplied at construction.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Transmits one outbound HTTP request and returns the raw upstream response.
///
/// Implementations must be safe for concurrent use; the handler shares one
/// sender across all simultaneous requests.
#[async_trait]
pub trait Sender: Send + Sync {
    async fn send(&self, request: Request<Body>) -> Result<Response<Body>, TransportError>;
}

/// Plain HTTP(S) transport with a fixed per-send timeout.
pub struct HttpSender {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    timeout: Duration,
}

impl HttpSender {
    pub fn new(connector: HttpsConnector<HttpConnector>, timeout: Duration) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(connector);
        Self { client, timeout }
    }

    /// Transport trusting the compiled-in webpki roots.
    ///
    /// Used for non-signing deployments and as the default when the handler
    /// is constructed without a sender.
    pub fn with_default_roots(timeout: Duration) -> Self {
        Self::new(
            HttpsConnectorBuilder::new()
                .with_webpki_roots()
                .https_or_http()
                .enable_http1()
                .build(),
            timeout,
        )
    }
}

#[async_trait]
impl Sender for HttpSender {
    async fn send(&self, request: Request<Body>) -> Result<Response<Body>, TransportError> {
        let response: Response<hyper::body::Incoming> =
            tokio::time::timeout(self.timeout, self.client.request(request))
                .await
                .map_err(|_| TransportError::Timeout(self.timeout))??;

        Ok(response.map(Body::new))
    }
}

/// Decorator adding a static bearer credential to every outbound request.
pub struct BearerSender<S> {
    inner: S,
    authorization: HeaderValue,
}

impl<S> BearerSender<S> {
    pub fn new(inner: S, token: &str) -> Result<Self, axum::http::Error> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(axum::http::Error::from)?;
        authorization.set_sensitive(true);
        Ok(Self {
            inner,
            authorization,
        })
    }
}

#[async_trait]
impl<S: Sender> Sender for BearerSender<S> {
    async fn send(&self, mut request: Request<Body>) -> Result<Response<Body>, TransportError> {
        request
            .headers_mut()
            .insert(header::AUTHORIZATION, self.authorization.clone());
        self.inner.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct CaptureSender {
        seen_authorization: Mutex<Option<String>>,
    }

    #[async_trait]
    impl Sender for CaptureSender {
        async fn send(&self, request: Request<Body>) -> Result<Response<Body>, TransportError> {
            let value = request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            *self.seen_authorization.lock().unwrap() = value;
            Ok(Response::new(Body::empty()))
        }
    }

    #[tokio::test]
    async fn bearer_sender_injects_header_and_delegates() {
        let inner = CaptureSender {
            seen_authorization: Mutex::new(None),
        };
        let sender = BearerSender::new(inner, "sekrit").unwrap();

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        sender.send(request).await.unwrap();

        let seen = sender.inner.seen_authorization.lock().unwrap().clone();
        assert_eq!(seen.as_deref(), Some("Bearer sekrit"));
    }

    #[test]
    fn bearer_sender_rejects_invalid_token() {
        let inner = CaptureSender {
            seen_authorization: Mutex::new(None),
        };
        assert!(BearerSender::new(inner, "bad\ntoken").is_err());
    }
}
