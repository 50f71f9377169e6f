//! Request counting stage.

use std::task::{Context, Poll};

use axum::http::Request;
use metrics::Label;
use tower::{Layer, Service};

use crate::observability::metrics::count_request;

/// Increments the monotonic request counter, then delegates.
///
/// Deployment labels are resolved once at startup and reused for every
/// increment. Emission is fire-and-forget: with no recorder installed the
/// increment is a no-op, and it can neither fail nor delay the request.
#[derive(Clone, Debug)]
pub struct RequestCountLayer {
    labels: Vec<Label>,
}

impl RequestCountLayer {
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }
}

impl<S> Layer<S> for RequestCountLayer {
    type Service = RequestCount<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestCount {
            inner,
            labels: self.labels.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RequestCount<S> {
    inner: S,
    labels: Vec<Label>,
}

impl<S, B> Service<Request<B>> for RequestCount<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        count_request(self.labels.clone());
        self.inner.call(request)
    }
}
