//! Request logging stage.

use std::task::{Context, Poll};

use axum::http::Request;
use tower::{Layer, Service};

/// Logs method and request target for every inbound request, then delegates.
///
/// The tracing sink can never fail the request; a dropped log line costs
/// nothing but the log line.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestLogLayer;

impl<S> Layer<S> for RequestLogLayer {
    type Service = RequestLog<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLog { inner }
    }
}

#[derive(Clone, Debug)]
pub struct RequestLog<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestLog<S>
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
        tracing::info!(method = %request.method(), target = %request.uri(), "inbound request");
        self.inner.call(request)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use axum::body::Body;
    use tower::{ServiceBuilder, ServiceExt};

    use super::*;

    #[tokio::test]
    async fn delegates_to_inner_service() {
        let service = ServiceBuilder::new()
            .layer(RequestLogLayer)
            .service_fn(|_request: Request<Body>| async {
                Ok::<_, Infallible>("handled")
            });

        let request = Request::builder().uri("/x").body(Body::empty()).unwrap();
        assert_eq!(service.oneshot(request).await.unwrap(), "handled");
    }
}
