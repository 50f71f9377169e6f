//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with a catch-all route to the proxy handler
//! - Wire up middleware (request logging, request counting, timeout)
//! - Serve on a caller-supplied listener with graceful shutdown
//!
//! Requests are handled one task each; the handler itself is immutable and
//! shared, so no locking happens on the request path.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;

use crate::config::ProxySettings;
use crate::http::middleware::{RequestCountLayer, RequestLogLayer};
use crate::observability::metrics::deployment_labels;
use crate::proxy::ProxyHandler;

/// Application state injected into the forwarding handler.
#[derive(Clone)]
struct AppState {
    handler: Arc<ProxyHandler>,
}

/// HTTP server hosting the composed proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Compose the middleware stages around the handler.
    ///
    /// Stage order is logging outermost, then counting, then the handler;
    /// each enabled stage runs exactly once per request.
    pub fn new(settings: &ProxySettings, handler: ProxyHandler) -> Self {
        let state = AppState {
            handler: Arc::new(handler),
        };

        // Layers added later wrap everything added before them, so the
        // request timeout sits closest to the handler.
        let mut router = Router::new()
            .route("/", any(forward))
            .route("/{*path}", any(forward))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                settings.timeouts.request_secs,
            )));

        if settings.observability.metrics_enabled {
            router = router.layer(RequestCountLayer::new(deployment_labels()));
        }
        if settings.observability.log_requests {
            router = router.layer(RequestLogLayer);
        }

        Self { router }
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn forward(State(state): State<AppState>, request: Request<Body>) -> Response<Body> {
    state.handler.handle(request).await
}
