//! Signing reverse proxy binary.
//!
//! Startup order: logging → configuration → trust material → sender →
//! handler → metrics exporter → listener. Any failure before the listener is
//! bound terminates the process with a non-zero status; after that, failures
//! stay per-request.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use signing_proxy::config;
use signing_proxy::http::HttpServer;
use signing_proxy::lifecycle::Shutdown;
use signing_proxy::net::tls;
use signing_proxy::observability;
use signing_proxy::proxy::{BearerSender, Destination, HttpSender, ProxyHandler, Sender};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::logging::init_tracing();

    let settings = config::from_env()?;
    tracing::info!(
        listen = %settings.listen_address,
        destination = %settings.destination,
        "configuration loaded"
    );

    let destination = Destination::parse(&settings.destination)?;

    let send_timeout = Duration::from_secs(settings.upstream.send_timeout_secs);
    let transport = match settings.upstream.ca_bundle.as_deref() {
        Some(path) => HttpSender::new(tls::https_connector(tls::load_root_store(path)?), send_timeout),
        None => HttpSender::with_default_roots(send_timeout),
    };
    let sender: Arc<dyn Sender> = match settings.upstream.auth_token.as_deref() {
        Some(token) => Arc::new(BearerSender::new(transport, token)?),
        None => Arc::new(transport),
    };

    let handler = ProxyHandler::new(Some(destination), Some(sender))?;

    if settings.observability.metrics_enabled {
        observability::metrics::init_metrics(settings.observability.metrics_address.parse()?);
    }

    let listener = TcpListener::bind(&settings.listen_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(&settings, handler);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
