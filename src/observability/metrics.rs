//! Metrics collection and exposition.
//!
//! One counter: `signing_proxy_requests_total`, tagged with deployment
//! labels resolved once at startup. Exposition is a Prometheus scrape
//! endpoint; a failed exporter install is logged and serving continues
//! without metrics.

use std::net::SocketAddr;

use metrics::Label;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Total requests seen by the proxy, incremented by the counting stage.
pub const REQUESTS_TOTAL: &str = "signing_proxy_requests_total";

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    if let Err(err) = PrometheusBuilder::new().with_http_listener(addr).install() {
        tracing::error!(error = %err, "failed to install metrics exporter; metrics disabled");
    } else {
        tracing::info!(address = %addr, "metrics exporter listening");
    }
}

/// Record one inbound request.
pub fn count_request(labels: Vec<Label>) {
    metrics::counter!(REQUESTS_TOTAL, labels).increment(1);
}

/// Labels describing where this process runs, resolved once at startup.
///
/// Missing environment metadata yields an empty label set, not an error.
pub fn deployment_labels() -> Vec<Label> {
    labels_from(|key| std::env::var(key).ok())
}

fn labels_from(lookup: impl Fn(&str) -> Option<String>) -> Vec<Label> {
    let region = lookup("AWS_REGION")
        .or_else(|| lookup("AWS_DEFAULT_REGION"))
        .filter(|region| !region.is_empty());

    match region {
        Some(region) => vec![Label::new("region", region)],
        None => Vec::new(),
    }
}
