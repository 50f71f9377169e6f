//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the signing proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    /// Listen address for the local, unauthenticated side.
    pub listen_address: String,

    /// Base URL (scheme + host) every request is forwarded to.
    pub destination: String,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Upstream transport settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            listen_address: "127.0.0.1:8000".to_string(),
            destination: "https://s3.amazonaws.com".to_string(),
            timeouts: TimeoutConfig::default(),
            upstream: UpstreamConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for one inbound request/response.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Upstream transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Per-send timeout on the outbound transport.
    pub send_timeout_secs: u64,

    /// Optional PEM bundle replacing the default trust roots.
    pub ca_bundle: Option<PathBuf>,

    /// Optional static bearer credential added to every outbound request.
    pub auth_token: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            send_timeout_secs: 10,
            ca_bundle: None,
            auth_token: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log method and target for every inbound request.
    pub log_requests: bool,

    /// Enable the request counter and its Prometheus exporter.
    pub metrics_enabled: bool,

    /// Metrics exporter bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_requests: true,
            metrics_enabled: true,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
