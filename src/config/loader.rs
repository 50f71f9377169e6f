//! Configuration loading from the environment.

use std::path::PathBuf;

use crate::config::schema::ProxySettings;

/// Namespace prefix for all configuration variables.
pub const ENV_PREFIX: &str = "SIGNING_PROXY_";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid { key, value, reason } => {
                write!(f, "invalid value {value:?} for {ENV_PREFIX}{key}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load settings from `SIGNING_PROXY_*` environment variables.
///
/// Unset variables keep their defaults; a present but malformed value is an
/// error, which callers treat as fatal before any listener opens.
pub fn from_env() -> Result<ProxySettings, ConfigError> {
    load(|key| std::env::var(key).ok())
}

fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<ProxySettings, ConfigError> {
    let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));
    let mut settings = ProxySettings::default();

    if let Some(listen) = var("LISTEN") {
        settings.listen_address = listen;
    }
    if let Some(destination) = var("DESTINATION") {
        settings.destination = destination;
    }
    if let Some(raw) = var("LOG_REQUESTS") {
        settings.observability.log_requests = parse_bool("LOG_REQUESTS", &raw)?;
    }
    if let Some(raw) = var("METRICS") {
        settings.observability.metrics_enabled = parse_bool("METRICS", &raw)?;
    }
    if let Some(addr) = var("METRICS_LISTEN") {
        addr.parse::<std::net::SocketAddr>()
            .map_err(|err| invalid("METRICS_LISTEN", &addr, &err.to_string()))?;
        settings.observability.metrics_address = addr;
    }
    if let Some(raw) = var("REQUEST_TIMEOUT_SECS") {
        settings.timeouts.request_secs = parse_secs("REQUEST_TIMEOUT_SECS", &raw)?;
    }
    if let Some(raw) = var("SEND_TIMEOUT_SECS") {
        settings.upstream.send_timeout_secs = parse_secs("SEND_TIMEOUT_SECS", &raw)?;
    }
    if let Some(path) = var("CA_BUNDLE") {
        settings.upstream.ca_bundle = Some(PathBuf::from(path));
    }
    if let Some(token) = var("AUTH_TOKEN") {
        settings.upstream.auth_token = Some(token);
    }

    Ok(settings)
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(invalid(key, raw, "expected true or false")),
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64, ConfigError> {
    let secs: u64 = raw
        .parse()
        .map_err(|_| invalid(key, raw, "expected a whole number of seconds"))?;
    if secs == 0 {
        return Err(invalid(key, raw, "timeout must be positive"));
    }
    Ok(secs)
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load_from(vars: &[(&str, &str)]) -> Result<ProxySettings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_mirror_the_unconfigured_deployment() {
        let settings = load_from(&[]).unwrap();
        assert_eq!(settings.listen_address, "127.0.0.1:8000");
        assert_eq!(settings.destination, "https://s3.amazonaws.com");
        assert!(settings.observability.log_requests);
        assert!(settings.observability.metrics_enabled);
        assert_eq!(settings.upstream.send_timeout_secs, 10);
    }

    #[test]
    fn variables_override_defaults() {
        let settings = load_from(&[
            ("SIGNING_PROXY_LISTEN", "0.0.0.0:9999"),
            ("SIGNING_PROXY_DESTINATION", "https://storage.example"),
            ("SIGNING_PROXY_LOG_REQUESTS", "false"),
            ("SIGNING_PROXY_METRICS", "0"),
            ("SIGNING_PROXY_SEND_TIMEOUT_SECS", "3"),
            ("SIGNING_PROXY_CA_BUNDLE", "/etc/ssl/cacert.pem"),
            ("SIGNING_PROXY_AUTH_TOKEN", "tok"),
        ])
        .unwrap();

        assert_eq!(settings.listen_address, "0.0.0.0:9999");
        assert_eq!(settings.destination, "https://storage.example");
        assert!(!settings.observability.log_requests);
        assert!(!settings.observability.metrics_enabled);
        assert_eq!(settings.upstream.send_timeout_secs, 3);
        assert_eq!(
            settings.upstream.ca_bundle.as_deref(),
            Some(std::path::Path::new("/etc/ssl/cacert.pem"))
        );
        assert_eq!(settings.upstream.auth_token.as_deref(), Some("tok"));
    }

    #[test]
    fn malformed_bool_is_rejected() {
        assert!(load_from(&[("SIGNING_PROXY_LOG_REQUESTS", "yes please")]).is_err());
    }

    #[test]
    fn malformed_timeout_is_rejected() {
        assert!(load_from(&[("SIGNING_PROXY_REQUEST_TIMEOUT_SECS", "soon")]).is_err());
        assert!(load_from(&[("SIGNING_PROXY_REQUEST_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn malformed_metrics_address_is_rejected() {
        assert!(load_from(&[("SIGNING_PROXY_METRICS_LISTEN", "not-an-addr")]).is_err());
    }
}
