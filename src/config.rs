//! Environment-derived runtime configuration

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port. Bound on 0.0.0.0; defaults to 5000.
    pub port: u16,
    /// Debug-logging toggle; flips the default log filter to `debug`.
    pub debug: bool,
    /// Required `x-metrics-token` value for /admin/stats. Unset disables
    /// the endpoint.
    pub metrics_auth_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value })?,
            Err(_) => 5000,
        };

        let debug = std::env::var("DEBUG").map(|v| !v.is_empty()).unwrap_or(false);

        let metrics_auth_token = std::env::var("METRICS_AUTH_TOKEN").ok().filter(|t| !t.is_empty());

        Ok(Config { port, debug, metrics_auth_token })
    }
}
