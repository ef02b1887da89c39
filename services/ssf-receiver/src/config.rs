//! Type-Safe Configuration with Validation
//!
//! Loaded from environment variables (and a `.env` file when present) at
//! startup. Every setting has a default suitable for a local lab.

use rust_common::TracingConfig;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default listen port, where the lab's file-access monitor pushes SETs.
pub const DEFAULT_PORT: u16 = 8082;

/// Default cap on an inbound SET body.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid URL format
    #[error("Invalid URL for {field}: {reason}")]
    InvalidUrl {
        /// Variable name
        field: String,
        /// Parser message
        reason: String,
    },

    /// Invalid port number
    #[error("Invalid port: must be between 1 and 65535")]
    InvalidPort,

    /// Host and port do not form a socket address
    #[error("Invalid listen address {0}")]
    InvalidAddress(String),

    /// A size or interval that must be positive was zero
    #[error("Invalid {0}: must be greater than 0")]
    ZeroValue(&'static str),

    /// Environment variable parse error
    #[error("Failed to parse environment variable {name}: {reason}")]
    ParseError {
        /// Variable name
        name: String,
        /// Parser message
        reason: String,
    },
}

/// Service configuration with validation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port (1-65535)
    pub port: u16,
    /// Issuer identity advertised in the SSF configuration document
    pub receiver_issuer: Url,
    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
    /// Dashboard auto-refresh interval in seconds
    pub dashboard_refresh_seconds: u64,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,
    /// Fallback log level when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
}

impl Config {
    /// Loads configuration from the process environment with validation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_var(&lookup, "PORT", DEFAULT_PORT)?,
            receiver_issuer: parse_url_var(
                &lookup,
                "RECEIVER_ISSUER",
                "https://ssf-lab-receiver.example.com",
            )?,
            max_body_bytes: parse_var(&lookup, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            dashboard_refresh_seconds: parse_var(&lookup, "DASHBOARD_REFRESH_SECONDS", 5)?,
            shutdown_timeout_seconds: parse_var(&lookup, "SHUTDOWN_TIMEOUT", 30)?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_json: parse_var(&lookup, "LOG_JSON", false)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::ZeroValue("MAX_BODY_BYTES"));
        }
        if self.dashboard_refresh_seconds == 0 {
            return Err(ConfigError::ZeroValue("DASHBOARD_REFRESH_SECONDS"));
        }
        Ok(())
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddress`] if `host` is not an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }

    /// Issuer as advertised, without the trailing slash `Url` adds to bare hosts.
    #[must_use]
    pub fn receiver_issuer_str(&self) -> &str {
        self.receiver_issuer.as_str().trim_end_matches('/')
    }

    /// Graceful shutdown timeout.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }

    /// Tracing settings for this service.
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        TracingConfig::default()
            .with_service_name("ssf-receiver")
            .with_log_level(&self.log_level)
            .with_json_output(self.log_json)
    }
}

/// Parse a variable with a default value.
fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(val) => val.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Parse a URL variable with a default value.
fn parse_url_var<F>(lookup: &F, name: &str, default: &str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let url_str = lookup(name).unwrap_or_else(|| default.to_string());
    Url::parse(&url_str).map_err(|e| ConfigError::InvalidUrl {
        field: name.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8082);
        assert_eq!(config.receiver_issuer_str(), "https://ssf-lab-receiver.example.com");
        assert_eq!(config.max_body_bytes, 1_048_576);
        assert_eq!(config.dashboard_refresh_seconds, 5);
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(30));
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("RECEIVER_ISSUER", "https://receiver.internal/ssf"),
            ("LOG_JSON", "true"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:9000");
        assert_eq!(config.receiver_issuer_str(), "https://receiver.internal/ssf");
        assert!(config.tracing_config().json_output);
    }

    #[test]
    fn test_invalid_port() {
        assert!(matches!(config_with(&[("PORT", "0")]), Err(ConfigError::InvalidPort)));
        assert!(matches!(
            config_with(&[("PORT", "not-a-port")]),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_invalid_issuer() {
        assert!(matches!(
            config_with(&[("RECEIVER_ISSUER", "not a url")]),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_zero_body_limit() {
        assert!(matches!(
            config_with(&[("MAX_BODY_BYTES", "0")]),
            Err(ConfigError::ZeroValue("MAX_BODY_BYTES"))
        ));
    }

    #[test]
    fn test_hostname_is_not_a_socket_addr() {
        let config = config_with(&[("HOST", "localhost")]).unwrap();
        assert!(matches!(config.socket_addr(), Err(ConfigError::InvalidAddress(_))));
    }
}
