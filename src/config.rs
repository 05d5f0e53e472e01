//! Server Configuration
//!
//! Read from environment variables, with defaults for every field.

use crate::session::LatencyConfig;
use std::time::Duration;
use thiserror::Error;

/// Sessions older than this are dropped from the registry
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub latency: LatencyConfig,
    pub session_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            latency: LatencyConfig::default(),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source; unset variables keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = parse_var(&lookup, "PORT")? {
            config.port = port;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "SESSION_TTL_SECS")? {
            config.session_ttl = Duration::from_secs(secs);
        }

        let latency = &mut config.latency;
        for (var, slot) in [
            ("LATENCY_LOGIN_MS", &mut latency.login),
            ("LATENCY_SIGNUP_MS", &mut latency.signup),
            ("LATENCY_GOOGLE_MS", &mut latency.google_login),
            ("LATENCY_GENERATE_MS", &mut latency.generate),
        ] {
            if let Some(ms) = parse_var::<u64>(&lookup, var)? {
                *slot = Duration::from_millis(ms);
            }
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}
