//! Engine client configuration.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default engine host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default engine port.
pub const DEFAULT_PORT: u16 = 8081;

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the execution-engine HTTP client.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct EngineConfig {
    /// Execution engine host
    #[cfg_attr(
        feature = "config",
        arg(long = "engine-host", env = "ENGINE_HOST", default_value = DEFAULT_HOST)
    )]
    #[serde(default = "default_host")]
    pub host: String,

    /// Execution engine port
    #[cfg_attr(
        feature = "config",
        arg(long = "engine-port", env = "ENGINE_PORT", default_value = "8081")
    )]
    #[serde(default = "default_port")]
    pub port: u16,

    /// Token sent in the `x-token` header
    #[cfg_attr(
        feature = "config",
        arg(long = "engine-token", env = "ENGINE_TOKEN", default_value = "", hide_env_values = true)
    )]
    #[serde(default)]
    pub token: String,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(id = "engine_timeout_secs", long = "engine-timeout", env = "ENGINE_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    DEFAULT_HOST.to_owned()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("token", &if self.token.is_empty() { "" } else { "***" })
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl EngineConfig {
    /// Creates a configuration for the given host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Set the API token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Returns the base URL of the engine API.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout_secs == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.timeout_secs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.base_url(), "http://localhost:8081");
        assert!(config.token.is_empty());
        assert_eq!(config.effective_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::new("engine.internal", 9000)
            .with_token("t0ken")
            .with_timeout(0);

        assert_eq!(config.base_url(), "http://engine.internal:9000");
        assert_eq!(config.effective_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(!format!("{config:?}").contains("t0ken"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"host": "drama"}"#).unwrap();
        assert_eq!(config.host, "drama");
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
