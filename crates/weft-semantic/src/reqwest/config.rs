//! SPARQL client configuration.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default SPARQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8086/sparql-auth/";

/// Default named graph.
pub const DEFAULT_GRAPH: &str = "default";

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the SPARQL HTTP client.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct SparqlConfig {
    /// SPARQL endpoint URL
    #[cfg_attr(
        feature = "config",
        arg(long = "sparql-endpoint", env = "SPARQL_ENDPOINT", default_value = DEFAULT_ENDPOINT)
    )]
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Named graph that workflow triples are written to
    #[cfg_attr(
        feature = "config",
        arg(long = "sparql-graph", env = "SPARQL_GRAPH", default_value = DEFAULT_GRAPH)
    )]
    #[serde(default = "default_graph")]
    pub graph: String,

    /// Username for HTTP basic authentication
    #[cfg_attr(
        feature = "config",
        arg(long = "sparql-username", env = "SPARQL_USERNAME")
    )]
    #[serde(default)]
    pub username: Option<String>,

    /// Password for HTTP basic authentication
    #[cfg_attr(
        feature = "config",
        arg(long = "sparql-password", env = "SPARQL_PASSWORD", hide_env_values = true)
    )]
    #[serde(default)]
    pub password: Option<String>,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(id = "sparql_timeout_secs", long = "sparql-timeout", env = "SPARQL_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

fn default_graph() -> String {
    DEFAULT_GRAPH.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for SparqlConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            graph: default_graph(),
            username: None,
            password: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for SparqlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparqlConfig")
            .field("endpoint", &self.endpoint)
            .field("graph", &self.graph)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SparqlConfig {
    /// Creates a configuration for the given endpoint and named graph.
    pub fn new(endpoint: impl Into<String>, graph: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            graph: graph.into(),
            ..Self::default()
        }
    }

    /// Set the basic-auth credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
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
        let config = SparqlConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.graph, "default");
        assert!(config.username.is_none());
        assert_eq!(config.effective_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let config = SparqlConfig::default().with_timeout(0);
        assert_eq!(
            config.effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_debug_hides_password() {
        let config = SparqlConfig::new("http://store/sparql", "urn:g").with_credentials("admin", "secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("secret"));
    }
}
