//! Reqwest-based SPARQL client.

use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use url::Url;
use weft_core::ServiceHealth;

use super::{Error, Result, SparqlConfig, TRACING_TARGET};
use crate::{TripleStore, TripleStoreService};

/// Media type of SPARQL 1.1 Update request bodies.
const SPARQL_UPDATE: &str = "application/sparql-update";

/// Media types accepted for query results.
const SPARQL_RESULTS: &str = "application/sparql-results+json,application/json";

/// Inner client that holds the HTTP client and configuration.
struct SparqlClientInner {
    http: Client,
    endpoint: Url,
    config: SparqlConfig,
}

/// SPARQL protocol client for stores that accept updates over HTTP.
///
/// Updates are posted as `application/sparql-update` bodies with the
/// configured named graph passed as `default-graph-uri`. Credentials, when
/// configured, are sent with HTTP basic authentication.
#[derive(Clone)]
pub struct SparqlClient {
    inner: Arc<SparqlClientInner>,
}

impl std::fmt::Debug for SparqlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparqlClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl SparqlClient {
    /// Creates a new SPARQL client with the given configuration.
    pub fn new(config: SparqlConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        let timeout = config.effective_timeout();

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            graph = %config.graph,
            timeout_ms = timeout.as_millis(),
            "Creating SPARQL client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("weft/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(SparqlClientInner {
                http,
                endpoint,
                config,
            }),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &SparqlConfig {
        &self.inner.config
    }

    /// Converts this client into a [`TripleStoreService`] for use with dependency injection.
    pub fn into_service(self) -> TripleStoreService {
        TripleStoreService::new(self)
    }

    /// Attaches credentials and the named graph to a request.
    fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        let config = &self.inner.config;
        let request = request.query(&[("default-graph-uri", config.graph.as_str())]);
        match &config.username {
            Some(username) => request.basic_auth(username, config.password.as_deref()),
            None => request,
        }
    }

    async fn send_update(&self, query: &str) -> Result<()> {
        let request = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .header(CONTENT_TYPE, SPARQL_UPDATE)
            .body(query.to_owned());

        let response = self.prepare(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_ask(&self) -> Result<()> {
        let request = self
            .inner
            .http
            .get(self.inner.endpoint.clone())
            .header(ACCEPT, SPARQL_RESULTS)
            .query(&[("query", "ASK {}")]);

        let response = self.prepare(request).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Status {
                status: status.as_u16(),
                body: String::new(),
            })
        }
    }
}

#[async_trait::async_trait]
impl TripleStore for SparqlClient {
    fn graph_name(&self) -> &str {
        &self.inner.config.graph
    }

    async fn update(&self, query: &str) -> weft_core::Result<()> {
        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %self.inner.endpoint,
            bytes = query.len(),
            "Sending SPARQL update"
        );

        self.send_update(query).await.map_err(Into::into)
    }

    async fn health_check(&self) -> weft_core::Result<ServiceHealth> {
        let started_at = Instant::now();
        let outcome = self.send_ask().await;
        Ok(ServiceHealth::from_check(outcome, started_at.elapsed()))
    }
}
