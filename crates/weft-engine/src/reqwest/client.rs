//! Reqwest-based execution-engine client.

use std::sync::Arc;
use std::time::Instant;

use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use weft_core::ServiceHealth;

use super::{EngineConfig, Error, Result, TRACING_TARGET};
use crate::{EngineService, ExecutionEngine, RunRequest, RunResponse, StatusReport};

/// Header carrying the engine API token.
const TOKEN_HEADER: &str = "x-token";

const RUN_PATH: &str = "/api/v2/workflow/run";
const REVOKE_PATH: &str = "/api/v2/workflow/revoke";
const STATUS_PATH: &str = "/api/v2/workflow/status";

/// Inner client that holds the HTTP client and configuration.
struct ReqwestEngineInner {
    http: Client,
    base_url: String,
    config: EngineConfig,
}

/// HTTP client for the execution engine's workflow API.
#[derive(Clone)]
pub struct ReqwestEngine {
    inner: Arc<ReqwestEngineInner>,
}

impl std::fmt::Debug for ReqwestEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestEngine")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestEngine {
    /// Creates a new engine client with the given configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let timeout = config.effective_timeout();
        let base_url = config.base_url();

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %base_url,
            timeout_ms = timeout.as_millis(),
            "Creating engine client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("weft/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ReqwestEngineInner {
                http,
                base_url,
                config,
            }),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Converts this client into an [`EngineService`] for use with dependency injection.
    pub fn into_service(self) -> EngineService {
        EngineService::new(self)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response> {
        tracing::debug!(
            target: TRACING_TARGET,
            resource = path,
            "Calling execution engine"
        );

        let response = request
            .header(TOKEN_HEADER, &self.inner.config.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                resource: path.to_owned(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl ExecutionEngine for ReqwestEngine {
    async fn run(&self, request: &RunRequest) -> weft_core::Result<RunResponse> {
        let http = self.inner.http.post(self.url(RUN_PATH)).json(request);
        let response = self.send(RUN_PATH, http).await?;
        Ok(response.json().await.map_err(Error::from)?)
    }

    async fn revoke(&self, execution_id: &str) -> weft_core::Result<()> {
        let http = self
            .inner
            .http
            .post(self.url(REVOKE_PATH))
            .query(&[("id", execution_id)]);
        let response = self.send(REVOKE_PATH, http).await?;

        // The body is informational; a success status is the acknowledgement.
        let body: Option<Value> = response.json().await.ok();
        tracing::debug!(
            target: TRACING_TARGET,
            execution_id,
            body = ?body,
            "Revoke acknowledged"
        );
        Ok(())
    }

    async fn status(&self, execution_id: &str) -> weft_core::Result<StatusReport> {
        let http = self
            .inner
            .http
            .get(self.url(STATUS_PATH))
            .query(&[("id", execution_id)]);
        let response = self.send(STATUS_PATH, http).await?;
        Ok(response.json().await.map_err(Error::from)?)
    }

    async fn health_check(&self) -> weft_core::Result<ServiceHealth> {
        let started_at = Instant::now();
        let outcome = self.inner.http.get(self.url("/")).send().await;
        Ok(ServiceHealth::from_check(outcome, started_at.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_urls() {
        let engine = ReqwestEngine::new(EngineConfig::new("drama", 8081)).unwrap();
        assert_eq!(engine.url(RUN_PATH), "http://drama:8081/api/v2/workflow/run");
    }

    #[tokio::test]
    async fn test_unreachable_engine() {
        let config = EngineConfig::new("127.0.0.1", 9).with_timeout(2);
        let engine = ReqwestEngine::new(config).unwrap();

        let health = engine.health_check().await.unwrap();
        assert!(!health.is_healthy());

        let err = engine.status("exec-1").await.unwrap_err();
        assert!(err.kind().is_retryable());
    }
}
