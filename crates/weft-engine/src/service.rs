//! Execution-engine service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use weft_core::{Result, ServiceHealth};

use crate::{ExecutionEngine, RunRequest, RunResponse, StatusReport, TRACING_TARGET};

/// Execution-engine wrapper with observability.
///
/// This wrapper adds structured logging to any [`ExecutionEngine`]
/// implementation. The inner engine is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct EngineService {
    inner: Arc<dyn ExecutionEngine>,
}

impl fmt::Debug for EngineService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineService").finish_non_exhaustive()
    }
}

impl EngineService {
    /// Create a new engine service wrapper.
    pub fn new<E>(engine: E) -> Self
    where
        E: ExecutionEngine + 'static,
    {
        Self {
            inner: Arc::new(engine),
        }
    }

    /// Creates a service wrapper around an already shared engine.
    pub fn from_arc(inner: Arc<dyn ExecutionEngine>) -> Self {
        Self { inner }
    }

    /// Dispatches a compiled workflow for execution.
    pub async fn run(&self, request: &RunRequest) -> Result<RunResponse> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            tasks = request.tasks.len(),
            "Dispatching workflow"
        );

        let result = self.inner.run(request).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(response) => tracing::info!(
                target: TRACING_TARGET,
                execution_id = %response.id,
                elapsed_ms = elapsed.as_millis(),
                "Workflow dispatched"
            ),
            Err(error) => tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "Workflow dispatch failed"
            ),
        }

        result
    }

    /// Revokes an execution.
    pub async fn revoke(&self, execution_id: &str) -> Result<()> {
        let result = self.inner.revoke(execution_id).await;

        match &result {
            Ok(()) => tracing::info!(
                target: TRACING_TARGET,
                execution_id,
                "Execution revoked"
            ),
            Err(error) => tracing::error!(
                target: TRACING_TARGET,
                execution_id,
                error = %error,
                "Execution revoke failed"
            ),
        }

        result
    }

    /// Fetches the status report of an execution.
    pub async fn status(&self, execution_id: &str) -> Result<StatusReport> {
        let started_at = Instant::now();
        let result = self.inner.status(execution_id).await;

        match &result {
            Ok(report) => tracing::debug!(
                target: TRACING_TARGET,
                execution_id,
                tasks = report.tasks.len(),
                elapsed_ms = started_at.elapsed().as_millis(),
                "Execution status fetched"
            ),
            Err(error) => tracing::warn!(
                target: TRACING_TARGET,
                execution_id,
                error = %error,
                "Execution status unavailable"
            ),
        }

        result
    }

    /// Performs a health check on the engine.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        self.inner.health_check().await
    }
}
