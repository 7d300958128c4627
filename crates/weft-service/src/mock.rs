//! Scripted collaborators for exercising the workflow manager.
//!
//! [`MockEngine`] hands out sequential execution IDs and serves status
//! reports registered up front. [`MockTripleStore`] records every SPARQL
//! update it receives. Both can be switched into a failing mode.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! weft-service = { version = "...", features = ["test-utils"] }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use weft_core::{Error, Result, ServiceHealth};
use weft_engine::{EngineService, ExecutionEngine, RunRequest, RunResponse, StatusReport};
use weft_semantic::{TripleStore, TripleStoreService};

#[derive(Debug, Default)]
struct EngineState {
    runs: Vec<RunRequest>,
    revoked: Vec<String>,
    reports: HashMap<String, StatusReport>,
    failing: bool,
}

/// Execution engine that answers from scripted state.
///
/// Clones share state, so a test can keep one handle for inspection while
/// the manager owns another.
#[derive(Debug, Clone, Default)]
pub struct MockEngine {
    state: Arc<Mutex<EngineState>>,
}

impl MockEngine {
    /// Creates an engine with no scripted reports.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a clone of this engine into an [`EngineService`].
    pub fn service(&self) -> EngineService {
        EngineService::new(self.clone())
    }

    /// Registers the report returned for `execution_id`.
    pub async fn set_report(&self, execution_id: impl Into<String>, report: StatusReport) {
        let mut state = self.state.lock().await;
        state.reports.insert(execution_id.into(), report);
    }

    /// Makes every subsequent call fail with a network error.
    pub async fn set_failing(&self, failing: bool) {
        self.state.lock().await.failing = failing;
    }

    /// Returns the dispatched run requests.
    pub async fn runs(&self) -> Vec<RunRequest> {
        self.state.lock().await.runs.clone()
    }

    /// Returns the revoked execution IDs.
    pub async fn revoked(&self) -> Vec<String> {
        self.state.lock().await.revoked.clone()
    }
}

fn unreachable_engine() -> Error {
    Error::network_error().with_message("mock engine is failing")
}

#[async_trait::async_trait]
impl ExecutionEngine for MockEngine {
    async fn run(&self, request: &RunRequest) -> Result<RunResponse> {
        let mut state = self.state.lock().await;
        if state.failing {
            return Err(unreachable_engine());
        }

        state.runs.push(request.clone());
        Ok(RunResponse::new(format!("exec-{}", state.runs.len())))
    }

    async fn revoke(&self, execution_id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.failing {
            return Err(unreachable_engine());
        }

        state.revoked.push(execution_id.to_owned());
        Ok(())
    }

    async fn status(&self, execution_id: &str) -> Result<StatusReport> {
        let state = self.state.lock().await;
        if state.failing {
            return Err(unreachable_engine());
        }

        state.reports.get(execution_id).cloned().ok_or_else(|| {
            Error::external_error().with_message(format!("no report for '{execution_id}'"))
        })
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(ServiceHealth::healthy())
    }
}

#[derive(Debug, Default)]
struct StoreState {
    updates: Vec<String>,
    failing: bool,
}

/// Triple store that records SPARQL updates.
#[derive(Debug, Clone)]
pub struct MockTripleStore {
    graph: String,
    state: Arc<Mutex<StoreState>>,
}

impl MockTripleStore {
    /// Creates a store writing to the given named graph.
    pub fn new(graph: impl Into<String>) -> Self {
        Self {
            graph: graph.into(),
            state: Arc::default(),
        }
    }

    /// Wraps a clone of this store into a [`TripleStoreService`].
    pub fn service(&self) -> TripleStoreService {
        TripleStoreService::new(self.clone())
    }

    /// Makes every subsequent update fail.
    pub async fn set_failing(&self, failing: bool) {
        self.state.lock().await.failing = failing;
    }

    /// Returns the received update requests.
    pub async fn updates(&self) -> Vec<String> {
        self.state.lock().await.updates.clone()
    }
}

impl Default for MockTripleStore {
    fn default() -> Self {
        Self::new("default")
    }
}

#[async_trait::async_trait]
impl TripleStore for MockTripleStore {
    fn graph_name(&self) -> &str {
        &self.graph
    }

    async fn update(&self, query: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.failing {
            return Err(Error::external_error().with_message("mock triple store is failing"));
        }

        state.updates.push(query.to_owned());
        Ok(())
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(ServiceHealth::healthy())
    }
}
