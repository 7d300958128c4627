#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod service;

pub mod request;
pub mod response;

#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod reqwest;

#[doc(hidden)]
pub mod prelude;

pub use request::RunRequest;
pub use response::{RunResponse, StatusReport, TaskReport};
pub use service::EngineService;
pub use weft_core::{Error, ErrorKind, Result, ServiceHealth, ServiceStatus};

/// Tracing target for execution-engine operations.
pub const TRACING_TARGET: &str = "weft_engine";

/// Core trait for execution engines.
///
/// Implement this trait to dispatch compiled workflows to a concrete engine.
#[async_trait::async_trait]
pub trait ExecutionEngine: Send + Sync {
    /// Dispatches a compiled workflow. Returns the execution identifier.
    async fn run(&self, request: &RunRequest) -> Result<RunResponse>;

    /// Revokes a running or queued execution.
    async fn revoke(&self, execution_id: &str) -> Result<()>;

    /// Fetches the per-task status report of an execution.
    async fn status(&self, execution_id: &str) -> Result<StatusReport>;

    /// Performs a health check on the engine.
    async fn health_check(&self) -> Result<ServiceHealth>;
}
