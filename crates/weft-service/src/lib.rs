#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod manager;

pub mod pagination;
pub mod record;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

#[doc(hidden)]
pub mod prelude;

pub use manager::{UpsertOutcome, WorkflowManager};
pub use pagination::{PageRequest, Pagination, WorkflowPage};
pub use record::{WorkflowRecord, WorkflowWithStatus};
pub use store::{MemoryStore, WorkflowFilter, WorkflowStore};
pub use weft_core::{Error, ErrorKind, Result};

/// Tracing target for workflow-manager operations.
pub const TRACING_TARGET: &str = "weft_service";
