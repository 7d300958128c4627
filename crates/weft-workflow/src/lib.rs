#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod compiler;
pub mod definition;
mod error;
pub mod resolver;
pub mod status;

#[doc(hidden)]
pub mod prelude;

pub use error::{WorkflowError, WorkflowResult};

/// Tracing target for graph compilation and status aggregation.
pub const TRACING_TARGET: &str = "weft_workflow";
