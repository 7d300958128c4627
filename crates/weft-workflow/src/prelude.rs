//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use weft_workflow::prelude::*;
//! ```

pub use crate::compiler::{TaskCompiler, TaskSpec, coerce};
pub use crate::definition::{
    Connector, Definition, Link, Operator, OperatorId, Parameter, Workflow, WorkflowMetadata,
};
pub use crate::error::{WorkflowError, WorkflowResult};
pub use crate::resolver::{Endpoint, LinkIndex};
pub use crate::status::{ExecutionState, StatusAggregator};
