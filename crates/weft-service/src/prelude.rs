//! Prelude module for convenient imports.
//!
//! ```rust
//! use weft_service::prelude::*;
//! ```

pub use crate::{
    MemoryStore, PageRequest, UpsertOutcome, WorkflowFilter, WorkflowManager, WorkflowPage,
    WorkflowRecord, WorkflowStore, WorkflowWithStatus,
};
