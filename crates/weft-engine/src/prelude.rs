//! Prelude module for convenient imports.
//!
//! ```rust
//! use weft_engine::prelude::*;
//! ```

pub use crate::{
    EngineService, ExecutionEngine, RunRequest, RunResponse, StatusReport, TaskReport,
};
