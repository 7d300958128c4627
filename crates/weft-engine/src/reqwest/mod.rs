//! Reqwest-based HTTP client for the execution engine.
//!
//! # Example
//!
//! ```rust,ignore
//! use weft_engine::reqwest::{EngineConfig, ReqwestEngine};
//! use weft_engine::EngineService;
//!
//! let engine = ReqwestEngine::new(EngineConfig::default())?;
//! let service: EngineService = engine.into_service();
//! ```

mod client;
mod config;
mod error;

pub use client::ReqwestEngine;
pub use config::EngineConfig;
pub use error::{Error, Result};

/// Tracing target for engine client operations.
pub const TRACING_TARGET: &str = "weft_engine::reqwest";
