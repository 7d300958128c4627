//! Reqwest-based SPARQL 1.1 Update client.
//!
//! This module provides a reqwest-based implementation of the [`TripleStore`]
//! trait for stores that expose the SPARQL protocol over HTTP.
//!
//! [`TripleStore`]: crate::TripleStore
//!
//! # Example
//!
//! ```rust,ignore
//! use weft_semantic::reqwest::{SparqlClient, SparqlConfig};
//! use weft_semantic::TripleStoreService;
//!
//! let client = SparqlClient::new(SparqlConfig::default())?;
//! let service: TripleStoreService = client.into_service();
//! ```

mod client;
mod config;
mod error;

pub use client::SparqlClient;
pub use config::SparqlConfig;
pub use error::{Error, Result};

/// Tracing target for SPARQL client operations.
pub const TRACING_TARGET: &str = "weft_semantic::reqwest";
