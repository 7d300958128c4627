#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod exporter;
mod store;

pub mod model;
pub mod ntriples;
pub mod sparql;
pub mod vocab;

#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod reqwest;

#[doc(hidden)]
pub mod prelude;

pub use error::{ExportError, ExportResult};
pub use exporter::{ExportConfig, RdfExporter, export};
pub use model::{Graph, Iri, Literal, Term, Triple};
pub use store::{TripleStore, TripleStoreService};

/// Tracing target for RDF export and triple-store operations.
pub const TRACING_TARGET: &str = "weft_semantic";
