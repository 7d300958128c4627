//! Prelude module for convenient imports.
//!
//! ```rust
//! use weft_semantic::prelude::*;
//! ```

pub use crate::model::{Graph, Iri, Literal, Term, Triple};
pub use crate::sparql::insert_data_query;
pub use crate::{ExportConfig, ExportError, ExportResult, RdfExporter, TripleStore, TripleStoreService};
