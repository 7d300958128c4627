//! SPARQL 1.1 Update builders.

use crate::model::Graph;
use crate::ntriples::escape_iri;

/// Builds an `INSERT DATA` update that adds `triples` to the named `graph`.
pub fn insert_data_query(graph: &str, triples: &Graph) -> String {
    format!(
        "INSERT DATA {{ GRAPH <{}> {{ {} }} }}",
        escape_iri(graph),
        triples.to_ntriples()
    )
}
