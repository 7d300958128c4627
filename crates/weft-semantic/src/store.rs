//! Triple-store abstraction and its service wrapper.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use weft_core::{Result, ServiceHealth};

use crate::TRACING_TARGET;
use crate::model::Graph;
use crate::sparql::insert_data_query;

/// Core trait for semantic stores that accept SPARQL updates.
///
/// Implement this trait to plug in a concrete store. Inserts are scoped to
/// the store's named graph.
#[async_trait::async_trait]
pub trait TripleStore: Send + Sync {
    /// Returns the named graph that inserts are written to.
    fn graph_name(&self) -> &str;

    /// Executes a SPARQL 1.1 Update request.
    async fn update(&self, query: &str) -> Result<()>;

    /// Adds every triple of `graph` to the store's named graph.
    async fn insert(&self, graph: &Graph) -> Result<()> {
        let query = insert_data_query(self.graph_name(), graph);
        self.update(&query).await
    }

    /// Performs a health check on the store.
    async fn health_check(&self) -> Result<ServiceHealth>;
}

/// Triple-store wrapper with observability.
///
/// The inner store is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct TripleStoreService {
    inner: Arc<dyn TripleStore>,
}

impl fmt::Debug for TripleStoreService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripleStoreService")
            .field("graph", &self.inner.graph_name())
            .finish_non_exhaustive()
    }
}

impl TripleStoreService {
    /// Creates a new service wrapper.
    pub fn new<S>(store: S) -> Self
    where
        S: TripleStore + 'static,
    {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Creates a service wrapper around an already shared store.
    pub fn from_arc(inner: Arc<dyn TripleStore>) -> Self {
        Self { inner }
    }

    /// Returns the named graph that inserts are written to.
    pub fn graph_name(&self) -> &str {
        self.inner.graph_name()
    }

    /// Adds every triple of `graph` to the store's named graph.
    pub async fn insert(&self, graph: &Graph) -> Result<()> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            graph = self.inner.graph_name(),
            triples = graph.len(),
            "Inserting triples"
        );

        let result = self.inner.insert(graph).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(()) => tracing::debug!(
                target: TRACING_TARGET,
                triples = graph.len(),
                elapsed_ms = elapsed.as_millis(),
                "Triples inserted"
            ),
            Err(error) => tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "Triple insert failed"
            ),
        }

        result
    }

    /// Executes a SPARQL 1.1 Update request.
    pub async fn update(&self, query: &str) -> Result<()> {
        let result = self.inner.update(query).await;
        if let Err(error) = &result {
            tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                "SPARQL update failed"
            );
        }
        result
    }

    /// Performs a health check on the store.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use weft_core::Error;

    use super::*;
    use crate::model::Iri;

    #[derive(Default)]
    struct RecordingStore {
        updates: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl TripleStore for Arc<RecordingStore> {
        fn graph_name(&self) -> &str {
            "urn:graph:test"
        }

        async fn update(&self, query: &str) -> Result<()> {
            if self.fail {
                return Err(Error::external_error().with_message("store rejected update"));
            }
            self.updates.lock().unwrap().push(query.to_owned());
            Ok(())
        }

        async fn health_check(&self) -> Result<ServiceHealth> {
            Ok(ServiceHealth::healthy())
        }
    }

    fn graph() -> Graph {
        let mut graph = Graph::new();
        graph.add("urn:s", "urn:p", Iri::from("urn:o"));
        graph
    }

    #[tokio::test]
    async fn test_insert_builds_scoped_update() {
        let store = Arc::new(RecordingStore::default());
        let service = TripleStoreService::new(store.clone());

        service.insert(&graph()).await.unwrap();

        let updates = store.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert!(updates[0].starts_with("INSERT DATA { GRAPH <urn:graph:test> {"));
        assert!(updates[0].contains("<urn:s> <urn:p> <urn:o> ."));
    }

    #[tokio::test]
    async fn test_insert_propagates_failure() {
        let store = Arc::new(RecordingStore {
            fail: true,
            ..Default::default()
        });
        let service = TripleStoreService::new(store);

        let err = service.insert(&graph()).await.unwrap_err();
        assert_eq!(err.kind(), weft_core::ErrorKind::ExternalError);
        assert_eq!(service.graph_name(), "urn:graph:test");
    }
}
