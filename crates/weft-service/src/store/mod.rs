//! Workflow persistence.
//!
//! The manager talks to storage only through [`WorkflowStore`], so any
//! document database can back it. [`MemoryStore`] is the bundled
//! implementation used by tests and offline tooling.

use weft_core::Result;

use crate::pagination::PageRequest;
use crate::record::WorkflowRecord;

mod memory;

pub use memory::MemoryStore;

/// Search criteria for stored workflows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowFilter {
    /// Restricts results to the workflow with this ID.
    pub id: Option<String>,
    /// Metadata `key = value` pairs that must all be present.
    pub metadata: Vec<(String, String)>,
}

impl WorkflowFilter {
    /// Creates a filter that matches every workflow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to one workflow ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a required metadata pair.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// Returns whether `record` satisfies the filter.
    pub fn matches(&self, record: &WorkflowRecord) -> bool {
        if self.id.as_deref().is_some_and(|id| id != record.id) {
            return false;
        }

        let pairs = self
            .metadata
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()));
        record.workflow.metadata.matches(pairs)
    }
}

/// Storage backend for workflow records.
///
/// Reads are scoped to an author: a record is visible only to the user
/// recorded in its `metadata.author`.
#[async_trait::async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Inserts or updates a record by ID and returns the stored version.
    ///
    /// Fields the incoming record leaves unset keep their stored value; this
    /// applies to `executed` and `created_at`.
    /// Fails with [`ErrorKind::NotFound`] without writing when a record with
    /// this ID belongs to another author.
    ///
    /// [`ErrorKind::NotFound`]: weft_core::ErrorKind::NotFound
    async fn upsert(&self, record: WorkflowRecord) -> Result<WorkflowRecord>;

    /// Fetches one record owned by `author`.
    async fn get(&self, author: &str, id: &str) -> Result<Option<WorkflowRecord>>;

    /// Searches records owned by `author`, newest `updated_at` first.
    ///
    /// Returns the requested page (every match when `page` is `None`) and the
    /// total number of matches.
    async fn find(
        &self,
        author: &str,
        filter: &WorkflowFilter,
        page: Option<PageRequest>,
    ) -> Result<(Vec<WorkflowRecord>, usize)>;

    /// Records the identifier of the latest execution.
    async fn set_executed(&self, id: &str, execution_id: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use weft_workflow::definition::Workflow;

    use super::*;

    fn record(id: &str, metadata: serde_json::Value) -> WorkflowRecord {
        let workflow = Workflow::from_value(json!({"metadata": metadata})).unwrap();
        WorkflowRecord::new(id, workflow)
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert!(WorkflowFilter::new().matches(&record("wf-1", json!({}))));
    }

    #[test]
    fn test_filter_by_id_and_metadata() {
        let stored = record("wf-1", json!({"label": "nightly", "retries": 3}));

        assert!(WorkflowFilter::new().with_id("wf-1").matches(&stored));
        assert!(!WorkflowFilter::new().with_id("wf-2").matches(&stored));
        assert!(
            WorkflowFilter::new()
                .with_metadata("label", "nightly")
                .with_metadata("retries", "3")
                .matches(&stored)
        );
        assert!(
            !WorkflowFilter::new()
                .with_id("wf-1")
                .with_metadata("label", "weekly")
                .matches(&stored)
        );
    }
}
