//! In-memory workflow store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use weft_core::{Error, Result};

use super::{WorkflowFilter, WorkflowStore};
use crate::TRACING_TARGET;
use crate::pagination::PageRequest;
use crate::record::WorkflowRecord;

/// Workflow store backed by a process-local map.
///
/// Cloning is cheap and clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<String, WorkflowRecord>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records across all authors.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn is_owned_by(record: &WorkflowRecord, author: &str) -> bool {
    record.author() == Some(author)
}

#[async_trait::async_trait]
impl WorkflowStore for MemoryStore {
    async fn upsert(&self, record: WorkflowRecord) -> Result<WorkflowRecord> {
        let mut records = self.records.write().await;

        if let Some(existing) = records.get(&record.id)
            && existing.author() != record.author()
        {
            tracing::warn!(
                target: TRACING_TARGET,
                workflow_id = %record.id,
                author = ?record.author(),
                "Rejected write to a workflow owned by another author"
            );
            return Err(Error::not_found()
                .with_message(format!("workflow '{}' not found", record.id)));
        }

        let stored = match records.remove(&record.id) {
            Some(mut existing) => {
                existing.workflow.replace_graph(record.workflow);
                if record.executed.is_some() {
                    existing.executed = record.executed;
                }
                existing
            }
            None => record,
        };

        tracing::trace!(
            target: TRACING_TARGET,
            workflow_id = %stored.id,
            "Workflow record written"
        );

        records.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn get(&self, author: &str, id: &str) -> Result<Option<WorkflowRecord>> {
        let records = self.records.read().await;
        Ok(records
            .get(id)
            .filter(|record| is_owned_by(record, author))
            .cloned())
    }

    async fn find(
        &self,
        author: &str,
        filter: &WorkflowFilter,
        page: Option<PageRequest>,
    ) -> Result<(Vec<WorkflowRecord>, usize)> {
        let records = self.records.read().await;

        let mut matches: Vec<_> = records
            .values()
            .filter(|record| is_owned_by(record, author) && filter.matches(record))
            .cloned()
            .collect();
        drop(records);

        // Newest first; records never updated sort last.
        matches.sort_by(|a, b| {
            b.workflow
                .updated_at
                .cmp(&a.workflow.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let total = matches.len();
        let items = match page {
            Some(page) => page.apply(matches),
            None => matches,
        };
        Ok((items, total))
    }

    async fn set_executed(&self, id: &str, execution_id: &str) -> Result<()> {
        let mut records = self.records.write().await;
        let record = records.get_mut(id).ok_or_else(|| {
            Error::not_found().with_message(format!("workflow '{id}' does not exist"))
        })?;

        record.executed = Some(execution_id.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use weft_workflow::definition::{Operator, Workflow};

    use super::*;

    fn owned(id: &str, author: &str, updated_secs: Option<i64>) -> WorkflowRecord {
        let mut workflow = Workflow::new();
        workflow.metadata.set_author(author);
        workflow.updated_at = updated_secs.map(|s| Timestamp::from_second(s).unwrap());
        WorkflowRecord::new(id, workflow)
    }

    #[tokio::test]
    async fn test_get_is_scoped_to_author() {
        let store = MemoryStore::new();
        store.upsert(owned("wf-1", "alice", None)).await.unwrap();

        assert!(store.get("alice", "wf-1").await.unwrap().is_some());
        assert!(store.get("bob", "wf-1").await.unwrap().is_none());
        assert!(store.get("alice", "wf-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_keeps_execution_and_creation() {
        let store = MemoryStore::new();

        let mut first = owned("wf-1", "alice", Some(10));
        first.workflow.created_at = Some(Timestamp::UNIX_EPOCH);
        store.upsert(first).await.unwrap();
        store.set_executed("wf-1", "exec-1").await.unwrap();

        let mut second = owned("wf-1", "alice", Some(20));
        second
            .workflow
            .add_operator("solo", Operator::new("Solo", "solo.module"));
        let stored = store.upsert(second).await.unwrap();

        assert_eq!(stored.executed.as_deref(), Some("exec-1"));
        assert_eq!(stored.workflow.created_at, Some(Timestamp::UNIX_EPOCH));
        assert_eq!(stored.workflow.operator_count(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_sorts_and_paginates() {
        let store = MemoryStore::new();
        store.upsert(owned("old", "alice", Some(10))).await.unwrap();
        store.upsert(owned("new", "alice", Some(30))).await.unwrap();
        store.upsert(owned("mid", "alice", Some(20))).await.unwrap();
        store.upsert(owned("never", "alice", None)).await.unwrap();
        store.upsert(owned("other", "bob", Some(40))).await.unwrap();

        let filter = WorkflowFilter::new();
        let (all, total) = store.find("alice", &filter, None).await.unwrap();
        let ids: Vec<_> = all.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid", "old", "never"]);
        assert_eq!(total, 4);

        let (page, total) = store
            .find("alice", &filter, Some(PageRequest::new(2, 3)))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, "never");
        assert_eq!(total, 4);
    }

    #[tokio::test]
    async fn test_upsert_rejects_other_author() {
        let store = MemoryStore::new();
        store.upsert(owned("wf-1", "alice", Some(10))).await.unwrap();
        store.set_executed("wf-1", "exec-1").await.unwrap();

        let err = store.upsert(owned("wf-1", "bob", Some(20))).await.unwrap_err();
        assert_eq!(err.kind(), weft_core::ErrorKind::NotFound);

        let kept = store.get("alice", "wf-1").await.unwrap().unwrap();
        assert_eq!(kept.workflow.updated_at, Some(Timestamp::from_second(10).unwrap()));
        assert_eq!(kept.executed.as_deref(), Some("exec-1"));
        assert!(store.get("bob", "wf-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_executed_missing_record() {
        let store = MemoryStore::new();
        let err = store.set_executed("wf-1", "exec-1").await.unwrap_err();
        assert_eq!(err.kind(), weft_core::ErrorKind::NotFound);
    }
}
