//! Persisted workflow records.

use serde::{Deserialize, Serialize};
use weft_engine::TaskReport;
use weft_workflow::definition::Workflow;
use weft_workflow::status::ExecutionState;

/// A workflow as stored: the document plus its ID and last execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRecord {
    /// Unique workflow identifier.
    pub id: String,
    /// Identifier of the last execution, if the workflow was ever run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed: Option<String>,
    /// The workflow document.
    #[serde(flatten)]
    pub workflow: Workflow,
}

impl WorkflowRecord {
    /// Creates a record that has never been executed.
    pub fn new(id: impl Into<String>, workflow: Workflow) -> Self {
        Self {
            id: id.into(),
            executed: None,
            workflow,
        }
    }

    /// Returns the owning user.
    pub fn author(&self) -> Option<&str> {
        self.workflow.metadata.author()
    }
}

/// A record with the state of its last execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowWithStatus {
    /// The stored record.
    #[serde(flatten)]
    pub record: WorkflowRecord,
    /// Task reports of the last execution; `None` when unavailable.
    #[serde(default)]
    pub tasks: Option<Vec<TaskReport>>,
    /// Aggregated state of the last execution.
    #[serde(default)]
    pub status: ExecutionState,
}

impl WorkflowWithStatus {
    /// Wraps a record whose execution state could not be determined.
    pub fn unknown(record: WorkflowRecord) -> Self {
        Self {
            record,
            tasks: None,
            status: ExecutionState::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_record_flattens_workflow() {
        let record: WorkflowRecord = serde_json::from_value(json!({
            "id": "wf-1",
            "executed": "exec-9",
            "operators": {},
            "metadata": {"author": "alice"},
            "revision": 2
        }))
        .unwrap();

        assert_eq!(record.id, "wf-1");
        assert_eq!(record.executed.as_deref(), Some("exec-9"));
        assert_eq!(record.author(), Some("alice"));
        assert_eq!(record.workflow.extra["revision"], json!(2));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["id"], json!("wf-1"));
        assert_eq!(back["metadata"]["author"], json!("alice"));
    }

    #[test]
    fn test_unknown_status_serializes() {
        let status = WorkflowWithStatus::unknown(WorkflowRecord::new("wf-1", Workflow::new()));
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["status"], json!("UNKNOWN"));
        assert_eq!(value["tasks"], json!(null));
    }
}
