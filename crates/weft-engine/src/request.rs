//! Engine dispatch request.

use serde::{Deserialize, Serialize};
use weft_workflow::compiler::{TaskCompiler, TaskSpec};
use weft_workflow::definition::{Workflow, WorkflowMetadata};

/// Body of a run request: the compiled task list and the workflow metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Tasks in operator declaration order.
    pub tasks: Vec<TaskSpec>,
    /// Workflow metadata, forwarded verbatim.
    #[serde(default)]
    pub metadata: WorkflowMetadata,
}

impl RunRequest {
    /// Creates a run request from an already compiled task list.
    pub fn new(tasks: Vec<TaskSpec>, metadata: WorkflowMetadata) -> Self {
        Self { tasks, metadata }
    }

    /// Compiles a workflow into a run request.
    pub fn from_workflow(workflow: &Workflow) -> Self {
        Self {
            tasks: TaskCompiler::new(workflow).compile(),
            metadata: workflow.metadata.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use weft_workflow::definition::Operator;

    use super::*;

    #[test]
    fn test_from_workflow() {
        let mut workflow = Workflow::new();
        workflow.metadata.set_author("alice");
        workflow.add_operator("op_0", Operator::new("Reader", "io.read"));

        let request = RunRequest::from_workflow(&workflow);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "tasks": [{"name": "Reader", "module": "io.read", "params": {}, "inputs": {}}],
                "metadata": {"author": "alice"}
            })
        );
    }
}
