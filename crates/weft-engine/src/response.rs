//! Engine responses: run acknowledgements and status reports.

use indexmap::IndexMap;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use weft_workflow::status::{ExecutionState, StatusAggregator};

use crate::TRACING_TARGET;

/// Acknowledgement of a run request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResponse {
    /// Execution identifier assigned by the engine.
    pub id: String,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RunResponse {
    /// Creates a response carrying only an execution identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: Map::new(),
        }
    }
}

/// State of one task as reported by the engine.
///
/// Mirrors the compiled task and adds execution fields. Every field is
/// optional so that reports from older engine versions still parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: IndexMap<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inputs: IndexMap<String, Value>,
    /// Raw state string, in whatever case the engine used.
    #[serde(default)]
    pub status: Option<String>,
    /// Creation time as sent by the engine; its format varies across versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskReport {
    /// Returns the parsed state, if the reported one is recognized.
    pub fn state(&self) -> Option<ExecutionState> {
        self.status.as_deref().and_then(ExecutionState::parse_lenient)
    }
}

/// Status report for one execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Per-task reports. Entries that are not task-shaped are dropped.
    #[serde(default, deserialize_with = "lenient_tasks")]
    pub tasks: Vec<TaskReport>,
    /// Whether the execution was revoked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_revoked: Option<bool>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StatusReport {
    /// Returns whether the engine reported the execution as revoked.
    pub fn is_revoked(&self) -> bool {
        self.is_revoked.unwrap_or(false)
    }

    /// Folds the task states into one workflow state.
    pub fn aggregate(&self) -> ExecutionState {
        self.aggregate_with(&StatusAggregator::new())
    }

    /// Folds the task states with a custom aggregator.
    pub fn aggregate_with(&self, aggregator: &StatusAggregator) -> ExecutionState {
        let states = self.tasks.iter().map(|task| task.status.as_deref());
        aggregator.aggregate(states, self.is_revoked())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Parses task entries, keeping the status of entries whose other fields
/// have an unexpected shape.
fn lenient_tasks<'de, D>(deserializer: D) -> Result<Vec<TaskReport>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let tasks = raw
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(task) => Some(task),
            Err(error) => {
                let task = salvage_task(entry);
                tracing::debug!(
                    target: TRACING_TARGET,
                    error = %error,
                    kept_status = task.is_some(),
                    "malformed task report"
                );
                task
            }
        })
        .collect();
    Ok(tasks)
}

/// Salvages a task entry field by field. Fields of the wrong type are
/// dropped; unknown fields go to `extra`.
fn salvage_task(entry: Value) -> Option<TaskReport> {
    let Value::Object(mut object) = entry else {
        return None;
    };
    let Some(Value::String(status)) = object.remove("status") else {
        return None;
    };

    let mut take_str = |key: &str| match object.remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    };
    let name = take_str("name").unwrap_or_default();
    let module = take_str("module");

    let mut take_map = |key: &str| match object.remove(key) {
        Some(Value::Object(map)) => map.into_iter().collect(),
        _ => IndexMap::new(),
    };
    let params = take_map("params");
    let inputs = take_map("inputs");

    let mut take_value = |key: &str| object.remove(key).filter(|value| !value.is_null());
    let created_at = take_value("created_at");
    let updated_at = take_value("updated_at");
    let result = take_value("result");

    Some(TaskReport {
        name,
        module,
        params,
        inputs,
        status: Some(status),
        created_at,
        updated_at,
        result,
        extra: object,
    })
}
