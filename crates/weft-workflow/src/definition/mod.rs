//! Workflow definition types.
//!
//! This module contains the validated in-memory form of a workflow document:
//! - [`Operator`]s keyed by [`OperatorId`], each with connectors and parameters
//! - [`Link`]s keyed by an arbitrary link ID
//! - free-form [`WorkflowMetadata`] and timestamps
//!
//! Required fields are enforced while deserializing. Every entity keeps the
//! fields it does not recognize in an `extra` map, so documents round-trip
//! without losing forward-compatible metadata.

use indexmap::IndexMap;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

mod id;
mod link;
mod metadata;
mod operator;
mod timestamp;

pub use id::OperatorId;
pub use link::{Link, LinkBuilder};
pub use metadata::{AUTHOR_KEY, WorkflowMetadata};
pub use operator::{
    Connector, Definition, Operator, OperatorProperties, Parameter, ParameterProperties,
    Properties,
};
pub use timestamp::parse_timestamp;

use self::id::null_as_default;
use crate::error::{WorkflowError, WorkflowResult};

/// A workflow graph: operators, the links between them, and metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Operators keyed by their ID, in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub operators: IndexMap<OperatorId, Operator>,
    /// Links keyed by their ID, in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: IndexMap<String, Link>,
    /// Free-form metadata.
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: WorkflowMetadata,
    /// Creation timestamp. Naive datetimes are read as UTC.
    #[serde(
        default,
        deserialize_with = "timestamp::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Timestamp>,
    /// Last update timestamp. Naive datetimes are read as UTC.
    #[serde(
        default,
        deserialize_with = "timestamp::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Timestamp>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Workflow {
    /// Creates a new empty workflow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a workflow from a JSON string.
    pub fn from_json(json: &str) -> WorkflowResult<Self> {
        serde_json::from_str(json).map_err(WorkflowError::validation)
    }

    /// Parses and validates a workflow from a JSON value.
    pub fn from_value(value: Value) -> WorkflowResult<Self> {
        serde_json::from_value(value).map_err(WorkflowError::validation)
    }

    /// Serializes the workflow back into a JSON value.
    pub fn to_value(&self) -> WorkflowResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Adds an operator, replacing any operator with the same ID.
    pub fn add_operator(&mut self, id: impl Into<OperatorId>, operator: Operator) -> &mut Self {
        self.operators.insert(id.into(), operator);
        self
    }

    /// Adds a link, replacing any link with the same ID.
    pub fn add_link(&mut self, id: impl Into<String>, link: Link) -> &mut Self {
        self.links.insert(id.into(), link);
        self
    }

    /// Returns the operator with the given ID.
    pub fn operator(&self, id: &str) -> Option<&Operator> {
        self.operators.get(id)
    }

    /// Returns the number of operators.
    pub fn operator_count(&self) -> usize {
        self.operators.len()
    }

    /// Replaces the whole graph and metadata with those of `other`.
    ///
    /// Updates are never partial: operators and links are swapped as a unit.
    /// The creation timestamp of `self` is kept when `other` has none.
    pub fn replace_graph(&mut self, other: Workflow) {
        let created_at = other.created_at.or(self.created_at);
        *self = Self { created_at, ..other };
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Value {
        json!({
            "operators": {
                "op_0": {
                    "properties": {
                        "name": "DemoTaskOne",
                        "module": "DemoTaskOneModule",
                        "outputs": {
                            "out_0": {
                                "properties": {"name": "DemoTaskOneOutput"},
                                "definition": {"uri": "https://www.w3.org/#Data0"}
                            }
                        }
                    },
                    "parameters": {
                        "param_0": {"properties": {"name": "param0", "value": 0}}
                    },
                    "definition": {"uri": "https://www.w3.org/#Component0"}
                },
                "op_1": {
                    "properties": {
                        "name": "DemoTaskTwo",
                        "module": "DemoTaskTwoModule",
                        "inputs": {
                            "in_0": {
                                "properties": {"name": "DemoTaskTwoInput"},
                                "definition": {"uri": "https://www.w3.org/#Data0"}
                            }
                        }
                    },
                    "definition": {"uri": "https://www.w3.org/#Component1"}
                }
            },
            "links": {
                "0": {"fromOperator": "op_0", "fromConnector": "out_0", "toOperator": "op_1", "toConnector": "in_0"}
            },
            "metadata": {"label": "sample"}
        })
    }

    #[test]
    fn test_workflow_new() {
        let workflow = Workflow::new();
        assert!(workflow.operators.is_empty());
        assert!(workflow.links.is_empty());
        assert!(workflow.metadata.is_empty());
    }

    #[test]
    fn test_workflow_from_value() {
        let workflow = Workflow::from_value(sample()).unwrap();

        assert_eq!(workflow.operator_count(), 2);
        assert_eq!(workflow.links.len(), 1);
        assert_eq!(workflow.operator("op_1").unwrap().name(), "DemoTaskTwo");
        assert_eq!(workflow.metadata.get("label"), Some(&json!("sample")));
    }

    #[test]
    fn test_workflow_absent_sections_are_empty() {
        let workflow = Workflow::from_json(r#"{"operators": null}"#).unwrap();
        assert!(workflow.operators.is_empty());
        assert!(workflow.links.is_empty());
    }

    #[test]
    fn test_workflow_rejects_malformed_operator() {
        let mut doc = sample();
        doc["operators"]["op_0"]["properties"]
            .as_object_mut()
            .unwrap()
            .remove("module");

        let err = Workflow::from_value(doc).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("module"));
    }

    #[test]
    fn test_workflow_rejects_malformed_link() {
        let mut doc = sample();
        doc["links"]["0"]
            .as_object_mut()
            .unwrap()
            .remove("fromConnector");

        assert!(Workflow::from_value(doc).unwrap_err().is_validation());
    }

    #[test]
    fn test_workflow_rejects_wrong_shape() {
        assert!(Workflow::from_json(r#"{"operators": []}"#).is_err());
        assert!(Workflow::from_json("not json").is_err());
    }

    #[test]
    fn test_workflow_roundtrip_preserves_extras() {
        let mut doc = sample();
        doc["revision"] = json!(4);
        doc["links"]["0"]["style"] = json!("dashed");

        let workflow = Workflow::from_value(doc.clone()).unwrap();
        assert_eq!(workflow.extra["revision"], json!(4));

        let back = workflow.to_value().unwrap();
        assert_eq!(back["revision"], json!(4));
        assert_eq!(back["links"]["0"]["style"], json!("dashed"));
        assert_eq!(Workflow::from_value(back).unwrap(), workflow);
    }

    #[test]
    fn test_workflow_replace_graph() {
        let mut workflow = Workflow::from_value(sample()).unwrap();
        workflow.created_at = Some(Timestamp::UNIX_EPOCH);

        let mut next = Workflow::new();
        next.add_operator("solo", Operator::new("Solo", "solo.module"));
        workflow.replace_graph(next);

        assert_eq!(workflow.operator_count(), 1);
        assert!(workflow.links.is_empty());
        assert!(workflow.metadata.is_empty());
        assert_eq!(workflow.created_at, Some(Timestamp::UNIX_EPOCH));
    }

    #[test]
    fn test_workflow_accepts_naive_timestamps() {
        let workflow = Workflow::from_json(
            r#"{"created_at": "2021-05-20T10:00:00.123456", "updated_at": "2021-05-21T08:30:00+00:00"}"#,
        )
        .unwrap();

        let created = workflow.created_at.unwrap();
        assert_eq!(created.as_second(), 1_621_504_800);
        assert_eq!(created.subsec_microsecond(), 123_456);
        assert!(workflow.updated_at.unwrap() > created);

        let back = Workflow::from_value(workflow.to_value().unwrap()).unwrap();
        assert_eq!(back.created_at, workflow.created_at);
    }

    #[test]
    fn test_workflow_rejects_invalid_timestamp() {
        let err = Workflow::from_json(r#"{"created_at": "not a date"}"#).unwrap_err();
        assert!(err.is_validation());
        assert!(Workflow::from_json(r#"{"created_at": null}"#).unwrap().created_at.is_none());
    }
}
