//! Link types for connecting operator connectors.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::OperatorId;
use super::id::key;

/// A directed edge from one operator's output connector to another
/// operator's input connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(
    name = "LinkBuilder",
    pattern = "owned",
    setter(into, prefix = "with")
)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Producing operator.
    pub from_operator: OperatorId,
    /// Output connector ID on the producing operator.
    #[serde(deserialize_with = "key")]
    pub from_connector: String,
    /// Consuming operator.
    pub to_operator: OperatorId,
    /// Input connector ID on the consuming operator.
    #[serde(deserialize_with = "key")]
    pub to_connector: String,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    #[builder(default)]
    pub extra: Map<String, Value>,
}

impl Link {
    /// Creates a link between two `(operator, connector)` endpoints.
    pub fn new(
        from_operator: impl Into<OperatorId>,
        from_connector: impl Into<String>,
        to_operator: impl Into<OperatorId>,
        to_connector: impl Into<String>,
    ) -> Self {
        Self {
            from_operator: from_operator.into(),
            from_connector: from_connector.into(),
            to_operator: to_operator.into(),
            to_connector: to_connector.into(),
            extra: Map::new(),
        }
    }

    /// Returns a builder for creating a link.
    pub fn builder() -> LinkBuilder {
        LinkBuilder::default()
    }
}
