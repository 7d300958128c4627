//! Operator, connector and parameter definitions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::null_as_default;

/// Semantic definition of an entity: the URI of its class in the ontology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// Ontology class URI.
    pub uri: String,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Definition {
    /// Creates a definition pointing at the given class URI.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            extra: Map::new(),
        }
    }
}

/// Display properties shared by connectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    /// Display name.
    pub name: String,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named input or output slot on an operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    /// Display properties.
    pub properties: Properties,
    /// Semantic definition of the data this connector carries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<Definition>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Connector {
    /// Creates a connector with a display name and a class URI.
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            properties: Properties {
                name: name.into(),
                extra: Map::new(),
            },
            definition: Some(Definition::new(uri)),
            extra: Map::new(),
        }
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.properties.name
    }

    /// Returns the class URI, if the connector declares one.
    pub fn definition_uri(&self) -> Option<&str> {
        self.definition.as_ref().map(|d| d.uri.as_str())
    }
}

/// Properties of a parameter: its name and its raw, untyped value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterProperties {
    /// Display name, used as the key in compiled tasks.
    pub name: String,
    /// Raw value as entered by the user.
    #[serde(default)]
    pub value: Value,
    /// Value suggested by the component definition.
    #[serde(
        rename = "defaultValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<Value>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named, user-configured value on an operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Name and raw value.
    pub properties: ParameterProperties,
    /// Semantic definition of the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<Definition>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Parameter {
    /// Creates a parameter with a display name and a raw value.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            properties: ParameterProperties {
                name: name.into(),
                value: value.into(),
                default_value: None,
                extra: Map::new(),
            },
            definition: None,
            extra: Map::new(),
        }
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.properties.name
    }

    /// Returns the raw value.
    pub fn value(&self) -> &Value {
        &self.properties.value
    }
}

/// Identity and connectors of an operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorProperties {
    /// Display name.
    pub name: String,
    /// Reference to the runnable implementation.
    pub module: String,
    /// Input connectors keyed by connector ID, in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub inputs: IndexMap<String, Connector>,
    /// Output connectors keyed by connector ID, in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub outputs: IndexMap<String, Connector>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One node of the workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    /// Name, module and connectors.
    pub properties: OperatorProperties,
    /// Parameters keyed by parameter ID, in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: IndexMap<String, Parameter>,
    /// Semantic definition of the component this operator instantiates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<Definition>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Operator {
    /// Creates an operator without connectors or parameters.
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            properties: OperatorProperties {
                name: name.into(),
                module: module.into(),
                inputs: IndexMap::new(),
                outputs: IndexMap::new(),
                extra: Map::new(),
            },
            parameters: IndexMap::new(),
            definition: None,
            extra: Map::new(),
        }
    }

    /// Sets the component definition URI.
    pub fn with_definition(mut self, uri: impl Into<String>) -> Self {
        self.definition = Some(Definition::new(uri));
        self
    }

    /// Adds an input connector.
    pub fn with_input(mut self, id: impl Into<String>, connector: Connector) -> Self {
        self.properties.inputs.insert(id.into(), connector);
        self
    }

    /// Adds an output connector.
    pub fn with_output(mut self, id: impl Into<String>, connector: Connector) -> Self {
        self.properties.outputs.insert(id.into(), connector);
        self
    }

    /// Adds a parameter.
    pub fn with_parameter(mut self, id: impl Into<String>, parameter: Parameter) -> Self {
        self.parameters.insert(id.into(), parameter);
        self
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.properties.name
    }

    /// Returns the module reference.
    pub fn module(&self) -> &str {
        &self.properties.module
    }

    /// Returns the input connector with the given ID.
    pub fn input(&self, id: &str) -> Option<&Connector> {
        self.properties.inputs.get(id)
    }

    /// Returns the output connector with the given ID.
    pub fn output(&self, id: &str) -> Option<&Connector> {
        self.properties.outputs.get(id)
    }

    /// Returns the input connectors in declaration order.
    pub fn inputs(&self) -> &IndexMap<String, Connector> {
        &self.properties.inputs
    }

    /// Returns the output connectors in declaration order.
    pub fn outputs(&self) -> &IndexMap<String, Connector> {
        &self.properties.outputs
    }

    /// Returns the component URI, if the operator declares one.
    pub fn definition_uri(&self) -> Option<&str> {
        self.definition.as_ref().map(|d| d.uri.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_operator_requires_name_and_module() {
        let missing_module = json!({"properties": {"name": "Reader"}});
        assert!(serde_json::from_value::<Operator>(missing_module).is_err());

        let missing_name = json!({"properties": {"module": "io.read"}});
        assert!(serde_json::from_value::<Operator>(missing_name).is_err());
    }

    #[test]
    fn test_operator_defaults_empty_collections() {
        let op: Operator = serde_json::from_value(json!({
            "properties": {"name": "Reader", "module": "io.read", "inputs": null}
        }))
        .unwrap();

        assert!(op.inputs().is_empty());
        assert!(op.outputs().is_empty());
        assert!(op.parameters.is_empty());
        assert!(op.definition.is_none());
    }

    #[test]
    fn test_operator_preserves_unknown_fields() {
        let raw = json!({
            "properties": {"name": "Reader", "module": "io.read", "color": "red"},
            "position": {"x": 10, "y": 20},
            "definition": {"uri": "urn:component:reader", "label": "Reader"}
        });

        let op: Operator = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(op.extra["position"], json!({"x": 10, "y": 20}));
        assert_eq!(op.properties.extra["color"], json!("red"));
        assert_eq!(op.definition.as_ref().unwrap().extra["label"], json!("Reader"));

        let back = serde_json::to_value(&op).unwrap();
        assert_eq!(back["position"], raw["position"]);
        assert_eq!(back["properties"]["color"], raw["properties"]["color"]);
    }

    #[test]
    fn test_connectors_keep_declaration_order() {
        let op: Operator = serde_json::from_value(json!({
            "properties": {
                "name": "Join", "module": "ops.join",
                "inputs": {
                    "z": {"properties": {"name": "Right"}},
                    "a": {"properties": {"name": "Left"}}
                }
            }
        }))
        .unwrap();

        let names: Vec<_> = op.inputs().values().map(Connector::name).collect();
        assert_eq!(names, ["Right", "Left"]);
    }

    #[test]
    fn test_parameter_default_value_rename() {
        let param: Parameter = serde_json::from_value(json!({
            "properties": {"name": "depth", "value": "3", "defaultValue": 1}
        }))
        .unwrap();

        assert_eq!(param.value(), &json!("3"));
        assert_eq!(param.properties.default_value, Some(json!(1)));
    }
}
