//! Task compiler for flattening workflow graphs into task lists.
//!
//! The compiler takes a [`Workflow`] and produces one [`TaskSpec`] per
//! operator, in operator declaration order, for the execution engine.
//!
//! # Compilation Process
//!
//! 1. **Link indexing**: Build a [`LinkIndex`] over the workflow's links
//! 2. **Parameters**: Coerce each raw parameter value with [`coerce`]
//! 3. **Inputs**: Resolve each input connector to `"<operator>.<output>"`
//!
//! Tasks are not topologically sorted. Dependencies are carried by the
//! resolved input strings and scheduling is left to the engine. An input that
//! cannot be resolved is recorded as `null` and never fails compilation.

mod coerce;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use self::coerce::{coerce, coerce_str};
use crate::TRACING_TARGET;
use crate::definition::{Operator, OperatorId, Workflow};
use crate::resolver::LinkIndex;

/// Execution-ready projection of one operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Operator display name.
    pub name: String,
    /// Module reference of the runnable implementation.
    pub module: String,
    /// Coerced parameter values keyed by parameter name.
    #[serde(default)]
    pub params: IndexMap<String, Value>,
    /// Resolved inputs keyed by input connector name.
    ///
    /// Each value is `"<producing operator name>.<output connector name>"`,
    /// or `None` when the input is unlinked or its link cannot be followed.
    #[serde(default)]
    pub inputs: IndexMap<String, Option<String>>,
}

/// Compiler that turns a workflow into an ordered task list.
pub struct TaskCompiler<'a> {
    workflow: &'a Workflow,
    links: LinkIndex,
}

impl<'a> TaskCompiler<'a> {
    /// Creates a compiler and indexes the workflow's links.
    pub fn new(workflow: &'a Workflow) -> Self {
        Self {
            workflow,
            links: LinkIndex::build(workflow),
        }
    }

    /// Returns the link index used for input resolution.
    pub fn links(&self) -> &LinkIndex {
        &self.links
    }

    /// Compiles every operator, in operator declaration order.
    pub fn compile(&self) -> Vec<TaskSpec> {
        let tasks: Vec<_> = self
            .workflow
            .operators
            .iter()
            .map(|(id, operator)| self.compile_operator(id, operator))
            .collect();

        tracing::debug!(
            target: TRACING_TARGET,
            tasks = tasks.len(),
            links = self.links.len(),
            "compiled workflow"
        );

        tasks
    }

    /// Compiles a single operator.
    pub fn compile_operator(&self, id: &OperatorId, operator: &Operator) -> TaskSpec {
        let params = operator
            .parameters
            .values()
            .map(|param| (param.name().to_owned(), coerce(param.value())))
            .collect();

        let inputs = operator
            .inputs()
            .iter()
            .map(|(connector_id, connector)| {
                let source = self.resolve_input(id, connector_id);
                if source.is_none() {
                    tracing::trace!(
                        target: TRACING_TARGET,
                        operator = %id,
                        connector = %connector_id,
                        "input left unresolved"
                    );
                }
                (connector.name().to_owned(), source)
            })
            .collect();

        TaskSpec {
            name: operator.name().to_owned(),
            module: operator.module().to_owned(),
            params,
            inputs,
        }
    }

    /// Follows the link into `(operator, connector)` back to its producer.
    fn resolve_input(&self, operator: &OperatorId, connector: &str) -> Option<String> {
        let source = self.links.resolve(operator.as_str(), connector)?;
        let producer = self.workflow.operator(source.operator.as_str())?;
        let output = producer.output(&source.connector)?;
        Some(format!("{}.{}", producer.name(), output.name()))
    }
}

/// Compiles a workflow into its ordered task list.
pub fn compile(workflow: &Workflow) -> Vec<TaskSpec> {
    TaskCompiler::new(workflow).compile()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::definition::{Connector, Link, Parameter};

    fn producer() -> Operator {
        Operator::new("op_0", "demo.producer")
            .with_output("Out0", Connector::new("Out0", "urn:data"))
            .with_parameter("p_0", Parameter::new("threshold", "2.5"))
            .with_parameter("p_1", Parameter::new("label", "one"))
    }

    fn consumer() -> Operator {
        Operator::new("op_1", "demo.consumer")
            .with_input("In0", Connector::new("In0", "urn:data"))
    }

    #[test]
    fn test_compile_linked_pair() {
        let mut workflow = Workflow::new();
        workflow
            .add_operator("op_0", producer())
            .add_operator("op_1", consumer())
            .add_link("0", Link::new("op_0", "Out0", "op_1", "In0"));

        let tasks = compile(&workflow);

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].name, "op_0");
        assert_eq!(tasks[0].module, "demo.producer");
        assert!(tasks[0].inputs.is_empty());
        assert_eq!(tasks[1].inputs["In0"].as_deref(), Some("op_0.Out0"));
    }

    #[test]
    fn test_compile_coerces_params_in_order() {
        let mut workflow = Workflow::new();
        workflow.add_operator("op_0", producer());

        let task = &compile(&workflow)[0];
        let keys: Vec<_> = task.params.keys().map(String::as_str).collect();
        assert_eq!(keys, ["threshold", "label"]);
        assert_eq!(task.params["threshold"], json!(2.5));
        assert_eq!(task.params["label"], json!("one"));
    }

    #[test]
    fn test_compile_without_links_leaves_inputs_null() {
        let mut workflow = Workflow::new();
        for i in 0..3 {
            let op = Operator::new(format!("op_{i}"), "demo")
                .with_input("a", Connector::new("A", "urn:a"))
                .with_input("b", Connector::new("B", "urn:b"));
            workflow.add_operator(format!("op_{i}"), op);
        }

        let tasks = compile(&workflow);
        assert_eq!(tasks.len(), 3);
        assert!(
            tasks
                .iter()
                .all(|task| task.inputs.len() == 2 && task.inputs.values().all(Option::is_none))
        );
    }

    #[test]
    fn test_compile_dangling_references_are_null() {
        let mut workflow = Workflow::new();
        workflow
            .add_operator("op_0", producer())
            .add_operator(
                "op_1",
                consumer().with_input("In1", Connector::new("In1", "urn:data")),
            )
            .add_link("0", Link::new("missing", "Out0", "op_1", "In0"))
            .add_link("1", Link::new("op_0", "nope", "op_1", "In1"));

        let task = &compile(&workflow)[1];
        assert_eq!(task.inputs["In0"], None);
        assert_eq!(task.inputs["In1"], None);
    }

    #[test]
    fn test_compile_keeps_declaration_order() {
        let mut workflow = Workflow::new();
        workflow
            .add_operator("op_1", consumer())
            .add_operator("op_0", producer())
            .add_link("0", Link::new("op_0", "Out0", "op_1", "In0"));

        let names: Vec<_> = compile(&workflow).into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["op_1", "op_0"]);
    }

    #[test]
    fn test_compile_uses_display_names() {
        let workflow = Workflow::from_value(json!({
            "operators": {
                "op_0": {
                    "properties": {
                        "name": "DemoTaskOne", "module": "DemoTaskOneModule",
                        "outputs": {"out_0": {"properties": {"name": "DemoTaskOneOutput"}}}
                    },
                    "parameters": {"param_0": {"properties": {"name": "param0", "value": "0"}}}
                },
                "op_1": {
                    "properties": {
                        "name": "DemoTaskTwo", "module": "DemoTaskTwoModule",
                        "inputs": {"in_0": {"properties": {"name": "DemoTaskTwoInput"}}}
                    }
                }
            },
            "links": {"0": {"fromOperator": "op_0", "fromConnector": "out_0", "toOperator": "op_1", "toConnector": "in_0"}}
        }))
        .unwrap();

        let tasks = serde_json::to_value(compile(&workflow)).unwrap();
        assert_eq!(
            tasks,
            json!([
                {"name": "DemoTaskOne", "module": "DemoTaskOneModule", "params": {"param0": 0}, "inputs": {}},
                {"name": "DemoTaskTwo", "module": "DemoTaskTwoModule", "params": {}, "inputs": {"DemoTaskTwoInput": "DemoTaskOne.DemoTaskOneOutput"}}
            ])
        );
    }

    #[test]
    fn test_compile_is_idempotent() {
        let mut workflow = Workflow::new();
        workflow
            .add_operator("op_0", producer())
            .add_operator("op_1", consumer())
            .add_link("0", Link::new("op_0", "Out0", "op_1", "In0"));

        let compiler = TaskCompiler::new(&workflow);
        assert_eq!(compiler.compile(), compiler.compile());
        assert_eq!(compiler.links().len(), 1);
    }
}
