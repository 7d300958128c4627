//! Workflow to RDF export.
//!
//! The exporter describes the structure of a workflow: one `dmop:Workflow`
//! node with its task count, and one task node per operator carrying its name,
//! its connector counts, the classes of its connectors and its component.
//! Connectors never get their own node, only their declared class.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use weft_workflow::definition::{Connector, Operator, OperatorId, Workflow};

use crate::error::{ExportError, ExportResult};
use crate::model::{Graph, Iri, Literal};
use crate::{TRACING_TARGET, vocab};

/// Configuration for RDF export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ExportConfig {
    /// Namespace prefixed to `Workflow{id}` to form workflow node IRIs
    #[cfg_attr(
        feature = "config",
        arg(long = "workflow-namespace", env = "WORKFLOW_NAMESPACE", default_value = vocab::TITAN)
    )]
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_namespace() -> String {
    vocab::TITAN.to_owned()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
        }
    }
}

impl ExportConfig {
    /// Set the workflow namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

/// Converts workflows into RDF graphs.
#[derive(Debug, Clone, Default)]
pub struct RdfExporter {
    config: ExportConfig,
}

impl RdfExporter {
    /// Creates an exporter with the given configuration.
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Returns the exporter configuration.
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Returns the IRI of the workflow node for `workflow_id`.
    pub fn workflow_iri(&self, workflow_id: &str) -> Iri {
        Iri::new(format!("{}Workflow{}", self.config.namespace, workflow_id))
    }

    /// Returns the IRI of the task node for one operator of a workflow.
    ///
    /// The component URI is suffixed with the workflow ID and the operator key
    /// so that reusing a component never merges two task nodes.
    pub fn task_iri(component: &str, workflow_id: &str, operator: &OperatorId) -> Iri {
        Iri::new(format!("{component}-{workflow_id}-{operator}"))
    }

    /// Exports the workflow as a graph.
    ///
    /// Fails on the first operator or connector without a definition URI.
    pub fn export(&self, workflow: &Workflow, workflow_id: &str) -> ExportResult<Graph> {
        let mut graph = Graph::new();
        let node = self.workflow_iri(workflow_id);

        graph
            .add(node.clone(), vocab::RDF_TYPE, Iri::from(vocab::WORKFLOW))
            .add(
                node.clone(),
                vocab::NUM_TASK,
                Literal::count(workflow.operator_count()),
            );

        for (id, operator) in &workflow.operators {
            export_operator(&mut graph, &node, workflow_id, id, operator)?;
        }

        tracing::debug!(
            target: TRACING_TARGET,
            workflow_id,
            triples = graph.len(),
            "exported workflow"
        );

        Ok(graph)
    }
}

fn export_operator(
    graph: &mut Graph,
    workflow: &Iri,
    workflow_id: &str,
    id: &OperatorId,
    operator: &Operator,
) -> ExportResult<()> {
    let component = operator
        .definition_uri()
        .ok_or_else(|| ExportError::missing_operator_definition(id.as_str()))?;
    let task = RdfExporter::task_iri(component, workflow_id, id);

    graph
        .add(workflow.clone(), vocab::HAS_TASK, task.clone())
        .add(task.clone(), vocab::HAS_NAME, Literal::plain(operator.name()))
        .add(
            task.clone(),
            vocab::NUMBER_OF_INPUTS,
            Literal::count(operator.inputs().len()),
        );
    for (connector_id, connector) in operator.inputs() {
        let class = connector_class(id, "input", connector_id, connector)?;
        graph.add(task.clone(), vocab::SPECIFIES_INPUT_CLASS, class);
    }

    graph.add(
        task.clone(),
        vocab::NUMBER_OF_OUTPUTS,
        Literal::count(operator.outputs().len()),
    );
    for (connector_id, connector) in operator.outputs() {
        let class = connector_class(id, "output", connector_id, connector)?;
        graph.add(task.clone(), vocab::SPECIFIES_OUTPUT_CLASS, class);
    }

    graph.add(task, vocab::HAS_COMPONENT, Iri::from(component));
    Ok(())
}

fn connector_class(
    operator: &OperatorId,
    direction: &str,
    connector_id: &str,
    connector: &Connector,
) -> ExportResult<Iri> {
    connector.definition_uri().map(Iri::from).ok_or_else(|| {
        ExportError::missing_connector_definition(operator.as_str(), direction, connector_id)
    })
}

/// Exports a workflow using the default namespace.
pub fn export(workflow: &Workflow, workflow_id: &str) -> ExportResult<Graph> {
    RdfExporter::default().export(workflow, workflow_id)
}
