//! Subcommands of the `weft` binary.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use serde_json::json;
use weft_engine::reqwest::ReqwestEngine;
use weft_engine::{RunRequest, StatusReport};
use weft_semantic::reqwest::SparqlClient;
use weft_semantic::{ExportConfig, Graph, RdfExporter};
use weft_workflow::compiler::compile;
use weft_workflow::definition::Workflow;
use weft_workflow::status::{ExecutionState, StatusAggregator};

use crate::TRACING_TARGET_COMMAND;
use crate::config::Cli;

/// Available subcommands.
#[derive(Debug, Clone, Subcommand, Serialize, Deserialize)]
pub enum Command {
    /// Compiles a workflow document into the engine task list
    Compile {
        /// Workflow document (JSON)
        file: PathBuf,
        /// Print the full run request, metadata included
        #[arg(long)]
        request: bool,
    },

    /// Exports a workflow document as N-Triples
    Export {
        /// Workflow document (JSON)
        file: PathBuf,
        /// Identifier used to name the workflow node
        #[arg(long = "workflow-id")]
        workflow_id: String,
    },

    /// Folds an engine status report into one workflow state
    Aggregate {
        /// Status report (JSON) as returned by the engine
        file: PathBuf,
        /// State reported when no task state is recognized
        #[arg(long = "empty-state")]
        empty_state: Option<String>,
    },

    /// Exports a workflow document and inserts it into the SPARQL endpoint
    Publish {
        /// Workflow document (JSON)
        file: PathBuf,
        /// Identifier used to name the workflow node
        #[arg(long = "workflow-id")]
        workflow_id: String,
    },

    /// Checks that the execution engine and the SPARQL endpoint answer
    Health,
}

impl Command {
    /// Returns the subcommand name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Compile { .. } => "compile",
            Self::Export { .. } => "export",
            Self::Aggregate { .. } => "aggregate",
            Self::Publish { .. } => "publish",
            Self::Health => "health",
        }
    }

    /// Runs the command and returns what it prints on stdout.
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<String> {
        match self {
            Self::Compile { file, request } => compile_document(&read(file)?, *request),
            Self::Export { file, workflow_id } => {
                let graph = export_document(&read(file)?, &cli.export, workflow_id)?;
                Ok(graph.to_ntriples())
            }
            Self::Aggregate { file, empty_state } => {
                aggregate_report(&read(file)?, empty_state.as_deref())
            }
            Self::Publish { file, workflow_id } => {
                let graph = export_document(&read(file)?, &cli.export, workflow_id)?;
                publish(cli, &graph).await
            }
            Self::Health => health(cli).await,
        }
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    tracing::debug!(
        target: TRACING_TARGET_COMMAND,
        path = %path.display(),
        "Reading input document"
    );

    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn parse_workflow(document: &str) -> anyhow::Result<Workflow> {
    Workflow::from_json(document).context("invalid workflow document")
}

/// Compiles a workflow document into pretty-printed JSON.
pub fn compile_document(document: &str, full_request: bool) -> anyhow::Result<String> {
    let workflow = parse_workflow(document)?;

    let output = if full_request {
        serde_json::to_string_pretty(&RunRequest::from_workflow(&workflow))?
    } else {
        serde_json::to_string_pretty(&compile(&workflow))?
    };
    Ok(output)
}

/// Exports a workflow document into an RDF graph.
pub fn export_document(
    document: &str,
    config: &ExportConfig,
    workflow_id: &str,
) -> anyhow::Result<Graph> {
    let workflow = parse_workflow(document)?;
    let graph = RdfExporter::new(config.clone())
        .export(&workflow, workflow_id)
        .context("workflow cannot be described in RDF")?;

    tracing::debug!(
        target: TRACING_TARGET_COMMAND,
        workflow_id,
        triples = graph.len(),
        "Workflow exported"
    );
    Ok(graph)
}

/// Aggregates a status report document into a state name.
pub fn aggregate_report(document: &str, empty_state: Option<&str>) -> anyhow::Result<String> {
    let report: StatusReport =
        serde_json::from_str(document).context("invalid status report document")?;

    let mut aggregator = StatusAggregator::new();
    if let Some(raw) = empty_state {
        let state = ExecutionState::parse_lenient(raw)
            .with_context(|| format!("unknown execution state '{raw}'"))?;
        aggregator = aggregator.with_empty_state(state);
    }

    Ok(report.aggregate_with(&aggregator).to_string())
}

async fn publish(cli: &Cli, graph: &Graph) -> anyhow::Result<String> {
    let store = SparqlClient::new(cli.sparql.clone())
        .context("failed to create SPARQL client")?
        .into_service();

    store
        .insert(graph)
        .await
        .context("failed to insert triples")?;

    Ok(format!(
        "inserted {} triples into <{}>",
        graph.len(),
        store.graph_name()
    ))
}

async fn health(cli: &Cli) -> anyhow::Result<String> {
    let engine = ReqwestEngine::new(cli.engine.clone())
        .context("failed to create engine client")?
        .into_service();
    let store = SparqlClient::new(cli.sparql.clone())
        .context("failed to create SPARQL client")?
        .into_service();

    let engine = engine.health_check().await?;
    let sparql = store.health_check().await?;

    let report = json!({ "engine": engine, "sparql": sparql });
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    const WORKFLOW: &str = r#"{
        "operators": {
            "op_0": {
                "properties": {
                    "name": "Reader",
                    "module": "io.read",
                    "outputs": {
                        "out_0": {"properties": {"name": "rows"}, "definition": {"uri": "urn:data:Rows"}}
                    }
                },
                "parameters": {
                    "param_0": {"properties": {"name": "limit", "value": "5"}}
                },
                "definition": {"uri": "urn:component:Reader"}
            },
            "op_1": {
                "properties": {
                    "name": "Writer",
                    "module": "io.write",
                    "inputs": {
                        "in_0": {"properties": {"name": "rows"}, "definition": {"uri": "urn:data:Rows"}}
                    }
                },
                "definition": {"uri": "urn:component:Writer"}
            }
        },
        "links": {
            "0": {"fromOperator": "op_0", "fromConnector": "out_0", "toOperator": "op_1", "toConnector": "in_0"}
        },
        "metadata": {"label": "demo"}
    }"#;

    #[test]
    fn test_compile_document() {
        let output: Value = serde_json::from_str(&compile_document(WORKFLOW, false).unwrap()).unwrap();
        let tasks = output.as_array().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0]["params"]["limit"], 5);
        assert_eq!(tasks[1]["inputs"]["rows"], "Reader.rows");

        let request: Value = serde_json::from_str(&compile_document(WORKFLOW, true).unwrap()).unwrap();
        assert_eq!(request["metadata"]["label"], "demo");
        assert_eq!(request["tasks"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_compile_rejects_invalid_document() {
        let err = compile_document(r#"{"operators": []}"#, false).unwrap_err();
        assert!(err.to_string().contains("invalid workflow document"));
    }

    #[test]
    fn test_export_document() {
        let config = ExportConfig::default().with_namespace("urn:ns#");
        let graph = export_document(WORKFLOW, &config, "7").unwrap();

        let ntriples = graph.to_ntriples();
        assert!(ntriples.contains("<urn:ns#Workflow7>"));
        assert!(ntriples.contains("\"Reader\""));
    }

    #[test]
    fn test_export_requires_definitions() {
        let document = WORKFLOW.replace(r#""definition": {"uri": "urn:component:Writer"}"#, r#""extra": 1"#);
        assert!(export_document(&document, &ExportConfig::default(), "7").is_err());
    }

    #[test]
    fn test_aggregate_report() {
        let report = r#"{"tasks": [{"status": "done"}, {"status": "PENDING"}]}"#;
        assert_eq!(aggregate_report(report, None).unwrap(), "PENDING");

        let revoked = r#"{"tasks": [{"status": "DONE"}], "is_revoked": true}"#;
        assert_eq!(aggregate_report(revoked, None).unwrap(), "REVOKED");

        let empty = r#"{"tasks": [{"status": "bogus"}]}"#;
        assert_eq!(aggregate_report(empty, None).unwrap(), "UNKNOWN");
        assert_eq!(aggregate_report(empty, Some("pending")).unwrap(), "PENDING");
        assert!(aggregate_report(empty, Some("sleeping")).is_err());
    }
}
