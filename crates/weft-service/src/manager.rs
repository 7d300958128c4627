//! Workflow manager: the operations exposed to callers.

use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;
use uuid::Uuid;
use weft_core::{Error, Result};
use weft_engine::{EngineService, RunRequest, RunResponse};
use weft_semantic::{RdfExporter, TripleStoreService};
use weft_workflow::definition::Workflow;
use weft_workflow::status::ExecutionState;

use crate::TRACING_TARGET;
use crate::pagination::{PageRequest, WorkflowPage};
use crate::record::{WorkflowRecord, WorkflowWithStatus};
use crate::store::{WorkflowFilter, WorkflowStore};

/// Result of persisting a workflow.
///
/// Persistence and RDF publication fail independently: a record that was
/// stored is returned even when publishing its triples failed.
#[derive(Debug)]
pub struct UpsertOutcome {
    /// The record as stored.
    pub record: WorkflowRecord,
    /// Why the RDF export or triple-store insert failed, if it did.
    pub export_error: Option<Error>,
}

impl UpsertOutcome {
    /// Returns whether the RDF description was published.
    pub fn is_published(&self) -> bool {
        self.export_error.is_none()
    }
}

/// Coordinates persistence, RDF publication and execution of workflows.
///
/// All collaborators are injected handles; clones share them.
#[derive(Clone)]
pub struct WorkflowManager {
    store: Arc<dyn WorkflowStore>,
    engine: EngineService,
    triples: TripleStoreService,
    exporter: RdfExporter,
}

impl fmt::Debug for WorkflowManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowManager")
            .field("engine", &self.engine)
            .field("triples", &self.triples)
            .field("exporter", &self.exporter)
            .finish_non_exhaustive()
    }
}

impl WorkflowManager {
    /// Creates a manager with the default RDF exporter.
    pub fn new<S>(store: S, engine: EngineService, triples: TripleStoreService) -> Self
    where
        S: WorkflowStore + 'static,
    {
        Self::from_arc(Arc::new(store), engine, triples)
    }

    /// Creates a manager around an already shared store.
    pub fn from_arc(
        store: Arc<dyn WorkflowStore>,
        engine: EngineService,
        triples: TripleStoreService,
    ) -> Self {
        Self {
            store,
            engine,
            triples,
            exporter: RdfExporter::default(),
        }
    }

    /// Replaces the RDF exporter.
    #[must_use]
    pub fn with_exporter(mut self, exporter: RdfExporter) -> Self {
        self.exporter = exporter;
        self
    }

    /// Stores a new workflow.
    ///
    /// A random hexadecimal ID is generated when `id` is `None` or empty.
    pub async fn insert(
        &self,
        author: &str,
        mut workflow: Workflow,
        id: Option<String>,
    ) -> Result<UpsertOutcome> {
        let id = id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

        workflow.created_at = Some(Timestamp::now());
        self.upsert(author, &id, workflow).await
    }

    /// Inserts or wholly replaces a workflow, then publishes its RDF.
    ///
    /// Fails when persistence fails, including with `NotFound` when `id`
    /// belongs to another author. Publication failures are logged and
    /// reported in [`UpsertOutcome::export_error`].
    pub async fn upsert(
        &self,
        author: &str,
        id: &str,
        mut workflow: Workflow,
    ) -> Result<UpsertOutcome> {
        workflow.updated_at = Some(Timestamp::now());
        workflow.metadata.set_author(author);

        let record = self.store.upsert(WorkflowRecord::new(id, workflow)).await?;

        tracing::info!(
            target: TRACING_TARGET,
            workflow_id = %record.id,
            author,
            operators = record.workflow.operator_count(),
            "Workflow stored"
        );

        let export_error = self.publish(&record).await.err();
        if let Some(error) = &export_error {
            tracing::error!(
                target: TRACING_TARGET,
                workflow_id = %record.id,
                error = %error,
                "Could not publish workflow RDF"
            );
        }

        Ok(UpsertOutcome {
            record,
            export_error,
        })
    }

    async fn publish(&self, record: &WorkflowRecord) -> Result<()> {
        let graph = self.exporter.export(&record.workflow, &record.id)?;

        tracing::debug!(
            target: TRACING_TARGET,
            workflow_id = %record.id,
            triples = graph.len(),
            "Workflow exported as RDF"
        );

        self.triples.insert(&graph).await
    }

    /// Fetches one workflow owned by `author`.
    pub async fn find_one(&self, author: &str, id: &str) -> Result<Option<WorkflowRecord>> {
        self.store.get(author, id).await
    }

    async fn require(&self, author: &str, id: &str) -> Result<WorkflowRecord> {
        self.store.get(author, id).await?.ok_or_else(|| {
            Error::not_found().with_message(format!("workflow '{id}' not found"))
        })
    }

    /// Searches an author's workflows, newest first.
    pub async fn find(
        &self,
        author: &str,
        filter: &WorkflowFilter,
        page: PageRequest,
    ) -> Result<WorkflowPage<WorkflowRecord>> {
        let (records, total) = self.store.find(author, filter, Some(page)).await?;
        Ok(WorkflowPage::new(records, page, total))
    }

    /// Compiles and dispatches a workflow, recording the execution ID.
    pub async fn execute(&self, author: &str, id: &str) -> Result<RunResponse> {
        let record = self.require(author, id).await?;
        let request = RunRequest::from_workflow(&record.workflow);

        tracing::debug!(
            target: TRACING_TARGET,
            workflow_id = id,
            tasks = request.tasks.len(),
            "Workflow compiled"
        );

        let response = self.engine.run(&request).await?;
        self.store.set_executed(&record.id, &response.id).await?;
        Ok(response)
    }

    /// Revokes the latest execution of a workflow.
    pub async fn revoke(&self, author: &str, id: &str) -> Result<()> {
        let record = self.require(author, id).await?;
        let execution_id = record.executed.ok_or_else(|| {
            Error::not_found().with_message(format!("workflow '{id}' was never executed"))
        })?;

        self.engine.revoke(&execution_id).await
    }

    /// Fetches a workflow with the state of its latest execution.
    pub async fn status(&self, author: &str, id: &str) -> Result<WorkflowWithStatus> {
        let record = self.require(author, id).await?;
        Ok(self.attach_status(record).await)
    }

    /// Searches an author's workflows and attaches execution states.
    pub async fn find_with_status(
        &self,
        author: &str,
        filter: &WorkflowFilter,
        page: PageRequest,
    ) -> Result<WorkflowPage<WorkflowWithStatus>> {
        let (records, total) = self.store.find(author, filter, Some(page)).await?;

        let mut workflows = Vec::with_capacity(records.len());
        for record in records {
            workflows.push(self.attach_status(record).await);
        }
        Ok(WorkflowPage::new(workflows, page, total))
    }

    /// Returns the author's workflows whose latest execution is in `state`.
    ///
    /// States are fetched for every matching workflow before paginating, so
    /// the page counts reflect the state filter.
    pub async fn find_by_state(
        &self,
        author: &str,
        state: ExecutionState,
        filter: &WorkflowFilter,
        page: PageRequest,
    ) -> Result<WorkflowPage<WorkflowWithStatus>> {
        let (records, _) = self.store.find(author, filter, None).await?;

        let mut matching = Vec::new();
        for record in records {
            let workflow = self.attach_status(record).await;
            if workflow.status == state {
                matching.push(workflow);
            }
        }

        let total = matching.len();
        Ok(WorkflowPage::new(page.apply(matching), page, total))
    }

    async fn attach_status(&self, record: WorkflowRecord) -> WorkflowWithStatus {
        let Some(execution_id) = record.executed.as_deref() else {
            return WorkflowWithStatus::unknown(record);
        };

        let report = self.engine.status(execution_id).await;
        match report {
            Ok(report) => {
                let status = report.aggregate();
                WorkflowWithStatus {
                    record,
                    tasks: Some(report.tasks),
                    status,
                }
            }
            Err(_) => WorkflowWithStatus::unknown(record),
        }
    }
}
