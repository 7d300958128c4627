//! Execution states and workflow-level status aggregation.
//!
//! The execution engine reports one state per task. [`StatusAggregator`]
//! folds those into a single [`ExecutionState`] for the workflow, using a
//! fixed precedence:
//!
//! 1. revoked by the engine: `REVOKED`
//! 2. every task `DONE`: `DONE`
//! 3. any task `FAILED`: `FAILED`
//! 4. every task `PENDING`: `PENDING`
//! 5. every task `PENDING` or `RUNNING`: `RUNNING`
//! 6. any task `PENDING` (none failed): `PENDING`
//! 7. any task `RUNNING` (none failed): `RUNNING`
//! 8. otherwise: `UNKNOWN`
//!
//! The fold is pure. Missing or unrecognized task states are skipped.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::TRACING_TARGET;

/// State of a task or of a whole workflow execution.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ExecutionState {
    /// No state could be derived.
    #[default]
    Unknown,
    /// Execution was revoked.
    Revoked,
    /// Waiting to be scheduled.
    Pending,
    /// Currently executing.
    Running,
    /// Finished with an error.
    Failed,
    /// Finished successfully.
    Done,
}

impl ExecutionState {
    /// Parses a reported state, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for strings that name no known state.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        raw.trim().to_ascii_uppercase().parse().ok()
    }

    /// Returns whether no further state changes are expected.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::Revoked)
    }

    /// Returns whether the execution is queued or running.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Running)
    }
}

/// Folds per-task states into one workflow state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusAggregator {
    empty: Option<ExecutionState>,
}

impl StatusAggregator {
    /// Creates an aggregator that maps an empty task list to `UNKNOWN`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the state reported for a workflow with no usable task states.
    pub fn with_empty_state(mut self, state: ExecutionState) -> Self {
        self.empty = Some(state);
        self
    }

    /// Aggregates raw task states as reported by the engine.
    ///
    /// Entries that are `None` or do not parse as a state are skipped.
    pub fn aggregate<I, S>(&self, states: I, revoked: bool) -> ExecutionState
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let parsed: Vec<_> = states
            .into_iter()
            .filter_map(|raw| {
                let raw = raw?;
                let state = ExecutionState::parse_lenient(raw.as_ref());
                if state.is_none() {
                    tracing::debug!(
                        target: TRACING_TARGET,
                        status = raw.as_ref(),
                        "skipping unrecognized task status"
                    );
                }
                state
            })
            .collect();

        self.fold(&parsed, revoked)
    }

    /// Aggregates already-parsed task states.
    pub fn fold(&self, states: &[ExecutionState], revoked: bool) -> ExecutionState {
        use ExecutionState::*;

        if revoked {
            return Revoked;
        }
        if states.is_empty() {
            return self.empty.unwrap_or(Unknown);
        }

        let all = |s| states.iter().all(|&t| t == s);
        let any = |s| states.contains(&s);

        if all(Done) {
            Done
        } else if any(Failed) {
            Failed
        } else if all(Pending) {
            Pending
        } else if states.iter().all(|s| s.is_active()) {
            Running
        } else if any(Pending) {
            Pending
        } else if any(Running) {
            Running
        } else {
            Unknown
        }
    }
}

/// Aggregates raw task states with the default empty-list behavior.
pub fn aggregate<I, S>(states: I, revoked: bool) -> ExecutionState
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    StatusAggregator::new().aggregate(states, revoked)
}
