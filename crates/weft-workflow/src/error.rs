//! Workflow error types.

use thiserror::Error;

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Errors that can occur while reading a workflow document.
///
/// Only document-shape problems surface here. Unresolved links, untyped
/// parameter values and malformed task states are absorbed by the compiler
/// and the aggregator.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The inbound document is missing a required field or has the wrong shape.
    #[error("invalid workflow document: {0}")]
    Validation(String),

    /// Serialization of a workflow back to JSON failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WorkflowError {
    /// Creates a validation error from any displayable message.
    pub fn validation(message: impl std::fmt::Display) -> Self {
        Self::Validation(message.to_string())
    }

    /// Returns whether this error was caused by a malformed document.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
