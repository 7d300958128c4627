//! Reachability reports for the execution engine and the triple store.

use std::fmt;
use std::time::Duration;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Whether a collaborator answered its health request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Reachable,
    Unreachable,
}

/// Outcome of one health request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: ServiceStatus,
    /// Round-trip time in milliseconds, when it was measured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    /// Why the collaborator is unreachable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub checked_at: Timestamp,
}

impl ServiceHealth {
    /// Reports a collaborator that answered.
    pub fn healthy() -> Self {
        Self {
            status: ServiceStatus::Reachable,
            latency_ms: None,
            error: None,
            checked_at: Timestamp::now(),
        }
    }

    /// Reports a collaborator that could not be reached.
    pub fn unhealthy(error: impl fmt::Display) -> Self {
        Self {
            status: ServiceStatus::Unreachable,
            error: Some(error.to_string()),
            ..Self::healthy()
        }
    }

    /// Builds a report from the result of a health request and its duration.
    ///
    /// The response body is ignored: any answer counts as reachable.
    pub fn from_check<T, E>(outcome: Result<T, E>, elapsed: Duration) -> Self
    where
        E: fmt::Display,
    {
        let health = match outcome {
            Ok(_) => Self::healthy(),
            Err(error) => Self::unhealthy(error),
        };

        Self {
            latency_ms: Some(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)),
            ..health
        }
    }

    /// Returns whether the collaborator answered.
    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Reachable
    }
}
