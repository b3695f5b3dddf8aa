//! Error kind taxonomy for the workflow execution engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The specific kind of failure behind a [`NebulaError`](crate::NebulaError).
///
/// This taxonomy is intentionally flat and opaque to downstream callers:
/// executor authors distinguish transient from permanent failures via
/// retry counts and the `retryable` flag, not by matching on variants.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Registry lookup for an unregistered node type.
    #[error("unknown node type '{type_id}'")]
    UnknownType {
        /// The type identifier that was looked up.
        type_id: String,
    },

    /// Registry `register` called twice for the same type identifier.
    #[error("node type '{type_id}' is already registered")]
    DuplicateType {
        /// The type identifier that collided.
        type_id: String,
    },

    /// Schema validation of a node's input or output failed.
    #[error("validation failed: {reason}")]
    ValidationError {
        /// Human-readable description of the validation failure.
        reason: String,
    },

    /// The planner detected a cycle in the workflow's edge set.
    #[error("workflow graph contains a cycle")]
    CycleDetected,

    /// A single-node execution attempt exceeded its configured timeout.
    #[error("execution timed out after {0:?}")]
    Timeout(Duration),

    /// Execution was cancelled via the cooperative cancellation signal.
    #[error("execution aborted")]
    Aborted,

    /// The node executor returned `success = false`.
    #[error("executor reported failure: {message}")]
    ExecutorFailure {
        /// The error message returned by the executor.
        message: String,
    },

    /// The node executor panicked or returned an unexpected error.
    #[error("executor raised an exception: {message}")]
    ExecutorException {
        /// The message carried by the unexpected error.
        message: String,
    },

    /// The execution was cancelled before or during a wait point.
    #[error("execution was cancelled")]
    Cancelled,

    /// An execution plan failed structural validation (e.g. empty workflow).
    #[error("invalid execution plan: {reason}")]
    PlanValidation {
        /// Human-readable description of the validation failure.
        reason: String,
    },

    /// A JSON (de)serialization step failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ErrorKind {
    /// Whether this kind of failure is, in general, worth retrying.
    ///
    /// Validation and registry errors are permanent; timeouts and generic
    /// executor failures are presumed transient unless an executor's own
    /// `retryOn` predicate says otherwise.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::ExecutorFailure { .. } | Self::ExecutorException { .. }
        )
    }

    /// A short, stable, machine-readable code for this kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownType { .. } => "UNKNOWN_TYPE",
            Self::DuplicateType { .. } => "DUPLICATE_TYPE",
            Self::ValidationError { .. } => "VALIDATION_ERROR",
            Self::CycleDetected => "CYCLE_DETECTED",
            Self::Timeout(_) => "TIMEOUT",
            Self::Aborted => "ABORTED",
            Self::ExecutorFailure { .. } => "EXECUTOR_FAILURE",
            Self::ExecutorException { .. } => "EXECUTOR_EXCEPTION",
            Self::Cancelled => "CANCELLED",
            Self::PlanValidation { .. } => "PLAN_VALIDATION",
            Self::Serialization(_) => "SERIALIZATION",
        }
    }
}
