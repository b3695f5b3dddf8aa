//! The unified [`NebulaError`] type and its convenience constructors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::context::ErrorContext;
use crate::kinds::ErrorKind;

/// The error type returned by every fallible operation in the engine.
///
/// Wraps a classified [`ErrorKind`] with optional rich [`ErrorContext`] and a
/// precomputed `retryable` flag, so callers can make retry decisions without
/// matching on the kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NebulaError {
    /// The specific kind of error.
    pub kind: ErrorKind,
    /// Optional rich context (component, operation, metadata, timestamp).
    pub context: Option<ErrorContext>,
    /// Whether this error is, in general, worth retrying.
    pub retryable: bool,
}

impl std::fmt::Display for NebulaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(ctx) = &self.context {
            write!(f, " ({})", ctx.description)?;
        }
        Ok(())
    }
}

impl std::error::Error for NebulaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl NebulaError {
    /// Wrap an [`ErrorKind`], computing the default retryability.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        let retryable = kind.is_retryable();
        Self {
            kind,
            context: None,
            retryable,
        }
    }

    /// Attach context.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Override the retryability computed from the kind.
    #[must_use]
    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    /// Whether this error is worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// The stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        self.kind.code()
    }

    // ---- convenience constructors, one per taxonomy entry (§7) ----

    /// Registry lookup for an unregistered node type.
    #[must_use]
    pub fn unknown_type(type_id: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownType {
            type_id: type_id.into(),
        })
    }

    /// Registry `register` called twice for the same type identifier.
    #[must_use]
    pub fn duplicate_type(type_id: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateType {
            type_id: type_id.into(),
        })
    }

    /// Schema validation failure.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError {
            reason: reason.into(),
        })
    }

    /// Cycle detected by the topological planner.
    #[must_use]
    pub fn cycle_detected() -> Self {
        Self::new(ErrorKind::CycleDetected)
    }

    /// Single-node execution timeout.
    #[must_use]
    pub fn timeout(after: Duration) -> Self {
        Self::new(ErrorKind::Timeout(after))
    }

    /// Execution aborted via cancellation signal.
    #[must_use]
    pub fn aborted() -> Self {
        Self::new(ErrorKind::Aborted)
    }

    /// Executor returned `success = false`.
    #[must_use]
    pub fn executor_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExecutorFailure {
            message: message.into(),
        })
    }

    /// Executor panicked / raised an unexpected error.
    #[must_use]
    pub fn executor_exception(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExecutorException {
            message: message.into(),
        })
    }

    /// Execution was cancelled.
    #[must_use]
    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled)
    }

    /// Execution plan failed structural validation.
    #[must_use]
    pub fn plan_validation(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::PlanValidation {
            reason: reason.into(),
        })
    }
}

impl From<serde_json::Error> for NebulaError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::Serialization(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_computes_retryable_from_kind() {
        assert!(NebulaError::timeout(Duration::from_millis(10)).is_retryable());
        assert!(!NebulaError::validation("bad input").is_retryable());
    }

    #[test]
    fn with_retryable_overrides_default() {
        let err = NebulaError::executor_failure("boom").with_retryable(false);
        assert!(!err.is_retryable());
    }

    #[test]
    fn display_includes_context_description() {
        let err = NebulaError::unknown_type("http.request")
            .with_context(ErrorContext::new("looked up during plan resolution"));
        let rendered = err.to_string();
        assert!(rendered.contains("unknown node type"));
        assert!(rendered.contains("looked up during plan resolution"));
    }

    #[test]
    fn error_code_matches_kind() {
        assert_eq!(NebulaError::cycle_detected().error_code(), "CYCLE_DETECTED");
    }

    #[test]
    fn serde_roundtrip() {
        let err = NebulaError::executor_exception("panic: index out of bounds");
        let json = serde_json::to_string(&err).unwrap();
        let back: NebulaError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.error_code(), err.error_code());
    }
}
