//! Node execution result: the tagged record an executor produces.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a single node's execution.
///
/// On success, `output` carries a value conforming to the node's output
/// schema. On failure, `error` carries a human-readable message. `next_node_id`
/// drives conditional branching (§4.8.1): when set alongside `success = true`,
/// edges with a `condition` not matching it are skipped. `needs_approval` and
/// `notification` are opaque envelopes the engine forwards to callers/observers
/// without interpreting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeExecutionResult {
    pub success: bool,
    pub output: Option<Value>,
    pub error: Option<String>,
    pub next_node_id: Option<String>,
    pub needs_approval: Option<Value>,
    pub notification: Option<Value>,
}

impl NodeExecutionResult {
    /// A successful result with no output.
    #[must_use]
    pub fn success() -> Self {
        Self {
            success: true,
            output: None,
            error: None,
            next_node_id: None,
            needs_approval: None,
            notification: None,
        }
    }

    /// A successful result carrying `output`.
    #[must_use]
    pub fn success_with(output: Value) -> Self {
        Self {
            output: Some(output),
            ..Self::success()
        }
    }

    /// A failed result carrying a human-readable `error`.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(error.into()),
            next_node_id: None,
            needs_approval: None,
            notification: None,
        }
    }

    /// Attach a chosen branch for conditional edges (§4.8.1). Only
    /// meaningful on a successful result.
    #[must_use]
    pub fn with_next_node(mut self, next_node_id: impl Into<String>) -> Self {
        self.next_node_id = Some(next_node_id.into());
        self
    }

    /// Attach opaque approval metadata, surfaced upward but not acted on by
    /// the engine.
    #[must_use]
    pub fn with_needs_approval(mut self, payload: Value) -> Self {
        self.needs_approval = Some(payload);
        self
    }

    /// Attach an opaque notification envelope forwarded to observers.
    #[must_use]
    pub fn with_notification(mut self, payload: Value) -> Self {
        self.notification = Some(payload);
        self
    }
}
