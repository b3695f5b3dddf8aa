//! Node capability flags — advisory metadata, not enforced by the engine.

use serde::{Deserialize, Serialize};

/// Fixed set of boolean capability flags a node definition may declare.
///
/// These describe what a node's *author* claims it supports for the
/// benefit of callers (e.g. a UI deciding whether to offer a "re-run"
/// button); the engine itself never inspects or enforces them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCapabilities {
    /// Can enrich its output with additional derived fields.
    pub supports_enrichment: bool,
    /// Can process many inputs in a single invocation.
    pub supports_bulk_actions: bool,
    /// Can pause pending human approval (surfaced via `needsApproval`).
    pub supports_approval: bool,
    /// Can be safely re-invoked with the same input after a prior run.
    pub supports_rerun: bool,
    /// Observes the cooperative cancellation signal during execution.
    pub supports_cancel: bool,
}

impl NodeCapabilities {
    /// All flags unset.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_enrichment(mut self) -> Self {
        self.supports_enrichment = true;
        self
    }

    #[must_use]
    pub fn with_bulk_actions(mut self) -> Self {
        self.supports_bulk_actions = true;
        self
    }

    #[must_use]
    pub fn with_approval(mut self) -> Self {
        self.supports_approval = true;
        self
    }

    #[must_use]
    pub fn with_rerun(mut self) -> Self {
        self.supports_rerun = true;
        self
    }

    #[must_use]
    pub fn with_cancel(mut self) -> Self {
        self.supports_cancel = true;
        self
    }
}
