//! Per-node status (§3 "Lifecycle").

use serde::{Deserialize, Serialize};

/// A node's status within one workflow run.
///
/// Moves monotonically `Idle -> Running -> (Success | Error | Skipped)`;
/// `Skipped` may also follow directly from `Idle` (a node marked skipped
/// before its wave begins never runs at all). `Idle` and `Running` never
/// appear in a completed run's returned status map (§8 invariant 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeStatus {
    Idle,
    Running,
    Success,
    Error,
    Skipped,
}

impl NodeStatus {
    /// Whether this status is one of the three terminal states.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error | Self::Skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_error_skipped_are_terminal() {
        assert!(NodeStatus::Success.is_terminal());
        assert!(NodeStatus::Error.is_terminal());
        assert!(NodeStatus::Skipped.is_terminal());
    }

    #[test]
    fn idle_and_running_are_not_terminal() {
        assert!(!NodeStatus::Idle.is_terminal());
        assert!(!NodeStatus::Running.is_terminal());
    }

    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&NodeStatus::Skipped).unwrap();
        let back: NodeStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NodeStatus::Skipped);
    }
}
