//! Node category — purely informational classification.

use serde::{Deserialize, Serialize};

/// Broad classification of a node's purpose. The engine does not branch on
/// this — it exists for catalog browsing and documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    /// Performs a side-effecting action (an HTTP call, a file write, …).
    Action,
    /// Evaluates a condition or controls flow (if/else, switch, loop).
    Logic,
    /// Talks to a specific third-party system.
    Integration,
    /// Reshapes data without external side effects.
    Transform,
}

impl std::fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Action => "action",
            Self::Logic => "logic",
            Self::Integration => "integration",
            Self::Transform => "transform",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_snake_case_serde() {
        assert_eq!(NodeCategory::Integration.to_string(), "integration");
    }

    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&NodeCategory::Logic).unwrap();
        assert_eq!(json, "\"logic\"");
        let back: NodeCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NodeCategory::Logic);
    }
}
