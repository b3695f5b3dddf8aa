//! Workflow data model (§3): a DAG of node instances, directed edges, and
//! a documentary entry point.

use std::sync::Arc;

use nebula_action::NodeDefinition;
use serde_json::Value;

/// One instance of a node within a workflow: its author-supplied id, the
/// registered type it resolves to, the shared definition, and a raw input
/// that may still contain `{{ }}` templates.
///
/// IDs are unique per workflow; the engine never checks this itself (the
/// caller assembling a `Workflow` owns that invariant), since uniqueness is
/// a property of the authoring tool, not the execution substrate.
#[derive(Clone)]
pub struct WorkflowNode {
    pub id: String,
    pub node_type: String,
    pub node: Arc<NodeDefinition>,
    pub input: Value,
}

impl WorkflowNode {
    #[must_use]
    pub fn new(id: impl Into<String>, node: Arc<NodeDefinition>, input: Value) -> Self {
        let node_type = node.node_type.clone();
        Self {
            id: id.into(),
            node_type,
            node,
            input,
        }
    }
}

/// A directed edge between two node IDs. An edge with `condition` set only
/// participates in conditional branch-skip selection (§4.8.1) when the
/// source node's result names a different `next_node_id`; edges with no
/// condition are always followed ("else/default" branch).
#[derive(Debug, Clone)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub condition: Option<String>,
}

impl Edge {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            condition: None,
        }
    }

    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

/// A DAG of [`WorkflowNode`]s connected by [`Edge`]s.
///
/// `entry_node_id` is documentary only (§3): execution order is derived
/// entirely from `edges` via the topological planner, not from this field.
#[derive(Clone, Default)]
pub struct Workflow {
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<Edge>,
    pub entry_node_id: Option<String>,
}

impl Workflow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_nodes(mut self, nodes: Vec<WorkflowNode>) -> Self {
        self.nodes = nodes;
        self
    }

    #[must_use]
    pub fn with_edges(mut self, edges: Vec<Edge>) -> Self {
        self.edges = edges;
        self
    }

    #[must_use]
    pub fn with_entry_node_id(mut self, entry_node_id: impl Into<String>) -> Self {
        self.entry_node_id = Some(entry_node_id.into());
        self
    }

    /// Node IDs in declaration order, the id shape the planner operates on.
    #[must_use]
    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    /// `(from, to)` pairs, the edge shape the planner operates on.
    #[must_use]
    pub fn edge_pairs(&self) -> Vec<(String, String)> {
        self.edges.iter().map(|e| (e.from.clone(), e.to.clone())).collect()
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nebula_action::{NodeCategory, NodeContext, NodeDefinitionBuilder, NodeExecutionResult, NodeExecutor};
    use nebula_error::NebulaError;
    use nebula_validator::AnySchema;

    struct NoOp;
    #[async_trait]
    impl NodeExecutor for NoOp {
        async fn execute(
            &self,
            _input: Value,
            _ctx: &NodeContext,
        ) -> Result<NodeExecutionResult, NebulaError> {
            Ok(NodeExecutionResult::success())
        }
    }

    fn definition() -> Arc<NodeDefinition> {
        Arc::new(
            NodeDefinitionBuilder::new()
                .node_type("noop")
                .name("noop")
                .category(NodeCategory::Action)
                .input_schema(AnySchema)
                .output_schema(AnySchema)
                .executor(NoOp)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn node_ids_follow_declaration_order() {
        let wf = Workflow::new().with_nodes(vec![
            WorkflowNode::new("b", definition(), Value::Null),
            WorkflowNode::new("a", definition(), Value::Null),
        ]);
        assert_eq!(wf.node_ids(), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn edge_without_condition_has_none() {
        let edge = Edge::new("a", "b");
        assert!(edge.condition.is_none());
    }

    #[test]
    fn edge_with_condition_carries_it() {
        let edge = Edge::new("check", "yes-end").with_condition("yes-end");
        assert_eq!(edge.condition.as_deref(), Some("yes-end"));
    }

    #[test]
    fn node_lookup_by_id() {
        let wf = Workflow::new().with_nodes(vec![WorkflowNode::new("a", definition(), Value::Null)]);
        assert!(wf.node("a").is_some());
        assert!(wf.node("missing").is_none());
    }
}
