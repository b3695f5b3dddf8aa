//! JSON persistence / tooling-interop representation of a workflow (§6),
//! and its conversion into the in-memory [`Workflow`] the executor consumes.

use nebula_action::Registry;
use nebula_error::NebulaError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::workflow::{Edge, Workflow, WorkflowNode};

/// `{x, y}` canvas position. Carried through for tooling; the executor
/// never reads it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WirePosition {
    pub x: f64,
    pub y: f64,
}

/// One node as authored/persisted. `config` is the node's raw (possibly
/// templated) input; it becomes [`WorkflowNode::input`] verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<WirePosition>,
    #[serde(default)]
    pub config: Map<String, Value>,
}

/// One edge as authored/persisted. `source_handle`/`target_handle` drive
/// field-level plumbing in the authoring tool; the core executor has no use
/// for them since its `input` is already a fully resolved map (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireEdge {
    pub id: String,
    pub source: String,
    #[serde(rename = "sourceHandle")]
    pub source_handle: String,
    pub target: String,
    #[serde(rename = "targetHandle")]
    pub target_handle: String,
}

/// The bit-exact wire/persistence shape of a workflow (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireWorkflow {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub nodes: Vec<WireNode>,
    pub edges: Vec<WireEdge>,
}

/// Resolve `wire` against `registry`, producing the in-memory [`Workflow`]
/// the executor runs: each node's `type` is looked up, `config` becomes
/// `input`, and edge handles are dropped (§6, "A conversion layer ... maps
/// between the two").
///
/// Returns [`NebulaError::unknown_type`] if any node names a type the
/// registry has no definition for.
pub fn into_core(wire: &WireWorkflow, registry: &Registry) -> Result<Workflow, NebulaError> {
    let mut nodes = Vec::with_capacity(wire.nodes.len());
    for wire_node in &wire.nodes {
        let definition = registry
            .get_definition(&wire_node.node_type)
            .ok_or_else(|| NebulaError::unknown_type(wire_node.node_type.clone()))?;
        let input = Value::Object(wire_node.config.clone());
        nodes.push(WorkflowNode::new(wire_node.id.clone(), definition, input));
    }

    let edges = wire
        .edges
        .iter()
        .map(|wire_edge| Edge::new(wire_edge.source.clone(), wire_edge.target.clone()))
        .collect();

    Ok(Workflow::new().with_nodes(nodes).with_edges(edges))
}
