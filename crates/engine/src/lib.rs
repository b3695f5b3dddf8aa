//! Workflow data model, DAG executor, and JSON wire format for the
//! workflow execution engine.
//!
//! Bundles the spec's C3 (workflow/node/edge model), C8 (wave-scheduled
//! workflow executor with conditional branching and skip propagation), and
//! the wire persistence format nodes and edges are authored in. Node-type
//! resolution, single-node validate/cache/retry/timeout execution, and
//! topological wave planning live one layer down in `nebula-action` and
//! `nebula-execution`; this crate is the thing callers reach for first.

pub mod config;
pub mod executor;
pub mod status;
pub mod wire;
pub mod workflow;

pub use config::{NodeConfigOverride, WorkflowExecutionConfig, WorkflowExecutionResult};
pub use executor::execute_workflow;
pub use status::NodeStatus;
pub use wire::{into_core, WireEdge, WireNode, WireWorkflow};
pub use workflow::{Edge, Workflow, WorkflowNode};

/// Common prelude.
pub mod prelude {
    pub use super::{
        execute_workflow, into_core, Edge, NodeConfigOverride, NodeStatus, WireEdge, WireNode,
        WireWorkflow, Workflow, WorkflowExecutionConfig, WorkflowExecutionResult, WorkflowNode,
    };
}
