//! Node metadata — a [`NodeDefinition`](crate::definition::NodeDefinition) stripped of its executor.

use std::sync::Arc;
use std::time::Duration;

use nebula_validator::Schema;

use crate::capability::NodeCapabilities;
use crate::category::NodeCategory;

/// Everything about a node definition except its executor — what the
/// registry returns from `getMetadata`, and what a catalog UI would render.
#[derive(Clone)]
pub struct NodeMetadata {
    pub node_type: String,
    pub name: String,
    pub description: String,
    pub category: NodeCategory,
    pub estimated_duration: Option<Duration>,
    pub capabilities: NodeCapabilities,
    pub input_schema: Arc<dyn Schema>,
    pub output_schema: Arc<dyn Schema>,
}

impl std::fmt::Debug for NodeMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeMetadata")
            .field("node_type", &self.node_type)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}
