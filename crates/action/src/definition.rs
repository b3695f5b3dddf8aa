//! Node definition: the immutable record bundling metadata, schemas, and an executor (C2).

use std::sync::Arc;
use std::time::Duration;

use nebula_error::NebulaError;
use nebula_validator::Schema;

use crate::capability::NodeCapabilities;
use crate::category::NodeCategory;
use crate::executor::NodeExecutor;
use crate::metadata::NodeMetadata;

/// Immutable record bundling a node's identity, schemas, and executor.
///
/// Created once at module initialization and registered at most once per
/// registry (see [`Registry::register`](crate::registry::Registry::register)).
/// Definitions are shared by reference: many workflow runs may reference the
/// same definition concurrently, so [`NodeExecutor`] implementations must be
/// reentrant.
#[derive(Clone)]
pub struct NodeDefinition {
    pub node_type: String,
    pub name: String,
    pub description: String,
    pub category: NodeCategory,
    pub estimated_duration: Option<Duration>,
    pub capabilities: NodeCapabilities,
    pub input_schema: Arc<dyn Schema>,
    pub output_schema: Arc<dyn Schema>,
    pub executor: Arc<dyn NodeExecutor>,
}

impl NodeDefinition {
    /// Strip the executor, returning only the catalog-facing metadata.
    #[must_use]
    pub fn metadata(&self) -> NodeMetadata {
        NodeMetadata {
            node_type: self.node_type.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category,
            estimated_duration: self.estimated_duration,
            capabilities: self.capabilities,
            input_schema: self.input_schema.clone(),
            output_schema: self.output_schema.clone(),
        }
    }
}

impl std::fmt::Debug for NodeDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeDefinition")
            .field("node_type", &self.node_type)
            .field("name", &self.name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Builder for [`NodeDefinition`].
///
/// Performs no validation beyond ensuring every required field is present —
/// structural validity of the schemas themselves is the caller's
/// responsibility (§4.2).
pub struct NodeDefinitionBuilder {
    node_type: Option<String>,
    name: Option<String>,
    description: String,
    category: Option<NodeCategory>,
    estimated_duration: Option<Duration>,
    capabilities: NodeCapabilities,
    input_schema: Option<Arc<dyn Schema>>,
    output_schema: Option<Arc<dyn Schema>>,
    executor: Option<Arc<dyn NodeExecutor>>,
}

impl Default for NodeDefinitionBuilder {
    fn default() -> Self {
        Self {
            node_type: None,
            name: None,
            description: String::new(),
            category: None,
            estimated_duration: None,
            capabilities: NodeCapabilities::none(),
            input_schema: None,
            output_schema: None,
            executor: None,
        }
    }
}

impl NodeDefinitionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn node_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = Some(node_type.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn category(mut self, category: NodeCategory) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn estimated_duration(mut self, duration: Duration) -> Self {
        self.estimated_duration = Some(duration);
        self
    }

    #[must_use]
    pub fn capabilities(mut self, capabilities: NodeCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    #[must_use]
    pub fn input_schema(mut self, schema: impl Schema + 'static) -> Self {
        self.input_schema = Some(Arc::new(schema));
        self
    }

    #[must_use]
    pub fn output_schema(mut self, schema: impl Schema + 'static) -> Self {
        self.output_schema = Some(Arc::new(schema));
        self
    }

    #[must_use]
    pub fn executor(mut self, executor: impl NodeExecutor + 'static) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    /// Finalize the definition.
    ///
    /// # Errors
    /// Returns [`NebulaError::plan_validation`] if any required field
    /// (`node_type`, `name`, `category`, `input_schema`, `output_schema`,
    /// `executor`) was never supplied.
    pub fn build(self) -> Result<NodeDefinition, NebulaError> {
        let node_type = self
            .node_type
            .ok_or_else(|| NebulaError::plan_validation("node definition missing `node_type`"))?;
        let name = self
            .name
            .ok_or_else(|| NebulaError::plan_validation("node definition missing `name`"))?;
        let category = self
            .category
            .ok_or_else(|| NebulaError::plan_validation("node definition missing `category`"))?;
        let input_schema = self
            .input_schema
            .ok_or_else(|| NebulaError::plan_validation("node definition missing `input_schema`"))?;
        let output_schema = self.output_schema.ok_or_else(|| {
            NebulaError::plan_validation("node definition missing `output_schema`")
        })?;
        let executor = self
            .executor
            .ok_or_else(|| NebulaError::plan_validation("node definition missing `executor`"))?;

        Ok(NodeDefinition {
            node_type,
            name,
            description: self.description,
            category,
            estimated_duration: self.estimated_duration,
            capabilities: self.capabilities,
            input_schema,
            output_schema,
            executor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NodeContext;
    use crate::result::NodeExecutionResult;
    use async_trait::async_trait;
    use nebula_validator::AnySchema;
    use serde_json::Value;

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

    fn builder() -> NodeDefinitionBuilder {
        NodeDefinitionBuilder::new()
            .node_type("http.request")
            .name("HTTP Request")
            .category(NodeCategory::Integration)
            .input_schema(AnySchema)
            .output_schema(AnySchema)
            .executor(NoOp)
    }

    #[test]
    fn build_succeeds_with_all_required_fields() {
        let def = builder().build().unwrap();
        assert_eq!(def.node_type, "http.request");
        assert_eq!(def.category, NodeCategory::Integration);
    }

    #[test]
    fn build_fails_without_node_type() {
        let err = NodeDefinitionBuilder::new()
            .name("x")
            .category(NodeCategory::Action)
            .input_schema(AnySchema)
            .output_schema(AnySchema)
            .executor(NoOp)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("node_type"));
    }

    #[test]
    fn metadata_strips_executor() {
        let def = builder().build().unwrap();
        let meta = def.metadata();
        assert_eq!(meta.node_type, def.node_type);
        assert_eq!(meta.name, def.name);
    }
}
