//! Registry: an index from node type to definition (C3).

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

use nebula_error::NebulaError;

use crate::category::NodeCategory;
use crate::definition::NodeDefinition;
use crate::executor::NodeExecutor;
use crate::metadata::NodeMetadata;

/// Purely in-memory index from `type` to [`NodeDefinition`]. No persistence.
///
/// Read-only after startup in the steady state: lookups never block on
/// registration, and registration itself is safe to call concurrently.
#[derive(Default)]
pub struct Registry {
    definitions: DashMap<String, Arc<NodeDefinition>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `def`. Fails with [`NebulaError::duplicate_type`] if
    /// `def.node_type` is already present.
    pub fn register(&self, def: NodeDefinition) -> Result<&Self, NebulaError> {
        if self.definitions.contains_key(&def.node_type) {
            return Err(NebulaError::duplicate_type(def.node_type));
        }
        self.definitions.insert(def.node_type.clone(), Arc::new(def));
        Ok(self)
    }

    /// Register each definition in order. Atomicity is not promised: a
    /// duplicate after the first registration halts with
    /// [`NebulaError::duplicate_type`], leaving earlier registrations in place.
    pub fn register_all(
        &self,
        defs: impl IntoIterator<Item = NodeDefinition>,
    ) -> Result<&Self, NebulaError> {
        for def in defs {
            self.register(def)?;
        }
        Ok(self)
    }

    /// Remove a definition if present; return whether it existed.
    pub fn unregister(&self, node_type: &str) -> bool {
        self.definitions.remove(node_type).is_some()
    }

    #[must_use]
    pub fn has(&self, node_type: &str) -> bool {
        self.definitions.contains_key(node_type)
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Fetch a full definition by type.
    #[must_use]
    pub fn get_definition(&self, node_type: &str) -> Option<Arc<NodeDefinition>> {
        self.definitions.get(node_type).map(|entry| entry.value().clone())
    }

    /// Fetch metadata (definition minus executor) by type.
    #[must_use]
    pub fn get_metadata(&self, node_type: &str) -> Option<NodeMetadata> {
        self.get_definition(node_type).map(|def| def.metadata())
    }

    /// Fetch only the executor by type.
    #[must_use]
    pub fn get_executor(&self, node_type: &str) -> Option<Arc<dyn NodeExecutor>> {
        self.get_definition(node_type).map(|def| def.executor.clone())
    }

    #[must_use]
    pub fn get_all_definitions(&self) -> Vec<Arc<NodeDefinition>> {
        self.definitions.iter().map(|entry| entry.value().clone()).collect()
    }

    #[must_use]
    pub fn get_all_metadata(&self) -> Vec<NodeMetadata> {
        self.definitions.iter().map(|entry| entry.value().metadata()).collect()
    }

    #[must_use]
    pub fn get_by_category(&self, category: NodeCategory) -> Vec<Arc<NodeDefinition>> {
        self.definitions
            .iter()
            .filter(|entry| entry.value().category == category)
            .map(|entry| entry.value().clone())
            .collect()
    }

    #[must_use]
    pub fn get_metadata_by_category(&self, category: NodeCategory) -> Vec<NodeMetadata> {
        self.get_by_category(category)
            .into_iter()
            .map(|def| def.metadata())
            .collect()
    }

    /// Validate `input` against the registered type's input schema.
    ///
    /// # Errors
    /// [`NebulaError::unknown_type`] if `node_type` is not registered,
    /// [`NebulaError::validation`] if the schema rejects `input`.
    pub fn validate_input(&self, node_type: &str, input: &Value) -> Result<Value, NebulaError> {
        let def = self
            .get_definition(node_type)
            .ok_or_else(|| NebulaError::unknown_type(node_type))?;
        def.input_schema
            .validate(input)
            .map_err(|e| NebulaError::validation(e.to_string()))
    }

    /// Validate `output` against the registered type's output schema.
    ///
    /// # Errors
    /// Same as [`Self::validate_input`], against the output schema.
    pub fn validate_output(&self, node_type: &str, output: &Value) -> Result<Value, NebulaError> {
        let def = self
            .get_definition(node_type)
            .ok_or_else(|| NebulaError::unknown_type(node_type))?;
        def.output_schema
            .validate(output)
            .map_err(|e| NebulaError::validation(e.to_string()))
    }
}
