//! Execution context: the per-run variable store (C4).

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};

use nebula_action::NodeContext;

use crate::interpolate::{interpolate, interpolate_object};
use crate::jsonpath::evaluate_json_path;
use crate::path::resolve_nested_path;

/// Mutable per-run container of workflow variables.
///
/// Owned exclusively by the workflow executor: per §5, mutating writes
/// (`store_node_output`) happen only from the single-threaded wave-completion
/// bookkeeping, so no lock is needed on the "normal" path — the `RwLock`
/// here exists to let node executors take a live, read-only snapshot
/// callback ([`NodeContext::resolve_nested_path`]) without unsafe aliasing.
#[derive(Clone, Default)]
pub struct ExecutionContext {
    variables: Arc<RwLock<Map<String, Value>>>,
}

impl ExecutionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct with an initial variable set.
    #[must_use]
    pub fn with_variables(variables: Map<String, Value>) -> Self {
        Self {
            variables: Arc::new(RwLock::new(variables)),
        }
    }

    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.variables.write().insert(key.into(), value);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.variables.read().get(key).cloned()
    }

    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.variables.read().contains_key(key)
    }

    pub fn delete(&self, key: &str) -> Option<Value> {
        self.variables.write().remove(key)
    }

    pub fn clear(&self) {
        self.variables.write().clear();
    }

    /// Shallow-merge `other` into the variable map; `other`'s keys win on
    /// collision.
    pub fn merge(&self, other: Map<String, Value>) {
        self.variables.write().extend(other);
    }

    /// A snapshot of the full variable map.
    #[must_use]
    pub fn snapshot(&self) -> Map<String, Value> {
        self.variables.read().clone()
    }

    /// Traverse a dot/bracket path over the variable map (§4.4.2).
    #[must_use]
    pub fn resolve_nested_path(&self, path: &str) -> Option<Value> {
        let root = Value::Object(self.variables.read().clone());
        resolve_nested_path(&root, path)
    }

    /// Evaluate a JSONPath expression over the variable map (§4.4.2).
    #[must_use]
    pub fn evaluate_json_path(&self, path: &str) -> Option<Value> {
        let root = Value::Object(self.variables.read().clone());
        evaluate_json_path(&root, path)
    }

    /// Interpolate a single template value against the current variables
    /// (§4.4.3).
    #[must_use]
    pub fn interpolate(&self, template: &Value) -> Value {
        let root = Value::Object(self.variables.read().clone());
        interpolate(template, &root)
    }

    /// Structurally interpolate every string leaf of `obj` (§4.4.3).
    #[must_use]
    pub fn interpolate_object(&self, obj: &Value) -> Value {
        let root = Value::Object(self.variables.read().clone());
        interpolate_object(obj, &root)
    }

    /// Store a node's output under its id, additionally merging mapping
    /// outputs into the top-level namespace (§4.4.4, dual storage).
    pub fn store_node_output(&self, node_id: &str, value: Value) {
        let mut vars = self.variables.write();
        if let Value::Object(map) = &value {
            for (k, v) in map {
                vars.insert(k.clone(), v.clone());
            }
        }
        vars.insert(node_id.to_string(), value);
    }

    /// Fetch a previously stored node output by id.
    #[must_use]
    pub fn get_node_output(&self, node_id: &str) -> Option<Value> {
        self.get(node_id)
    }

    /// Derive a [`NodeContext`] for a node about to execute.
    ///
    /// `variables` on the returned context is a **snapshot** taken now;
    /// `resolve_nested_path` on it closes over this live context and will
    /// observe later writes (§4.4.5).
    #[must_use]
    pub fn to_node_context(
        &self,
        user_id: impl Into<String>,
        workflow_execution_id: impl Into<String>,
    ) -> NodeContext {
        let snapshot = self.snapshot();
        let live = self.clone();
        NodeContext::new(
            user_id,
            workflow_execution_id,
            snapshot,
            Arc::new(move |path: &str| live.resolve_nested_path(path)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_has_delete_roundtrip() {
        let ctx = ExecutionContext::new();
        assert!(!ctx.has("x"));
        ctx.set("x", serde_json::json!(1));
        assert!(ctx.has("x"));
        assert_eq!(ctx.get("x"), Some(serde_json::json!(1)));
        assert_eq!(ctx.delete("x"), Some(serde_json::json!(1)));
        assert!(!ctx.has("x"));
    }

    #[test]
    fn clear_empties_the_store() {
        let ctx = ExecutionContext::new();
        ctx.set("a", serde_json::json!(1));
        ctx.clear();
        assert!(!ctx.has("a"));
    }

    #[test]
    fn merge_overwrites_on_collision() {
        let ctx = ExecutionContext::new();
        ctx.set("a", serde_json::json!(1));
        let mut other = Map::new();
        other.insert("a".into(), serde_json::json!(2));
        other.insert("b".into(), serde_json::json!(3));
        ctx.merge(other);
        assert_eq!(ctx.get("a"), Some(serde_json::json!(2)));
        assert_eq!(ctx.get("b"), Some(serde_json::json!(3)));
    }

    #[test]
    fn dual_storage_merges_mapping_output_to_top_level() {
        let ctx = ExecutionContext::new();
        ctx.store_node_output("node1", serde_json::json!({"field": "value"}));
        assert_eq!(ctx.get_node_output("node1"), Some(serde_json::json!({"field": "value"})));
        assert_eq!(ctx.get("field"), Some(serde_json::json!("value")));
    }

    #[test]
    fn dual_storage_skips_top_level_merge_for_non_mapping() {
        let ctx = ExecutionContext::new();
        ctx.store_node_output("node1", serde_json::json!(42));
        assert_eq!(ctx.get("node1"), Some(serde_json::json!(42)));
    }

    #[test]
    fn to_node_context_snapshot_does_not_see_later_writes() {
        let ctx = ExecutionContext::new();
        ctx.set("a", serde_json::json!(1));
        let node_ctx = ctx.to_node_context("user", "exec");
        ctx.set("a", serde_json::json!(2));
        assert_eq!(node_ctx.get_variable("a"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn to_node_context_resolve_nested_path_sees_later_writes() {
        let ctx = ExecutionContext::new();
        ctx.set("a", serde_json::json!(1));
        let node_ctx = ctx.to_node_context("user", "exec");
        ctx.set("a", serde_json::json!(2));
        assert_eq!(node_ctx.resolve_nested_path("a"), Some(serde_json::json!(2)));
    }

    #[test]
    fn interpolate_uses_current_variables() {
        let ctx = ExecutionContext::new();
        ctx.set("name", serde_json::json!("ada"));
        let result = ctx.interpolate(&serde_json::json!("hi {{ name }}"));
        assert_eq!(result, serde_json::json!("hi ada"));
    }
}
