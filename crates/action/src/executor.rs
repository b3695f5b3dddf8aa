//! The executor contract every node definition must supply.

use async_trait::async_trait;
use serde_json::Value;

use nebula_error::NebulaError;

use crate::context::NodeContext;
use crate::result::NodeExecutionResult;

/// An asynchronous, side-effecting node executor.
///
/// `execute` receives schema-validated input and a [`NodeContext`]; it
/// returns `Ok(result)` where `result.success` may itself be `false` for a
/// recoverable failure (§4.6.3 "executors may return `{success:false}`"), or
/// `Err(err)` for an unexpected failure ("executors may throw"). The
/// single-node executor (nebula-execution) treats both equivalently for
/// retry purposes.
///
/// Implementations **must be reentrant**: the same `Arc<dyn NodeExecutor>`
/// may be invoked concurrently for different nodes/executions, so no
/// per-definition mutable state may be kept on `self`.
#[async_trait]
pub trait NodeExecutor: Send + Sync {
    async fn execute(
        &self,
        input: Value,
        ctx: &NodeContext,
    ) -> Result<NodeExecutionResult, NebulaError>;
}
