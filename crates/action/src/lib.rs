//! Node definition, registry, and execution context.
//!
//! Bundles the spec's C2 (node definition) and C3 (registry) components plus
//! the node-side half of C4 (the per-node [`NodeContext`] an executor
//! actually sees, as opposed to the workflow-wide execution context owned by
//! `nebula-expression`).
//!
//! A node is described once as a [`NodeDefinition`] — type identifier,
//! metadata, input/output schemas, and an [`NodeExecutor`] — and indexed by
//! a [`Registry`]. The single-node executor in `nebula-execution` drives a
//! definition's executor under retry/timeout/cache policy; this crate only
//! owns the shape of that contract.

pub mod capability;
pub mod category;
pub mod context;
pub mod definition;
pub mod executor;
pub mod metadata;
pub mod registry;
pub mod result;

pub use capability::NodeCapabilities;
pub use category::NodeCategory;
pub use context::{CredentialProvider, NodeContext, SecureString, ServiceBag};
pub use definition::{NodeDefinition, NodeDefinitionBuilder};
pub use executor::NodeExecutor;
pub use metadata::NodeMetadata;
pub use registry::Registry;
pub use result::NodeExecutionResult;

/// Common prelude.
pub mod prelude {
    pub use super::{
        NodeCapabilities, NodeCategory, NodeContext, NodeDefinition, NodeDefinitionBuilder,
        NodeExecutionResult, NodeExecutor, NodeMetadata, Registry,
    };
}
