//! # Workflow Core
//!
//! Core types shared by every other crate in the workflow execution engine:
//! strongly-typed entity identifiers and the semantic version used to stamp
//! workflow definitions.
//!
//! ## Key Components
//!
//! - **Identifiers**: [`ExecutionId`], [`WorkflowId`], [`NodeId`] — UUID
//!   newtypes that cannot be confused with one another at compile time.
//! - **Version**: a re-export of [`semver::Version`] used to stamp workflow
//!   definitions for forward/backward compatibility checks.
//!
//! ## Usage
//!
//! ```rust
//! use nebula_core::{ExecutionId, WorkflowId, NodeId};
//!
//! let execution_id = ExecutionId::v4();
//! let workflow_id = WorkflowId::v4();
//! let node_id = NodeId::v4();
//! ```

pub mod id;

pub use id::{ExecutionId, NodeId, UuidParseError, WorkflowId};

/// Semantic version, used to stamp workflow definitions.
pub type Version = semver::Version;

/// Common prelude.
pub mod prelude {
    pub use super::{ExecutionId, NodeId, Version, WorkflowId};
}
