//! # Workflow Error Handling
//!
//! Centralized error handling for the workflow execution engine: a single
//! [`NebulaError`] type classified by [`ErrorKind`], rich [`ErrorContext`],
//! and retry strategies with exponential backoff.
//!
//! ## Architecture
//!
//! - [`kinds`] — the error taxonomy (§7 of the design): `UnknownType`,
//!   `DuplicateType`, `ValidationError`, `CycleDetected`, `Timeout`,
//!   `Aborted`, `ExecutorFailure`, `ExecutorException`, `Cancelled`,
//!   `PlanValidation`.
//! - [`NebulaError`] — the concrete error struct, wrapping a kind with
//!   context and a retryable flag.
//! - [`ErrorContext`] / [`ErrorContextBuilder`] — structured metadata.
//! - [`retry`] — retry/backoff helpers for the single-node executor.
//!
//! ## Quick start
//!
//! ```rust
//! use nebula_error::{NebulaError, Result, ResultExt};
//!
//! fn validate(input: &serde_json::Value) -> Result<()> {
//!     if input.is_null() {
//!         return Err(NebulaError::validation("input must not be null"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod error;
pub mod kinds;
pub mod result;
pub mod retry;

pub use context::{ErrorContext, ErrorContextBuilder};
pub use error::NebulaError;
pub use kinds::ErrorKind;
pub use result::{Result, ResultExt};
pub use retry::{RetryStrategy, retry, retry_with_timeout};

/// Common prelude for error handling.
pub mod prelude {
    pub use super::{
        ErrorContext, ErrorContextBuilder, ErrorKind, NebulaError, Result, ResultExt,
        RetryStrategy, retry, retry_with_timeout,
    };
}
