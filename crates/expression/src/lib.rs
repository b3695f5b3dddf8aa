//! Execution context, path resolution, JSONPath, and template interpolation (C4).
//!
//! [`ExecutionContext`] owns the per-run variable store and exposes the
//! operations of §4.4: plain get/set/merge, [`path::resolve_nested_path`]
//! (dot/bracket traversal), [`jsonpath::evaluate_json_path`] (`$`-prefixed
//! JSONPath), and [`interpolate::interpolate`] / `interpolate_object`
//! (`{{ expr }}` substitution). [`ExecutionContext::to_node_context`] derives
//! the per-node [`nebula_action::NodeContext`] an executor actually sees.

pub mod context;
pub mod interpolate;
pub mod jsonpath;
pub mod path;

pub use context::ExecutionContext;
pub use interpolate::{coerce_to_string, evaluate_expression, interpolate, interpolate_object};
pub use jsonpath::evaluate_json_path;
pub use path::resolve_nested_path;

/// Common prelude.
pub mod prelude {
    pub use super::{interpolate, interpolate_object, resolve_nested_path, ExecutionContext};
}
