//! JSONPath evaluation (§4.4.2), delegating to `jsonpath-rust`.
//!
//! No example repo in this workspace's lineage carries a JSONPath
//! dependency — `jsonpath-rust` is pulled in fresh as the closest-fit
//! ecosystem crate for this operation (see project DESIGN notes).

use jsonpath_rust::JsonPathQuery;
use serde_json::Value;

/// Evaluate a JSONPath expression (must start with `$`) against `root`.
///
/// A singleton match list is unwrapped to the scalar match; an empty match
/// list or any evaluation error yields the absent value (`None`), matching
/// §4.4.2's "on any error, return the absent value".
#[must_use]
pub fn evaluate_json_path(root: &Value, path: &str) -> Option<Value> {
    if !path.starts_with('$') {
        return None;
    }

    match root.clone().path(path) {
        Ok(Value::Array(mut matches)) => match matches.len() {
            0 => None,
            1 => Some(matches.remove(0)),
            _ => Some(Value::Array(matches)),
        },
        Ok(other) => Some(other),
        Err(_) => None,
    }
}
