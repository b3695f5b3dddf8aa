//! Template interpolation over `{{ expr }}` expressions (§4.4.3).

use serde_json::Value;

use crate::jsonpath::evaluate_json_path;
use crate::path::resolve_nested_path;

/// A single `{{ expr }}` occurrence found in a template string.
struct Match {
    /// Byte range of the whole `{{ ... }}` span, including braces.
    span: std::ops::Range<usize>,
    /// The trimmed expression inside the braces.
    expr: String,
}

fn find_matches(template: &str) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut search_from = 0;
    while let Some(open) = template[search_from..].find("{{") {
        let open = search_from + open;
        let Some(close_rel) = template[open + 2..].find("}}") else {
            break;
        };
        let close = open + 2 + close_rel;
        let expr = template[open + 2..close].trim().to_string();
        matches.push(Match {
            span: open..close + 2,
            expr,
        });
        search_from = close + 2;
    }
    matches
}

/// Resolve a single expression against `variables`: JSONPath if it starts
/// with `$`, otherwise a dot/bracket nested path.
#[must_use]
pub fn evaluate_expression(expr: &str, variables: &Value) -> Option<Value> {
    if expr.starts_with('$') {
        evaluate_json_path(variables, expr)
    } else {
        resolve_nested_path(variables, expr)
    }
}

/// Coerce a resolved value (or absence) to its textual form for splicing
/// into a multi-expression template.
#[must_use]
pub fn coerce_to_string(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| coerce_to_string(Some(item)))
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

/// Interpolate a single template value.
///
/// - Non-string input is returned verbatim.
/// - A string that is *exactly* one `{{ expr }}` (no surrounding or
///   interleaved literal text) returns the resolved value's own runtime
///   type.
/// - Otherwise, every `{{ expr }}` occurrence is replaced by its coerced
///   string form.
#[must_use]
pub fn interpolate(template: &Value, variables: &Value) -> Value {
    let Value::String(s) = template else {
        return template.clone();
    };

    let matches = find_matches(s);
    if matches.is_empty() {
        return template.clone();
    }

    if matches.len() == 1 && matches[0].span == (0..s.len()) {
        let resolved = evaluate_expression(&matches[0].expr, variables);
        return resolved.unwrap_or(Value::Null);
    }

    let mut result = String::with_capacity(s.len());
    let mut cursor = 0;
    for m in &matches {
        result.push_str(&s[cursor..m.span.start]);
        let resolved = evaluate_expression(&m.expr, variables);
        result.push_str(&coerce_to_string(resolved.as_ref()));
        cursor = m.span.end;
    }
    result.push_str(&s[cursor..]);
    Value::String(result)
}

/// Recursively apply [`interpolate`] to every string leaf of `value`,
/// preserving the shape of objects and arrays and leaving non-string
/// leaves unchanged.
#[must_use]
pub fn interpolate_object(value: &Value, variables: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), interpolate_object(v, variables)))
                .collect(),
        ),
        Value::Array(items) => {
            Value::Array(items.iter().map(|v| interpolate_object(v, variables)).collect())
        }
        Value::String(_) => interpolate(value, variables),
        other => other.clone(),
    }
}
