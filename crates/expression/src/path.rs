//! Dot/bracket path resolution over a JSON value (§4.4.2).

use serde_json::Value;

/// A single step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Parse `a.b[0].c` / `[0].b` into an ordered list of [`Segment`]s.
fn parse(path: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let bytes = path.as_bytes();
    let mut i = 0;
    let mut key = String::new();

    let flush_key = |key: &mut String, segments: &mut Vec<Segment>| {
        if !key.is_empty() {
            segments.push(Segment::Key(std::mem::take(key)));
        }
    };

    while i < bytes.len() {
        match bytes[i] {
            b'.' => {
                flush_key(&mut key, &mut segments);
                i += 1;
            }
            b'[' => {
                flush_key(&mut key, &mut segments);
                let start = i + 1;
                let end = path[start..].find(']').map_or(path.len(), |p| start + p);
                if let Ok(index) = path[start..end].parse::<usize>() {
                    segments.push(Segment::Index(index));
                }
                i = end + 1;
            }
            _ => {
                key.push(bytes[i] as char);
                i += 1;
            }
        }
    }
    flush_key(&mut key, &mut segments);
    segments
}

/// Traverse `path` over `root`, returning the absent value (`None`) on any
/// missing key, out-of-range index, or traversal through `null`.
///
/// An empty path returns the whole `root` unchanged.
#[must_use]
pub fn resolve_nested_path(root: &Value, path: &str) -> Option<Value> {
    if path.is_empty() {
        return Some(root.clone());
    }

    let segments = parse(path);
    let mut current = root.clone();
    for segment in segments {
        current = match (segment, &current) {
            (Segment::Key(key), Value::Object(map)) => map.get(&key)?.clone(),
            (Segment::Index(index), Value::Array(items)) => items.get(index)?.clone(),
            _ => return None,
        };
    }
    Some(current)
}
