//! Recovery of the first JSON object from free-form model replies

use crate::types::UnitContent;
use serde_json::Value;
use tracing::debug;

/// Recover the content of a model reply
///
/// Returns the first JSON object found in `reply`, or the no-JSON marker.
pub fn recover_content(reply: &str) -> UnitContent {
    match first_json_object(reply) {
        Some(value) => UnitContent::Extracted(value),
        None => {
            debug!(reply_chars = reply.chars().count(), "No JSON object in reply");
            UnitContent::no_json()
        }
    }
}

/// Find the first balanced `{...}` span that parses as a JSON object
///
/// Braces inside JSON string literals are ignored and backslash escapes are
/// honoured, so a brace in prose before the real object does not hide it.
/// A `{` that never closes ends the search: every later brace sits inside it,
/// so a truncated reply yields `None` rather than one of its inner objects.
pub fn first_json_object(reply: &str) -> Option<Value> {
    for (start, _) in reply.match_indices('{') {
        let len = balanced_len(&reply.as_bytes()[start..])?;
        if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(&reply[start..start + len]) {
            return Some(value);
        }
    }
    None
}

/// Length of the balanced span starting at `bytes[0] == b'{'`
fn balanced_len(bytes: &[u8]) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

/// Remove `key` from every object in `value`, at any depth
pub fn strip_key(value: &mut Value, key: &str) {
    match value {
        Value::Object(map) => {
            map.remove(key);
            for child in map.values_mut() {
                strip_key(child, key);
            }
        }
        Value::Array(items) => {
            for item in items {
                strip_key(item, key);
            }
        }
        _ => {}
    }
}

/// Replace any model-written provenance with the real page and document
pub fn apply_page_provenance(value: &mut Value, page_number: usize, file_name: &str) {
    strip_key(value, "file_name");
    if let Value::Object(map) = value {
        map.insert("page_number".to_string(), Value::from(page_number));
        map.insert("file_name".to_string(), Value::from(file_name));
    }
}
