use std::borrow::Cow;

use crate::value::{Value, format_instant};

const NULL_LITERAL: &str = "null";

/// Nested cells deeper than this render as a placeholder. Writing them as
/// JSON recurses once per level.
pub const MAX_CELL_DEPTH: usize = 128;

/// Renders a value to its unescaped cell text. `None` is a missing key and
/// renders exactly like [`Value::Null`].
pub fn render_cell(value: Option<&Value>, null_as_empty: bool) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => {
            Cow::Borrowed(if null_as_empty { "" } else { NULL_LITERAL })
        }
        Some(Value::Instant(at)) => Cow::Owned(format_instant(at)),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Number(n)) => Cow::Owned(n.to_string()),
        Some(Value::Bool(b)) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Some(nested @ (Value::Array(_) | Value::Object(_))) => Cow::Owned(structural_text(nested)),
    }
}

#[cfg(feature = "json")]
fn structural_text(value: &Value) -> String {
    if exceeds_depth(value, MAX_CELL_DEPTH) {
        tracing::warn!(limit = MAX_CELL_DEPTH, "nested cell is too deep; using placeholder");
        return placeholder(value).to_owned();
    }
    match serde_json::to_string(value) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(error = %err, "nested cell is not serializable; using placeholder");
            placeholder(value).to_owned()
        }
    }
}

#[cfg(not(feature = "json"))]
fn structural_text(value: &Value) -> String {
    placeholder(value).to_owned()
}

/// True when `value` nests more than `limit` containers. Walks with an
/// explicit stack and stops at the first branch past the limit.
#[cfg(feature = "json")]
fn exceeds_depth(value: &Value, limit: usize) -> bool {
    let mut stack = vec![(value, 1usize)];
    while let Some((v, depth)) = stack.pop() {
        match v {
            Value::Array(items) => {
                if depth > limit {
                    return true;
                }
                stack.extend(items.iter().map(|item| (item, depth + 1)));
            }
            Value::Object(entries) => {
                if depth > limit {
                    return true;
                }
                stack.extend(entries.iter().map(|(_, item)| (item, depth + 1)));
            }
            _ => {}
        }
    }
    false
}

fn placeholder(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "[array]",
        _ => "[object]",
    }
}

/// RFC 4180 minimal quoting: a cell is quoted only when it contains the
/// delimiter, a double quote, or a line break. An empty delimiter matches
/// every cell.
pub fn needs_quoting(s: &str, delimiter: &str) -> bool {
    has_special_byte(s.as_bytes()) || s.contains(delimiter)
}

#[cfg(feature = "perf_memchr")]
fn has_special_byte(b: &[u8]) -> bool {
    memchr::memchr3(b'"', b'\n', b'\r', b).is_some()
}

#[cfg(not(feature = "perf_memchr"))]
fn has_special_byte(b: &[u8]) -> bool {
    b.iter().any(|&c| matches!(c, b'"' | b'\n' | b'\r'))
}

/// Appends `s` to `out`, quoting and doubling inner quotes when required.
pub fn escape_into(out: &mut String, s: &str, delimiter: &str) {
    if !needs_quoting(s, delimiter) {
        out.push_str(s);
        return;
    }
    out.reserve(s.len() + 2);
    out.push('"');
    for (i, part) in s.split('"').enumerate() {
        if i > 0 {
            out.push_str("\"\"");
        }
        out.push_str(part);
    }
    out.push('"');
}

/// Renders and escapes one cell.
pub fn encode_cell(value: Option<&Value>, delimiter: &str, null_as_empty: bool) -> String {
    let text = render_cell(value, null_as_empty);
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, &text, delimiter);
    out
}
