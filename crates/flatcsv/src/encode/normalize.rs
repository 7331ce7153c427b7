use crate::value::Value;

/// Splits the input into record candidates.
///
/// An array is borrowed as-is; any other value is a single record.
pub fn records(input: &Value) -> &[Value] {
    match input {
        Value::Array(items) => items,
        other => core::slice::from_ref(other),
    }
}
