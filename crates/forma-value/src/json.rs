//! Conversion of a typed value tree to JSON for API responses.

use serde_json::json;

use crate::value::{FieldMap, Items, Value};

/// Convert a typed value tree to a JSON value.
///
/// `Absent` maps to `null`: kinds with no natural empty value (numbers,
/// dates) keep their absence marker through validation, and callers see
/// `null` for them. Non-finite floats never reach this point because
/// coercion rejects them as type mismatches.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Absent => serde_json::Value::Null,
        Value::Bool(b) => json!(*b),
        Value::I64(n) => json!(*n),
        Value::F64(n) => json!(*n),
        Value::Str(s) => json!(s),
        Value::Date(_) | Value::DateTime(_) | Value::Time(_) => {
            // ISO-8601 wire strings, same as the form control rendition
            json!(value.as_form_str().unwrap_or_default())
        }
        Value::File(f) => json!(f.name),
        Value::List(Items(items)) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Map(FieldMap(map)) => {
            let mut object = serde_json::Map::new();
            for (name, value) in map {
                object.insert(name.clone(), to_json(value));
            }
            serde_json::Value::Object(object)
        }
    }
}
