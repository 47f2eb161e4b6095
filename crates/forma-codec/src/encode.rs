use forma_value::{FieldMap, FieldPath, Items, PathSegment, Value};

/// Flatten a value tree into wire `(key, value)` pairs.
///
/// Lists of scalars emit repeated bare keys (the shape a multi-valued
/// control posts); lists of groups emit indexed keys. `Absent` nodes emit
/// nothing, matching a control that was never submitted.
pub fn encode(value: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    walk(value, &FieldPath::root(), &mut out);
    out
}

fn walk(node: &Value, path: &FieldPath, out: &mut Vec<(String, String)>) {
    match node {
        Value::Absent => {}
        Value::Map(FieldMap(map)) => {
            for (name, child) in map {
                walk(child, &path.child(PathSegment::Field(name.clone())), out);
            }
        }
        Value::List(Items(items)) => {
            let scalar_items = items
                .iter()
                .all(|item| !matches!(item, Value::Map(_) | Value::List(_)));
            if scalar_items {
                for item in items {
                    if let Some(s) = item.as_form_str() {
                        out.push((path.to_string(), s));
                    }
                }
            } else {
                for (index, item) in items.iter().enumerate() {
                    walk(item, &path.child(PathSegment::Index(index)), out);
                }
            }
        }
        scalar => {
            if let Some(s) = scalar.as_form_str() {
                out.push((path.to_string(), s));
            }
        }
    }
}
