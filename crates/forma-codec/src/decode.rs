use forma_schema::FormSchema;
use forma_value::{FieldMap, FieldPath, Items, PathSegment, Value};
use tracing::debug;

use crate::entry::SubmissionEntry;
use crate::error::DecodeError;

/// Decode flat wire entries into a raw value tree.
///
/// Entries may arrive in any order; list items end up ordered by their
/// numeric index, not by first appearance. An index past the current list
/// length pads the list with `Absent` placeholders; gaps surface later as
/// required-field violations, never as decode failures.
///
/// The schema decides shape where the wire is ambiguous: multi-valued
/// kinds (multiselect, checkbox groups) always produce a list node, even
/// when exactly one raw value was submitted. Repeated keys on a scalar
/// path keep the last value, matching flat form-dictionary semantics.
pub fn decode(entries: &[(String, String)], schema: &FormSchema) -> Result<Value, DecodeError> {
    debug!(form = %schema.name, entries = entries.len(), "decoding submission");

    let mut root = Value::Map(FieldMap::default());
    for (key, raw) in entries {
        let entry = SubmissionEntry::parse(key, raw.clone());
        let multi = schema
            .spec_at(&entry.path)
            .is_some_and(|spec| spec.is_multi_valued());
        assign(&mut root, &entry.path.0, &entry.value, multi, &entry.path)?;
    }
    Ok(root)
}

/// Walk `segments` below `node`, creating intermediate containers, and
/// place `raw` at the leaf.
fn assign(
    node: &mut Value,
    segments: &[PathSegment],
    raw: &str,
    multi: bool,
    full: &FieldPath,
) -> Result<(), DecodeError> {
    let Some((segment, rest)) = segments.split_first() else {
        return assign_leaf(node, raw, multi, full);
    };

    if node.is_absent() {
        *node = match segment {
            PathSegment::Field(_) => Value::Map(FieldMap::default()),
            PathSegment::Index(_) => Value::List(Items::default()),
        };
    }

    let depth = full.0.len() - segments.len();
    let child = match (node, segment) {
        (Value::Map(FieldMap(map)), PathSegment::Field(name)) => {
            map.entry(name.clone()).or_insert(Value::Absent)
        }
        (Value::List(Items(items)), PathSegment::Index(index)) => {
            if items.len() <= *index {
                items.resize(index + 1, Value::Absent);
            }
            &mut items[*index]
        }
        (other, PathSegment::Field(_)) => {
            return Err(conflict(full, depth, other.type_name(), "an object"));
        }
        (other, PathSegment::Index(_)) => {
            return Err(conflict(full, depth, other.type_name(), "a list"));
        }
    };
    assign(child, rest, raw, multi, full)
}

fn assign_leaf(node: &mut Value, raw: &str, multi: bool, full: &FieldPath) -> Result<(), DecodeError> {
    let depth = full.0.len();
    if multi {
        match node {
            Value::Absent => *node = Value::List(Items(vec![Value::Str(raw.to_string())])),
            Value::List(Items(items)) => items.push(Value::Str(raw.to_string())),
            other => return Err(conflict(full, depth, other.type_name(), "a list")),
        }
    } else {
        match node {
            Value::Absent | Value::Str(_) => *node = Value::Str(raw.to_string()),
            other => return Err(conflict(full, depth, other.type_name(), "a scalar")),
        }
    }
    Ok(())
}

fn conflict(full: &FieldPath, depth: usize, existing: &'static str, requested: &'static str) -> DecodeError {
    let prefix = FieldPath(full.0[..depth].to_vec());
    DecodeError::PathConflict {
        path: prefix.to_string(),
        existing,
        requested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forma_schema::{FieldKind, FieldSpecBuilder, FormSchema};

    fn entries(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn pets_schema() -> FormSchema {
        FormSchema::new(
            "pets",
            vec![
                FieldSpecBuilder::new("owner", FieldKind::Text).build(),
                FieldSpecBuilder::list(
                    "pets",
                    vec![FieldSpecBuilder::new("name", FieldKind::Text).required().build()],
                )
                .build(),
            ],
        )
        .unwrap()
    }

    fn tags_schema() -> FormSchema {
        FormSchema::new(
            "prefs",
            vec![
                FieldSpecBuilder::new("tags", FieldKind::MultiSelect)
                    .plain_options(["a", "b", "c"])
                    .build(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn list_items_follow_index_order_not_submission_order() {
        let tree = decode(
            &entries(&[("pets[1].name", "Rex"), ("pets[0].name", "Fido")]),
            &pets_schema(),
        )
        .unwrap();

        let pets = tree.at(&"pets".parse().unwrap()).unwrap().as_list().unwrap();
        assert_eq!(pets.0.len(), 2);
        assert_eq!(
            tree.at(&"pets[0].name".parse().unwrap()),
            Some(&Value::from("Fido"))
        );
        assert_eq!(
            tree.at(&"pets[1].name".parse().unwrap()),
            Some(&Value::from("Rex"))
        );
    }

    #[test]
    fn index_gaps_become_absent_placeholders() {
        let tree = decode(
            &entries(&[("pets[0].name", "Fido"), ("pets[2].name", "Rex")]),
            &pets_schema(),
        )
        .unwrap();

        let pets = tree.at(&"pets".parse().unwrap()).unwrap().as_list().unwrap();
        assert_eq!(pets.0.len(), 3);
        assert_eq!(pets.0[1], Value::Absent);
    }

    #[test]
    fn single_multiselect_value_still_decodes_to_a_list() {
        let tree = decode(&entries(&[("tags", "a")]), &tags_schema()).unwrap();
        assert_eq!(
            tree.at(&"tags".parse().unwrap()),
            Some(&Value::List(Items(vec![Value::from("a")])))
        );
    }

    #[test]
    fn repeated_multiselect_values_accumulate() {
        let tree = decode(&entries(&[("tags", "a"), ("tags", "c")]), &tags_schema()).unwrap();
        let tags = tree.at(&"tags".parse().unwrap()).unwrap().as_list().unwrap();
        assert_eq!(tags.0.len(), 2);
    }

    #[test]
    fn repeated_scalar_key_keeps_last_value() {
        let tree = decode(&entries(&[("owner", "a"), ("owner", "b")]), &pets_schema()).unwrap();
        assert_eq!(tree.at(&"owner".parse().unwrap()), Some(&Value::from("b")));
    }

    #[test]
    fn scalar_then_index_on_same_path_conflicts() {
        let err = decode(
            &entries(&[("owner", "x"), ("owner[0]", "y")]),
            &pets_schema(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            DecodeError::PathConflict {
                path: "owner".to_string(),
                existing: "string",
                requested: "a list",
            }
        );
    }

    #[test]
    fn nested_field_under_scalar_conflicts() {
        let err = decode(
            &entries(&[("owner", "x"), ("owner.name", "y")]),
            &pets_schema(),
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::PathConflict { .. }));
    }

    #[test]
    fn unknown_fields_decode_without_error() {
        // absence/extraneous data is a validation concern, not a decode one
        let tree = decode(&entries(&[("ghost", "boo")]), &pets_schema()).unwrap();
        assert_eq!(tree.at(&"ghost".parse().unwrap()), Some(&Value::from("boo")));
    }
}
