//! Conversion of raw string trees into schema-native typed trees.
//!
//! The schema is the authority on shape: the walk visits every declared
//! field, coercing leaves absent from the raw tree to an explicit
//! [`Value::Absent`] marker rather than skipping them. Coercion problems
//! are recorded per leaf path and never halt the walk.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use forma_schema::{FieldKind, FieldSpec, FormSchema, NumberKind};
use forma_value::value::{DATE_FORMAT, DATETIME_FORMAT, TIME_FORMAT};
use forma_value::{ErrorMap, FieldMap, FieldPath, FileRef, Items, PathSegment, Value};

use crate::violation::Violation;

/// Raw values a single boolean checkbox reads as checked.
const TRUTHY: [&str; 4] = ["on", "true", "yes", "1"];

/// Coerce a raw tree against a schema, returning the typed tree and any
/// per-leaf coercion errors. Already-typed leaves pass through unchanged,
/// so reapplying coercion to its own output is a no-op.
pub fn coerce(raw: &Value, schema: &FormSchema) -> (Value, ErrorMap) {
    debug!(form = %schema.name, "coercing submission");
    let mut cx = CoerceContext {
        errors: ErrorMap::default(),
        path: Vec::new(),
    };
    let typed = coerce_group(raw.as_map(), &schema.fields, &mut cx);
    (typed, cx.errors)
}

struct CoerceContext {
    errors: ErrorMap,
    path: Vec<PathSegment>,
}

impl CoerceContext {
    fn with_path<F, R>(&mut self, segment: PathSegment, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.path.push(segment);
        let result = f(self);
        self.path.pop();
        result
    }

    fn record(&mut self, violation: Violation) {
        self.errors
            .push(FieldPath(self.path.clone()), violation.to_string());
    }
}

fn coerce_group(raw: Option<&FieldMap>, fields: &[FieldSpec], cx: &mut CoerceContext) -> Value {
    let mut typed = FieldMap::default();
    for spec in fields {
        // A declared default stands in for a field the submission never
        // carried; an explicitly submitted empty value wins over it.
        let fallback = spec.default.as_ref().map(|d| Value::Str(d.clone()));
        let raw_child = raw
            .and_then(|map| map.0.get(&spec.name))
            .or(fallback.as_ref());
        let value = cx.with_path(PathSegment::Field(spec.name.clone()), |cx| {
            coerce_field(raw_child, spec, cx)
        });
        typed.0.insert(spec.name.clone(), value);
    }
    Value::Map(typed)
}

fn coerce_field(raw: Option<&Value>, spec: &FieldSpec, cx: &mut CoerceContext) -> Value {
    match &spec.kind {
        FieldKind::Object(fields) => match raw {
            None | Some(Value::Absent) => Value::Absent,
            Some(Value::Map(map)) => coerce_group(Some(map), fields, cx),
            Some(other) => {
                cx.record(Violation::TypeMismatch {
                    expected: "object",
                    actual: other.type_name().to_string(),
                });
                other.clone()
            }
        },
        FieldKind::List(list) => match raw {
            None | Some(Value::Absent) => Value::Absent,
            Some(Value::List(Items(items))) => {
                let coerced = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        cx.with_path(PathSegment::Index(index), |cx| match item {
                            Value::Map(map) => coerce_group(Some(map), &list.item_fields, cx),
                            // index-gap placeholder: an item with no data
                            Value::Absent => coerce_group(None, &list.item_fields, cx),
                            other => {
                                cx.record(Violation::TypeMismatch {
                                    expected: "object",
                                    actual: other.type_name().to_string(),
                                });
                                other.clone()
                            }
                        })
                    })
                    .collect();
                Value::List(Items(coerced))
            }
            Some(other) => {
                cx.record(Violation::TypeMismatch {
                    expected: "list",
                    actual: other.type_name().to_string(),
                });
                other.clone()
            }
        },
        _ if spec.is_multi_valued() => coerce_multi(raw, spec, cx),
        FieldKind::Checkbox => match raw {
            None | Some(Value::Absent) => Value::Bool(false),
            Some(Value::Bool(b)) => Value::Bool(*b),
            Some(Value::Str(s)) => Value::Bool(TRUTHY.contains(&s.trim())),
            Some(other) => {
                cx.record(Violation::TypeMismatch {
                    expected: "boolean",
                    actual: other.type_name().to_string(),
                });
                other.clone()
            }
        },
        FieldKind::Select | FieldKind::Radio => match raw {
            None | Some(Value::Absent) => Value::Absent,
            Some(Value::Str(s)) => {
                let trimmed = s.trim();
                if !trimmed.is_empty() && !spec.option_values().any(|v| v == trimmed) {
                    cx.record(Violation::InvalidChoice {
                        value: trimmed.to_string(),
                    });
                }
                Value::Str(trimmed.to_string())
            }
            Some(other) => {
                cx.record(Violation::TypeMismatch {
                    expected: "string",
                    actual: other.type_name().to_string(),
                });
                other.clone()
            }
        },
        FieldKind::Number(number) | FieldKind::Range(number) => coerce_number(raw, *number, cx),
        FieldKind::Date => coerce_temporal(raw, "date", cx, |s| {
            NaiveDate::parse_from_str(s, DATE_FORMAT).map(Value::Date)
        }),
        FieldKind::DateTime => coerce_temporal(raw, "datetime", cx, |s| {
            NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).map(Value::DateTime)
        }),
        FieldKind::Time => coerce_temporal(raw, "time", cx, |s| {
            NaiveTime::parse_from_str(s, TIME_FORMAT).map(Value::Time)
        }),
        FieldKind::File => match raw {
            None | Some(Value::Absent) => Value::Absent,
            Some(Value::File(f)) => Value::File(f.clone()),
            Some(Value::Str(s)) if s.trim().is_empty() => Value::Absent,
            // content is a collaborator concern; only the reference is kept
            Some(Value::Str(s)) => Value::File(FileRef {
                name: s.trim().to_string(),
            }),
            Some(other) => {
                cx.record(Violation::TypeMismatch {
                    expected: "file",
                    actual: other.type_name().to_string(),
                });
                other.clone()
            }
        },
        // Text, Email, Password, Color, Hidden, Url, Tel, TextArea
        _ => match raw {
            None | Some(Value::Absent) => Value::Absent,
            Some(Value::Str(s)) => Value::Str(s.trim().to_string()),
            Some(other) => {
                cx.record(Violation::TypeMismatch {
                    expected: "string",
                    actual: other.type_name().to_string(),
                });
                other.clone()
            }
        },
    }
}

/// Multi-valued kinds (multiselect, checkbox groups) always coerce to a
/// list: absence means zero selections, a lone string means one.
fn coerce_multi(raw: Option<&Value>, spec: &FieldSpec, cx: &mut CoerceContext) -> Value {
    let items: Vec<&Value> = match raw {
        None | Some(Value::Absent) => Vec::new(),
        Some(Value::List(Items(items))) => items.iter().collect(),
        Some(single) => vec![single],
    };

    let mut coerced = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Str(s) => {
                let trimmed = s.trim();
                if spec.option_values().any(|v| v == trimmed) {
                    coerced.push(Value::Str(trimmed.to_string()));
                } else {
                    // attributed to the field, not the item index
                    cx.record(Violation::InvalidChoice {
                        value: trimmed.to_string(),
                    });
                }
            }
            other => {
                cx.record(Violation::TypeMismatch {
                    expected: "string",
                    actual: other.type_name().to_string(),
                });
            }
        }
    }
    Value::List(Items(coerced))
}

fn coerce_number(raw: Option<&Value>, number: NumberKind, cx: &mut CoerceContext) -> Value {
    let expected = match number {
        NumberKind::Integer => "integer",
        NumberKind::Float => "number",
    };
    match raw {
        None | Some(Value::Absent) => Value::Absent,
        Some(Value::I64(n)) => match number {
            NumberKind::Integer => Value::I64(*n),
            NumberKind::Float => Value::F64(*n as f64),
        },
        Some(Value::F64(n)) if number == NumberKind::Float => Value::F64(*n),
        Some(Value::Str(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Value::Absent;
            }
            let parsed = match number {
                NumberKind::Integer => trimmed.parse::<i64>().map(Value::I64).ok(),
                NumberKind::Float => trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(Value::F64),
            };
            match parsed {
                Some(value) => value,
                None => {
                    cx.record(Violation::TypeMismatch {
                        expected,
                        actual: trimmed.to_string(),
                    });
                    Value::Str(trimmed.to_string())
                }
            }
        }
        Some(other) => {
            cx.record(Violation::TypeMismatch {
                expected,
                actual: other.type_name().to_string(),
            });
            other.clone()
        }
    }
}

fn coerce_temporal<F>(
    raw: Option<&Value>,
    expected: &'static str,
    cx: &mut CoerceContext,
    parse: F,
) -> Value
where
    F: Fn(&str) -> Result<Value, chrono::ParseError>,
{
    match raw {
        None | Some(Value::Absent) => Value::Absent,
        Some(typed @ (Value::Date(_) | Value::DateTime(_) | Value::Time(_))) => typed.clone(),
        Some(Value::Str(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Value::Absent;
            }
            match parse(trimmed) {
                Ok(value) => value,
                Err(_) => {
                    cx.record(Violation::TypeMismatch {
                        expected,
                        actual: trimmed.to_string(),
                    });
                    Value::Str(trimmed.to_string())
                }
            }
        }
        Some(other) => {
            cx.record(Violation::TypeMismatch {
                expected,
                actual: other.type_name().to_string(),
            });
            other.clone()
        }
    }
}
