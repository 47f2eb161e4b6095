//! Constraint validation over a coerced value tree.
//!
//! Evaluation order per field: required-presence, then (unless coercion
//! already failed the path) length/range, pattern, and recursion into
//! nested kinds. A field failing its required check moves the walk to the
//! *next field*, never aborting the submission; the result is always
//! either a fully typed object or a complete error map.

use ahash::AHashSet;
use regex::Regex;
use tracing::debug;

use forma_schema::{Constraints, FieldKind, FieldSpec, FormSchema};
use forma_value::{ErrorMap, FieldMap, FieldPath, Items, PathSegment, Value};

use crate::violation::Violation;

/// Built-in pattern for the email kind, used when no explicit pattern
/// constraint is declared.
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Result of a validation walk: the completed value tree (absent
/// non-required fields filled with their kind's empty value) plus every
/// violation found, coercion errors included.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub value: Value,
    pub errors: ErrorMap,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<Value, ErrorMap> {
        if self.errors.is_empty() {
            Ok(self.value)
        } else {
            Err(self.errors)
        }
    }
}

/// Validate a typed tree against its schema, merging pre-existing
/// coercion errors into the outcome by path.
pub fn validate(typed: Value, schema: &FormSchema, coercion_errors: ErrorMap) -> ValidationOutcome {
    debug!(form = %schema.name, "validating submission");

    let failed: AHashSet<FieldPath> = coercion_errors.0.keys().cloned().collect();
    let mut cx = ValidateContext {
        errors: coercion_errors,
        failed,
        path: Vec::new(),
    };

    let mut value = typed;
    if let Value::Map(map) = &mut value {
        validate_group(map, &schema.fields, &mut cx);
    }
    ValidationOutcome {
        value,
        errors: cx.errors,
    }
}

struct ValidateContext {
    errors: ErrorMap,
    /// Paths that already failed coercion; constraint checks are skipped
    /// for them since the leaf never reached its native type.
    failed: AHashSet<FieldPath>,
    path: Vec<PathSegment>,
}

impl ValidateContext {
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

    fn coercion_failed_here(&self) -> bool {
        self.failed.contains(&FieldPath(self.path.clone()))
    }
}

fn validate_group(map: &mut FieldMap, fields: &[FieldSpec], cx: &mut ValidateContext) {
    for spec in fields {
        let slot = map
            .0
            .entry(spec.name.clone())
            .or_insert(Value::Absent);
        cx.with_path(PathSegment::Field(spec.name.clone()), |cx| {
            validate_field(slot, spec, cx);
        });
    }
}

fn validate_field(value: &mut Value, spec: &FieldSpec, cx: &mut ValidateContext) {
    if is_empty_submission(value) {
        if spec.required {
            cx.record(Violation::RequiredMissing);
        } else {
            *value = empty_value(spec);
        }
        return;
    }

    if cx.coercion_failed_here() {
        return;
    }

    match &spec.kind {
        FieldKind::Object(fields) => {
            if let Value::Map(map) = value {
                validate_group(map, fields, cx);
            }
        }
        FieldKind::List(list) => {
            if let Value::List(Items(items)) = value {
                check_cardinality(items.len(), &spec.constraints, cx);
                for (index, item) in items.iter_mut().enumerate() {
                    cx.with_path(PathSegment::Index(index), |cx| {
                        if let Value::Map(map) = item {
                            validate_group(map, &list.item_fields, cx);
                        }
                    });
                }
            }
        }
        _ if spec.is_multi_valued() => {
            if let Value::List(Items(items)) = value {
                check_cardinality(items.len(), &spec.constraints, cx);
            }
        }
        _ => {
            check_scalar(value, spec, cx);
        }
    }
}

fn check_scalar(value: &Value, spec: &FieldSpec, cx: &mut ValidateContext) {
    if let Value::Str(s) = value {
        if let Some((min, max)) = spec.constraints.length {
            let actual = s.chars().count();
            if let Some(min) = min
                && actual < min
            {
                cx.record(Violation::LengthViolation {
                    min: Some(min),
                    max,
                    actual,
                });
            }
            if let Some(max) = max
                && actual > max
            {
                cx.record(Violation::LengthViolation {
                    min,
                    max: Some(max),
                    actual,
                });
            }
        }
        check_pattern(s, spec, cx);
    }

    let numeric = match value {
        Value::I64(n) => Some(*n as f64),
        Value::F64(n) => Some(*n),
        _ => None,
    };
    if let Some(actual) = numeric
        && let Some((min, max)) = spec.constraints.range
    {
        if let Some(min) = min
            && actual < min
        {
            cx.record(Violation::RangeViolation {
                min: Some(min),
                max,
                actual,
            });
        }
        if let Some(max) = max
            && actual > max
        {
            cx.record(Violation::RangeViolation {
                min,
                max: Some(max),
                actual,
            });
        }
    }
}

fn check_pattern(s: &str, spec: &FieldSpec, cx: &mut ValidateContext) {
    let pattern = match (&spec.constraints.pattern, &spec.kind) {
        (Some(pattern), _) => pattern.as_str(),
        (None, FieldKind::Email) => EMAIL_PATTERN,
        _ => return,
    };
    match Regex::new(pattern) {
        Ok(re) => {
            if !re.is_match(s) {
                cx.record(Violation::PatternViolation {
                    pattern: pattern.to_string(),
                });
            }
        }
        Err(_) => {
            cx.record(Violation::InvalidPattern {
                pattern: pattern.to_string(),
            });
        }
    }
}

fn check_cardinality(actual: usize, constraints: &Constraints, cx: &mut ValidateContext) {
    if let Some(min) = constraints.min_items
        && actual < min
    {
        cx.record(Violation::CardinalityViolation {
            min: Some(min),
            max: constraints.max_items,
            actual,
        });
    }
    if let Some(max) = constraints.max_items
        && actual > max
    {
        cx.record(Violation::CardinalityViolation {
            min: constraints.min_items,
            max: Some(max),
            actual,
        });
    }
}

/// Whether a coerced value counts as "nothing was submitted" for the
/// required check. `false` is a real boolean submission, never empty.
fn is_empty_submission(value: &Value) -> bool {
    match value {
        Value::Absent => true,
        Value::Str(s) => s.is_empty(),
        Value::List(Items(items)) => items.is_empty(),
        _ => false,
    }
}

/// The defined empty value a non-required absent field settles on: empty
/// string for text-like kinds, empty list for repeating kinds, false for
/// booleans. Kinds with no natural empty (numbers, dates, files) keep the
/// absence marker, which serializes as null.
fn empty_value(spec: &FieldSpec) -> Value {
    match &spec.kind {
        FieldKind::Checkbox if !spec.is_multi_valued() => Value::Bool(false),
        FieldKind::List(_) | FieldKind::MultiSelect => Value::List(Items::default()),
        FieldKind::Checkbox => Value::List(Items::default()),
        FieldKind::Object(fields) => {
            let mut map = FieldMap::default();
            for field in fields {
                map.0.insert(field.name.clone(), empty_value(field));
            }
            Value::Map(map)
        }
        FieldKind::Number(_) | FieldKind::Range(_) => Value::Absent,
        FieldKind::Date | FieldKind::DateTime | FieldKind::Time | FieldKind::File => Value::Absent,
        _ => Value::Str(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::coerce;
    use forma_schema::{FieldSpecBuilder, NumberKind};
    use indexmap::IndexMap;

    fn raw_map(pairs: Vec<(&str, Value)>) -> Value {
        Value::Map(FieldMap(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<IndexMap<_, _>>(),
        ))
    }

    fn login_schema() -> FormSchema {
        FormSchema::new(
            "login",
            vec![
                FieldSpecBuilder::new("username", FieldKind::Text)
                    .required()
                    .length(Some(3), Some(50))
                    .build(),
                FieldSpecBuilder::new("password", FieldKind::Password)
                    .required()
                    .build(),
            ],
        )
        .unwrap()
    }

    fn run(schema: &FormSchema, raw: Value) -> ValidationOutcome {
        let (typed, coercion_errors) = coerce(&raw, schema);
        validate(typed, schema, coercion_errors)
    }

    #[test]
    fn empty_required_field_is_reported() {
        let outcome = run(
            &login_schema(),
            raw_map(vec![
                ("username", Value::from("")),
                ("password", Value::from("secret")),
            ]),
        );
        assert!(!outcome.is_valid());
        assert_eq!(
            outcome.errors.messages(&"username".parse().unwrap()),
            Some(["required".to_string()].as_slice())
        );
        assert!(!outcome.errors.contains(&"password".parse().unwrap()));
    }

    #[test]
    fn required_failure_still_checks_other_fields() {
        let outcome = run(&login_schema(), raw_map(vec![]));
        assert_eq!(outcome.errors.0.len(), 2);
    }

    #[test]
    fn length_bounds_are_enforced() {
        let outcome = run(
            &login_schema(),
            raw_map(vec![
                ("username", Value::from("ab")),
                ("password", Value::from("secret")),
            ]),
        );
        assert_eq!(
            outcome.errors.first_message(&"username".parse().unwrap()),
            Some("must be at least 3 characters, but got 2")
        );
    }

    #[test]
    fn absent_non_required_fields_take_their_empty_value() {
        let schema = FormSchema::new(
            "prefs",
            vec![
                FieldSpecBuilder::new("nickname", FieldKind::Text).build(),
                FieldSpecBuilder::new("subscribed", FieldKind::Checkbox).build(),
                FieldSpecBuilder::new("tags", FieldKind::MultiSelect)
                    .plain_options(["a", "b"])
                    .build(),
            ],
        )
        .unwrap();

        let outcome = run(&schema, raw_map(vec![]));
        assert!(outcome.is_valid());
        assert_eq!(outcome.value.at(&"nickname".parse().unwrap()), Some(&Value::from("")));
        assert_eq!(
            outcome.value.at(&"subscribed".parse().unwrap()),
            Some(&Value::Bool(false))
        );
        assert_eq!(
            outcome.value.at(&"tags".parse().unwrap()),
            Some(&Value::List(Items::default()))
        );
    }

    #[test]
    fn range_violations_name_the_bounds() {
        let schema = FormSchema::new(
            "reg",
            vec![
                FieldSpecBuilder::new("age", FieldKind::Number(NumberKind::Integer))
                    .range(Some(13.0), Some(120.0))
                    .build(),
            ],
        )
        .unwrap();

        let outcome = run(&schema, raw_map(vec![("age", Value::from("7"))]));
        assert_eq!(
            outcome.errors.first_message(&"age".parse().unwrap()),
            Some("must be between 13 and 120, but got 7")
        );
    }

    #[test]
    fn coercion_failures_suppress_constraint_checks() {
        let schema = FormSchema::new(
            "reg",
            vec![
                FieldSpecBuilder::new("age", FieldKind::Number(NumberKind::Integer))
                    .range(Some(13.0), Some(120.0))
                    .build(),
            ],
        )
        .unwrap();

        let outcome = run(&schema, raw_map(vec![("age", Value::from("seven"))]));
        let messages = outcome.errors.messages(&"age".parse().unwrap()).unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("expected integer"));
    }

    #[test]
    fn email_kind_validates_format_by_default() {
        let schema = FormSchema::new(
            "contact",
            vec![FieldSpecBuilder::new("email", FieldKind::Email).required().build()],
        )
        .unwrap();

        let outcome = run(&schema, raw_map(vec![("email", Value::from("bad"))]));
        assert!(!outcome.is_valid());

        let outcome = run(&schema, raw_map(vec![("email", Value::from("a@b.cc"))]));
        assert!(outcome.is_valid());
    }

    #[test]
    fn list_items_report_errors_under_their_index() {
        let schema = FormSchema::new(
            "pets",
            vec![FieldSpecBuilder::list(
                "pets",
                vec![FieldSpecBuilder::new("name", FieldKind::Text).required().build()],
            )
            .min_items(1)
            .build()],
        )
        .unwrap();

        let raw = raw_map(vec![(
            "pets",
            Value::List(Items(vec![
                raw_map(vec![("name", Value::from("Fido"))]),
                raw_map(vec![("name", Value::from(""))]),
            ])),
        )]);
        let outcome = run(&schema, raw);
        assert_eq!(
            outcome.errors.messages(&"pets[1].name".parse().unwrap()),
            Some(["required".to_string()].as_slice())
        );
        assert!(!outcome.errors.contains(&"pets[0].name".parse().unwrap()));
    }

    #[test]
    fn list_cardinality_is_checked() {
        let schema = FormSchema::new(
            "pets",
            vec![FieldSpecBuilder::list(
                "pets",
                vec![FieldSpecBuilder::new("name", FieldKind::Text).build()],
            )
            .required()
            .min_items(2)
            .build()],
        )
        .unwrap();

        let raw = raw_map(vec![(
            "pets",
            Value::List(Items(vec![raw_map(vec![("name", Value::from("Solo"))])])),
        )]);
        let outcome = run(&schema, raw);
        assert_eq!(
            outcome.errors.first_message(&"pets".parse().unwrap()),
            Some("must have at least 2 items, but has 1")
        );
    }

    #[test]
    fn independent_problems_are_all_reported() {
        let schema = FormSchema::new(
            "multi",
            vec![
                FieldSpecBuilder::new("a", FieldKind::Text).required().build(),
                FieldSpecBuilder::new("b", FieldKind::Number(NumberKind::Integer)).build(),
                FieldSpecBuilder::new("c", FieldKind::Email).build(),
            ],
        )
        .unwrap();

        let outcome = run(
            &schema,
            raw_map(vec![
                ("b", Value::from("NaN-ish")),
                ("c", Value::from("nope")),
            ]),
        );
        assert_eq!(outcome.errors.0.len(), 3);
    }

    #[test]
    fn success_returns_the_completed_tree() {
        let outcome = run(
            &login_schema(),
            raw_map(vec![
                ("username", Value::from("alex")),
                ("password", Value::from("secret")),
            ]),
        );
        let value = outcome.into_result().unwrap();
        assert_eq!(value.at(&"username".parse().unwrap()), Some(&Value::from("alex")));
    }
}
