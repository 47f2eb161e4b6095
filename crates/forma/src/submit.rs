//! The submission orchestrator and its wire shapes.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::json;
use tracing::debug;

use forma_codec::decode;
use forma_render::{AssetMode, RenderContext, Theme, render};
use forma_schema::FormSchema;
use forma_validate::{coerce, validate};
use forma_value::{ErrorMap, FieldPath, Value, to_json};

/// Outcome of processing one submission: either a fully typed value tree
/// or a complete error map, never a mix.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Success { value: Value },
    Failure { errors: ErrorMap },
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            SubmissionResult::Success { value } => Some(value),
            SubmissionResult::Failure { .. } => None,
        }
    }

    pub fn errors(&self) -> Option<&ErrorMap> {
        match self {
            SubmissionResult::Success { .. } => None,
            SubmissionResult::Failure { errors } => Some(errors),
        }
    }

    /// The exact JSON shape handed to API callers:
    /// `{"success": true, "value": ...}` or
    /// `{"success": false, "errors": {"path": ["message", ...]}}`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SubmissionResult::Success { value } => {
                json!({"success": true, "value": to_json(value)})
            }
            SubmissionResult::Failure { errors } => {
                json!({"success": false, "errors": errors_to_json(errors)})
            }
        }
    }
}

impl Serialize for SubmissionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            SubmissionResult::Success { value } => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("value", &to_json(value))?;
            }
            SubmissionResult::Failure { errors } => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("errors", &errors_to_json(errors))?;
            }
        }
        map.end()
    }
}

fn errors_to_json(errors: &ErrorMap) -> serde_json::Value {
    let mut object = serde_json::Map::new();
    for (path, messages) in &errors.0 {
        object.insert(path.to_string(), json!(messages));
    }
    serde_json::Value::Object(object)
}

/// Process a flat submission against a schema: decode, coerce, validate.
///
/// A structural decode conflict aborts immediately with a single
/// unattributed error under the root path, since such a submission has no
/// readable tree to walk. Everything else runs coercion and validation to
/// completion so the caller sees all field problems at once.
pub fn submit(schema: &FormSchema, entries: &[(String, String)]) -> SubmissionResult {
    let raw = match decode(entries, schema) {
        Ok(raw) => raw,
        Err(err) => {
            debug!(form = %schema.name, error = %err, "submission failed to decode");
            let mut errors = ErrorMap::default();
            errors.push(FieldPath::root(), err.to_string());
            return SubmissionResult::Failure { errors };
        }
    };

    let (typed, coercion_errors) = coerce(&raw, schema);
    match validate(typed, schema, coercion_errors).into_result() {
        Ok(value) => SubmissionResult::Success { value },
        Err(errors) => SubmissionResult::Failure { errors },
    }
}

/// Render a form, optionally pre-populated and error-annotated.
///
/// `include_assets` and `asset_mode` are independent: turning assets off
/// suppresses the prologue/epilogue no matter which mode is selected.
pub fn render_form(
    schema: &FormSchema,
    theme: Theme,
    asset_mode: AssetMode,
    include_assets: bool,
    values: Option<&Value>,
    errors: Option<&ErrorMap>,
) -> String {
    let mut ctx = RenderContext::new(theme).asset_mode(asset_mode);
    if !include_assets {
        ctx = ctx.without_assets();
    }
    if let Some(values) = values {
        ctx = ctx.values(values);
    }
    if let Some(errors) = errors {
        ctx = ctx.errors(errors);
    }
    render(schema, &ctx)
}
