//! Structured schema metadata for JSON endpoints.
//!
//! The output follows JSON Schema conventions (`type`, `properties`,
//! `required`, constraint keywords) with an extra `inputType` keyword
//! carrying the form-control kind, so API consumers can rebuild a form
//! without the HTML renderer.

use serde_json::{Map, Value, json};

use crate::form::FormSchema;
use crate::schema::{FieldKind, FieldSpec, NumberKind};

/// Describe a schema as a JSON object.
pub fn schema_description(schema: &FormSchema) -> Value {
    let mut doc = describe_fields(&schema.fields);
    doc.insert("title".to_string(), json!(schema.name));
    if !schema.sections.is_empty() {
        let sections: Vec<Value> = schema
            .sections
            .iter()
            .map(|s| {
                json!({
                    "title": s.title,
                    "collapsible": s.collapsible,
                    "fields": s.fields,
                })
            })
            .collect();
        doc.insert("sections".to_string(), Value::Array(sections));
    }
    Value::Object(doc)
}

fn describe_fields(fields: &[FieldSpec]) -> Map<String, Value> {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for field in fields {
        if field.required {
            required.push(json!(field.name));
        }
        properties.insert(field.name.clone(), describe_field(field));
    }

    let mut doc = Map::new();
    doc.insert("type".to_string(), json!("object"));
    doc.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        doc.insert("required".to_string(), Value::Array(required));
    }
    doc
}

fn describe_field(field: &FieldSpec) -> Value {
    let mut doc = Map::new();
    doc.insert("type".to_string(), json!(json_type(&field.kind)));
    doc.insert("inputType".to_string(), json!(field.kind.name()));

    if let Some(label) = &field.label {
        doc.insert("title".to_string(), json!(label));
    }
    if let Some(help) = &field.help_text {
        doc.insert("description".to_string(), json!(help));
    }
    if let Some(default) = &field.default {
        doc.insert("default".to_string(), json!(default));
    }

    if let Some((min, max)) = field.constraints.length {
        if let Some(min) = min {
            doc.insert("minLength".to_string(), json!(min));
        }
        if let Some(max) = max {
            doc.insert("maxLength".to_string(), json!(max));
        }
    }
    if let Some((min, max)) = field.constraints.range {
        if let Some(min) = min {
            doc.insert("minimum".to_string(), json!(min));
        }
        if let Some(max) = max {
            doc.insert("maximum".to_string(), json!(max));
        }
    }
    if let Some(pattern) = &field.constraints.pattern {
        doc.insert("pattern".to_string(), json!(pattern));
    }

    let choices: Vec<&str> = field.option_values().collect();
    match &field.kind {
        FieldKind::Select | FieldKind::Radio if !choices.is_empty() => {
            doc.insert("enum".to_string(), json!(choices));
        }
        FieldKind::MultiSelect | FieldKind::Checkbox if !choices.is_empty() => {
            doc.insert("items".to_string(), json!({"type": "string", "enum": choices}));
        }
        FieldKind::Object(fields) => {
            let nested = describe_fields(fields);
            for (key, value) in nested {
                // keeps the outer type/inputType keywords authoritative
                if key != "type" {
                    doc.insert(key, value);
                }
            }
        }
        FieldKind::List(list) => {
            doc.insert(
                "items".to_string(),
                Value::Object(describe_fields(&list.item_fields)),
            );
            if let Some(min) = field.constraints.min_items {
                doc.insert("minItems".to_string(), json!(min));
            }
            if let Some(max) = field.constraints.max_items {
                doc.insert("maxItems".to_string(), json!(max));
            }
        }
        _ => {}
    }

    Value::Object(doc)
}

fn json_type(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Number(NumberKind::Integer) | FieldKind::Range(NumberKind::Integer) => "integer",
        FieldKind::Number(NumberKind::Float) | FieldKind::Range(NumberKind::Float) => "number",
        FieldKind::Checkbox => "boolean",
        FieldKind::MultiSelect => "array",
        FieldKind::Object(_) => "object",
        FieldKind::List(_) => "array",
        _ => "string",
    }
}
