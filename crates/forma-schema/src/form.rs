//! Whole-form schema with section grouping and structural invariants.

use ahash::AHashSet;
use thiserror::Error;

use forma_value::{FieldPath, PathSegment};

use crate::schema::{FieldKind, FieldSpec};

/// A named group of fields rendered together, optionally collapsible.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub collapsible: bool,
    /// Initially collapsed; only meaningful when `collapsible` is set.
    pub collapsed: bool,
    /// Field names owned by this section, in rendering order.
    pub fields: Vec<String>,
}

impl Section {
    pub fn new(title: impl Into<String>, fields: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            title: title.into(),
            description: None,
            icon: None,
            collapsible: false,
            collapsed: false,
            fields: fields.into_iter().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("duplicate field name '{name}' in scope '{scope}'")]
    DuplicateField { name: String, scope: String },
    #[error("section '{section}' references unknown field '{name}'")]
    UnknownSectionField { section: String, name: String },
    #[error("field '{name}' belongs to more than one section")]
    FieldInMultipleSections { name: String },
    #[error("field '{name}' does not belong to any section")]
    FieldOutsideSections { name: String },
    #[error("list field '{name}' declares no item fields")]
    EmptyListItemSchema { name: String },
    #[error("object field '{name}' declares no nested fields")]
    EmptyObjectSchema { name: String },
}

/// Ordered, immutable description of one form. Field order is rendering
/// order. Safe to share across threads once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    pub name: String,
    pub fields: Vec<FieldSpec>,
    /// When non-empty, every top-level field belongs to exactly one section.
    pub sections: Vec<Section>,
}

impl FormSchema {
    /// Build a schema without sections, checking structural invariants.
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        Self::with_sections(name, fields, Vec::new())
    }

    /// Build a schema partitioned into sections.
    pub fn with_sections(
        name: impl Into<String>,
        fields: Vec<FieldSpec>,
        sections: Vec<Section>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        check_scope(&fields, &name)?;

        if !sections.is_empty() {
            let known: AHashSet<&str> = fields.iter().map(|f| f.name.as_str()).collect();
            let mut assigned: AHashSet<&str> = AHashSet::new();
            for section in &sections {
                for field_name in &section.fields {
                    if !known.contains(field_name.as_str()) {
                        return Err(SchemaError::UnknownSectionField {
                            section: section.title.clone(),
                            name: field_name.clone(),
                        });
                    }
                    if !assigned.insert(field_name.as_str()) {
                        return Err(SchemaError::FieldInMultipleSections {
                            name: field_name.clone(),
                        });
                    }
                }
            }
            for field in &fields {
                if !assigned.contains(field.name.as_str()) {
                    return Err(SchemaError::FieldOutsideSections {
                        name: field.name.clone(),
                    });
                }
            }
        }

        Ok(Self { name, fields, sections })
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Resolve the field spec a path addresses, descending through object
    /// and list kinds. Index segments inside a list resolve to the item
    /// scope; a path pointing at a list *item* (not one of its fields)
    /// yields `None` since items have no spec of their own.
    pub fn spec_at(&self, path: &FieldPath) -> Option<&FieldSpec> {
        let mut fields: &[FieldSpec] = &self.fields;
        let mut current: Option<&FieldSpec> = None;

        let mut segments = path.0.iter().peekable();
        while let Some(segment) = segments.next() {
            match segment {
                PathSegment::Field(name) => {
                    let spec = fields.iter().find(|f| &f.name == name)?;
                    current = Some(spec);
                    match &spec.kind {
                        FieldKind::Object(nested) => fields = nested,
                        FieldKind::List(list) => {
                            // Consume the index addressing one item.
                            if let Some(PathSegment::Index(_)) = segments.peek() {
                                segments.next();
                                fields = &list.item_fields;
                            }
                        }
                        _ => fields = &[],
                    }
                }
                PathSegment::Index(_) => return None,
            }
        }
        current
    }
}

fn check_scope(fields: &[FieldSpec], scope: &str) -> Result<(), SchemaError> {
    let mut seen: AHashSet<&str> = AHashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                name: field.name.clone(),
                scope: scope.to_string(),
            });
        }
        match &field.kind {
            FieldKind::Object(nested) => {
                if nested.is_empty() {
                    return Err(SchemaError::EmptyObjectSchema {
                        name: field.name.clone(),
                    });
                }
                check_scope(nested, &field.name)?;
            }
            FieldKind::List(list) => {
                if list.item_fields.is_empty() {
                    return Err(SchemaError::EmptyListItemSchema {
                        name: field.name.clone(),
                    });
                }
                check_scope(&list.item_fields, &field.name)?;
            }
            _ => {}
        }
    }
    Ok(())
}
