//! Fluent construction of field specs.

use crate::schema::{EnumOption, FieldKind, FieldSpec, ListSpec, ListUi, NumberKind};

/// Builder for [`FieldSpec`] instances.
///
/// ```
/// use forma_schema::{FieldKind, FieldSpecBuilder, NumberKind};
///
/// let age = FieldSpecBuilder::new("age", FieldKind::Number(NumberKind::Integer))
///     .label("Age")
///     .range(Some(13.0), Some(120.0))
///     .help_text("Your age in years")
///     .build();
/// assert_eq!(age.name, "age");
/// ```
#[derive(Debug, Clone)]
pub struct FieldSpecBuilder {
    spec: FieldSpec,
}

impl FieldSpecBuilder {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            spec: FieldSpec::new(name, kind),
        }
    }

    /// Shorthand for a list field built from its item specs.
    pub fn list(name: impl Into<String>, item_fields: Vec<FieldSpec>) -> Self {
        Self::new(
            name,
            FieldKind::List(ListSpec {
                item_fields,
                ui: ListUi::default(),
            }),
        )
    }

    /// Shorthand for an object field built from its nested specs.
    pub fn object(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self::new(name, FieldKind::Object(fields))
    }

    pub fn required(mut self) -> Self {
        self.spec.required = true;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.spec.label = Some(label.into());
        self
    }

    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.spec.help_text = Some(text.into());
        self
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.spec.placeholder = Some(text.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.spec.icon = Some(icon.into());
        self
    }

    /// Default value in wire form, coerced exactly like a submission.
    pub fn default_value(mut self, raw: impl Into<String>) -> Self {
        self.spec.default = Some(raw.into());
        self
    }

    pub fn length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.spec.constraints.length = Some((min, max));
        self
    }

    pub fn range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.spec.constraints.range = Some((min, max));
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.spec.constraints.pattern = Some(pattern.into());
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = EnumOption>) -> Self {
        self.spec.constraints.options = options.into_iter().collect();
        self
    }

    /// Declare choices where each label equals its value.
    pub fn plain_options(mut self, values: impl IntoIterator<Item = &'static str>) -> Self {
        self.spec.constraints.options = values.into_iter().map(EnumOption::plain).collect();
        self
    }

    pub fn min_items(mut self, min: usize) -> Self {
        self.spec.constraints.min_items = Some(min);
        self
    }

    pub fn max_items(mut self, max: usize) -> Self {
        self.spec.constraints.max_items = Some(max);
        self
    }

    pub fn list_ui(mut self, ui: ListUi) -> Self {
        if let FieldKind::List(list) = &mut self.spec.kind {
            list.ui = ui;
        }
        self
    }

    pub fn build(self) -> FieldSpec {
        self.spec
    }
}

/// Shorthand constraint-free constructors used all over test and demo code.
pub fn text(name: impl Into<String>) -> FieldSpecBuilder {
    FieldSpecBuilder::new(name, FieldKind::Text)
}

pub fn number(name: impl Into<String>, kind: NumberKind) -> FieldSpecBuilder {
    FieldSpecBuilder::new(name, FieldKind::Number(kind))
}

pub fn checkbox(name: impl Into<String>) -> FieldSpecBuilder {
    FieldSpecBuilder::new(name, FieldKind::Checkbox)
}

pub fn select(
    name: impl Into<String>,
    options: impl IntoIterator<Item = EnumOption>,
) -> FieldSpecBuilder {
    FieldSpecBuilder::new(name, FieldKind::Select).options(options)
}
