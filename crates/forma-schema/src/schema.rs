//! Field-level schema types.

/// Parse target for numeric field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Integer,
    Float,
}

/// The semantic type of one form control. The kind determines both the
/// coercion rule applied to submitted values and the markup template used
/// when rendering; adding a kind is a one-place change in each.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number(NumberKind),
    Range(NumberKind),
    Color,
    Select,
    Radio,
    /// Single boolean checkbox when no options are declared; a multi-valued
    /// checkbox group when options are present.
    Checkbox,
    MultiSelect,
    Date,
    DateTime,
    Time,
    File,
    Hidden,
    Url,
    Tel,
    TextArea,
    /// Nested group of fields rendered and validated as one unit.
    Object(Vec<FieldSpec>),
    /// Repeatable group of fields; each item follows the same sub-schema.
    List(ListSpec),
}

impl FieldKind {
    /// Kind name as used in schema descriptions and mismatch messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Number(_) => "number",
            FieldKind::Range(_) => "range",
            FieldKind::Color => "color",
            FieldKind::Select => "select",
            FieldKind::Radio => "radio",
            FieldKind::Checkbox => "checkbox",
            FieldKind::MultiSelect => "multiselect",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime",
            FieldKind::Time => "time",
            FieldKind::File => "file",
            FieldKind::Hidden => "hidden",
            FieldKind::Url => "url",
            FieldKind::Tel => "tel",
            FieldKind::TextArea => "textarea",
            FieldKind::Object(_) => "object",
            FieldKind::List(_) => "list",
        }
    }

    /// Whether values pass through coercion as trimmed strings.
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            FieldKind::Text
                | FieldKind::Email
                | FieldKind::Password
                | FieldKind::Color
                | FieldKind::Hidden
                | FieldKind::Url
                | FieldKind::Tel
                | FieldKind::TextArea
        )
    }
}

/// Sub-schema and rendering affordances for a list field.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSpec {
    pub item_fields: Vec<FieldSpec>,
    pub ui: ListUi,
}

/// Rendering affordances for repeatable list blocks. No pipeline
/// semantics; the renderer is the only consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct ListUi {
    pub add_button_text: String,
    pub remove_button_text: String,
    pub collapsible_items: bool,
    pub items_expanded: bool,
}

impl Default for ListUi {
    fn default() -> Self {
        Self {
            add_button_text: "Add item".to_string(),
            remove_button_text: "Remove".to_string(),
            collapsible_items: false,
            items_expanded: true,
        }
    }
}

/// One selectable choice: `value` is what the wire carries and what
/// membership checks use, `label` is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumOption {
    pub value: String,
    pub label: String,
}

impl EnumOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// An option whose label is its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Kind-specific constraints. Bounds are `(min, max)` pairs where either
/// side may be open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    /// String length bounds in characters
    pub length: Option<(Option<usize>, Option<usize>)>,
    /// Inclusive numeric bounds
    pub range: Option<(Option<f64>, Option<f64>)>,
    /// Regex the whole value must match
    pub pattern: Option<String>,
    /// Declared choices for select/radio/checkbox-group/multiselect kinds
    pub options: Vec<EnumOption>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

/// One schema field: identity, kind, constraints and presentation hints.
///
/// Immutable once built; shared by every request that renders or validates
/// the owning form.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub constraints: Constraints,
    pub label: Option<String>,
    pub help_text: Option<String>,
    pub placeholder: Option<String>,
    pub icon: Option<String>,
    /// Raw default in wire form, coerced exactly like a submitted value.
    pub default: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            constraints: Constraints::default(),
            label: None,
            help_text: None,
            placeholder: None,
            icon: None,
            default: None,
        }
    }

    /// Label shown next to the control; falls back to the field name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Whether submissions for this field always decode to a list node,
    /// regardless of how many raw values arrived.
    pub fn is_multi_valued(&self) -> bool {
        match self.kind {
            FieldKind::MultiSelect => true,
            FieldKind::Checkbox => !self.constraints.options.is_empty(),
            _ => false,
        }
    }

    pub fn option_values(&self) -> impl Iterator<Item = &str> {
        self.constraints.options.iter().map(|o| o.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_with_options_is_multi_valued() {
        let mut spec = FieldSpec::new("tags", FieldKind::Checkbox);
        assert!(!spec.is_multi_valued());
        spec.constraints.options.push(EnumOption::plain("a"));
        assert!(spec.is_multi_valued());
    }

    #[test]
    fn display_label_falls_back_to_name() {
        let mut spec = FieldSpec::new("username", FieldKind::Text);
        assert_eq!(spec.display_label(), "username");
        spec.label = Some("Username".to_string());
        assert_eq!(spec.display_label(), "Username");
    }
}
