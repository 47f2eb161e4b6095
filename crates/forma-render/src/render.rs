use tracing::debug;

use forma_schema::{FieldKind, FieldSpec, FormSchema, NumberKind, Section};
use forma_value::{FieldPath, PathSegment, Value};

use crate::assets;
use crate::context::{AssetMode, RenderContext, Theme};
use crate::escape::escape_html;

/// Render a schema as an HTML fragment.
///
/// Output is fully determined by the inputs. The asset mode only changes
/// the prologue/epilogue around the controls; the control markup itself is
/// identical across modes.
pub fn render(schema: &FormSchema, ctx: &RenderContext<'_>) -> String {
    debug!(form = %schema.name, theme = ctx.theme.name(), "rendering form");

    let mut out = String::new();
    if ctx.include_assets {
        push_prologue(&mut out, ctx);
    }

    match &ctx.submit_url {
        Some(url) => {
            out.push_str(&format!(
                "<form class=\"sf-form\" method=\"post\" action=\"{}\">\n",
                escape_html(url)
            ));
        }
        None => out.push_str("<div class=\"sf-form\">\n"),
    }

    if schema.sections.is_empty() {
        for field in &schema.fields {
            render_field(&mut out, field, &FieldPath::root(), ctx);
        }
    } else {
        for section in &schema.sections {
            render_section(&mut out, schema, section, ctx);
        }
    }

    match &ctx.submit_url {
        Some(_) => {
            let classes = theme_classes(ctx.theme);
            out.push_str(&format!(
                "<button type=\"submit\" class=\"{}\">Submit</button>\n</form>\n",
                classes.button
            ));
        }
        None => out.push_str("</div>\n"),
    }

    if ctx.include_assets {
        push_epilogue(&mut out, ctx);
    }
    out
}

struct ThemeClasses {
    group: &'static str,
    label: &'static str,
    control: &'static str,
    select: &'static str,
    check: &'static str,
    check_input: &'static str,
    check_label: &'static str,
    invalid: &'static str,
    error: &'static str,
    help: &'static str,
    button: &'static str,
    secondary_button: &'static str,
    section: &'static str,
    section_title: &'static str,
}

const BOOTSTRAP: ThemeClasses = ThemeClasses {
    group: "mb-3",
    label: "form-label",
    control: "form-control",
    select: "form-select",
    check: "form-check",
    check_input: "form-check-input",
    check_label: "form-check-label",
    invalid: "is-invalid",
    error: "invalid-feedback",
    help: "form-text",
    button: "btn btn-primary",
    secondary_button: "btn btn-outline-secondary btn-sm",
    section: "card card-body mb-4",
    section_title: "card-title",
};

const MATERIAL: ThemeClasses = ThemeClasses {
    group: "md-field",
    label: "md-label",
    control: "md-input",
    select: "md-select",
    check: "md-check",
    check_input: "md-check-input",
    check_label: "md-check-label",
    invalid: "md-invalid",
    error: "md-error",
    help: "md-help",
    button: "md-button",
    secondary_button: "md-button md-button-outlined",
    section: "md-section",
    section_title: "md-section-title",
};

fn theme_classes(theme: Theme) -> &'static ThemeClasses {
    match theme {
        Theme::Bootstrap => &BOOTSTRAP,
        Theme::Material => &MATERIAL,
    }
}

fn push_prologue(out: &mut String, ctx: &RenderContext<'_>) {
    match (ctx.asset_mode, ctx.theme) {
        (AssetMode::Vendored, Theme::Bootstrap) => {
            out.push_str(&format!("<style>{}</style>\n", assets::BOOTSTRAP_VENDORED_CSS));
        }
        (AssetMode::Vendored, Theme::Material) => {
            out.push_str(&format!("<style>{}</style>\n", assets::MATERIAL_VENDORED_CSS));
        }
        (AssetMode::Cdn, Theme::Bootstrap) => {
            out.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\">\n<link rel=\"stylesheet\" href=\"{}\">\n",
                assets::BOOTSTRAP_CDN_CSS,
                assets::BOOTSTRAP_ICONS_CDN_CSS
            ));
        }
        (AssetMode::Cdn, Theme::Material) => {
            out.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\">\n<link rel=\"stylesheet\" href=\"{}\">\n",
                assets::MATERIAL_CDN_CSS,
                assets::MATERIAL_ICONS_CDN_CSS
            ));
        }
        (AssetMode::None, _) => {}
    }
}

fn push_epilogue(out: &mut String, ctx: &RenderContext<'_>) {
    match (ctx.asset_mode, ctx.theme) {
        (AssetMode::Vendored, Theme::Bootstrap) => {
            out.push_str(&format!("<script>{}</script>\n", assets::BOOTSTRAP_VENDORED_JS));
        }
        (AssetMode::Vendored, Theme::Material) => {
            out.push_str(&format!("<script>{}</script>\n", assets::MATERIAL_VENDORED_JS));
        }
        (AssetMode::Cdn, Theme::Bootstrap) => {
            out.push_str(&format!("<script src=\"{}\"></script>\n", assets::BOOTSTRAP_CDN_JS));
        }
        (AssetMode::Cdn, Theme::Material) => {
            out.push_str(&format!("<script src=\"{}\"></script>\n", assets::MATERIAL_CDN_JS));
        }
        (AssetMode::None, _) => {}
    }
}

fn render_section(out: &mut String, schema: &FormSchema, section: &Section, ctx: &RenderContext<'_>) {
    let classes = theme_classes(ctx.theme);
    out.push_str(&format!("<section class=\"{}\">\n", classes.section));

    let title = format!(
        "{}{}",
        icon_markup(section.icon.as_deref(), ctx.theme),
        escape_html(&section.title)
    );
    if section.collapsible {
        let open = if section.collapsed { "" } else { " open" };
        out.push_str(&format!(
            "<details{open}>\n<summary class=\"{}\">{title}</summary>\n",
            classes.section_title
        ));
    } else {
        out.push_str(&format!("<h3 class=\"{}\">{title}</h3>\n", classes.section_title));
    }
    if let Some(description) = &section.description {
        out.push_str(&format!(
            "<p class=\"{}\">{}</p>\n",
            classes.help,
            escape_html(description)
        ));
    }

    for name in &section.fields {
        if let Some(field) = schema.field(name) {
            render_field(out, field, &FieldPath::root(), ctx);
        }
    }

    if section.collapsible {
        out.push_str("</details>\n");
    }
    out.push_str("</section>\n");
}

fn render_field(out: &mut String, field: &FieldSpec, parent: &FieldPath, ctx: &RenderContext<'_>) {
    let path = parent.child(PathSegment::Field(field.name.clone()));
    match &field.kind {
        FieldKind::Object(fields) => {
            out.push_str(&format!(
                "<fieldset class=\"sf-group\" data-field=\"{}\">\n<legend>{}</legend>\n",
                escape_html(&path.to_string()),
                escape_html(field.display_label())
            ));
            for nested in fields {
                render_field(out, nested, &path, ctx);
            }
            out.push_str("</fieldset>\n");
        }
        FieldKind::List(_) => render_list(out, field, &path, ctx),
        FieldKind::Hidden => {
            let value = current_string(ctx, &path).unwrap_or_default();
            out.push_str(&format!(
                "<input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
                escape_html(&path.to_string()),
                escape_html(&value)
            ));
        }
        _ => render_control(out, field, &path, ctx),
    }
}

fn render_list(out: &mut String, field: &FieldSpec, path: &FieldPath, ctx: &RenderContext<'_>) {
    let FieldKind::List(list) = &field.kind else {
        return;
    };
    let classes = theme_classes(ctx.theme);
    let existing = ctx
        .values
        .and_then(|v| v.at(path))
        .and_then(Value::as_list)
        .map(|items| items.0.len())
        .unwrap_or(0);
    // always render at least one (empty) item block
    let count = existing.max(1);

    out.push_str(&format!(
        "<div class=\"sf-list\" data-list=\"{}\">\n<label class=\"{}\">{}{}</label>\n",
        escape_html(&path.to_string()),
        classes.label,
        icon_markup(field.icon.as_deref(), ctx.theme),
        escape_html(field.display_label())
    ));

    for index in 0..count {
        let item_path = path.child(PathSegment::Index(index));
        out.push_str(&format!(
            "<div class=\"sf-list-item\" data-index=\"{index}\">\n"
        ));
        if list.ui.collapsible_items {
            let open = if list.ui.items_expanded { " open" } else { "" };
            out.push_str(&format!(
                "<details{open}>\n<summary>{} #{}</summary>\n",
                escape_html(field.display_label()),
                index + 1
            ));
        }
        for item_field in &list.item_fields {
            render_field(out, item_field, &item_path, ctx);
        }
        out.push_str(&format!(
            "<button type=\"button\" class=\"{}\" data-action=\"remove-item\" data-list=\"{}\" data-index=\"{index}\">{}</button>\n",
            classes.secondary_button,
            escape_html(&path.to_string()),
            escape_html(&list.ui.remove_button_text)
        ));
        if list.ui.collapsible_items {
            out.push_str("</details>\n");
        }
        out.push_str("</div>\n");
    }

    out.push_str(&format!(
        "<button type=\"button\" class=\"{}\" data-action=\"add-item\" data-list=\"{}\">{}</button>\n</div>\n",
        classes.secondary_button,
        escape_html(&path.to_string()),
        escape_html(&list.ui.add_button_text)
    ));
}

fn render_control(out: &mut String, field: &FieldSpec, path: &FieldPath, ctx: &RenderContext<'_>) {
    let classes = theme_classes(ctx.theme);
    let error = ctx.errors.and_then(|e| e.first_message(path));
    let id = control_id(path);
    let name = escape_html(&path.to_string());

    out.push_str(&format!(
        "<div class=\"{}\" data-field=\"{name}\">\n",
        classes.group
    ));

    let label = format!(
        "{}{}",
        icon_markup(field.icon.as_deref(), ctx.theme),
        escape_html(field.display_label())
    );
    let is_check_group = matches!(field.kind, FieldKind::Checkbox | FieldKind::Radio);
    if !is_check_group {
        out.push_str(&format!(
            "<label class=\"{}\" for=\"{id}\">{label}</label>\n",
            classes.label
        ));
    } else {
        out.push_str(&format!("<span class=\"{}\">{label}</span>\n", classes.label));
    }

    let invalid = if error.is_some() {
        format!(" {}", classes.invalid)
    } else {
        String::new()
    };
    let required = if field.required { " required" } else { "" };

    match &field.kind {
        FieldKind::TextArea => {
            let value = current_string(ctx, path).unwrap_or_default();
            out.push_str(&format!(
                "<textarea class=\"{}{invalid}\" id=\"{id}\" name=\"{name}\"{}{required}>{}</textarea>\n",
                classes.control,
                placeholder_attr(field),
                escape_html(&value)
            ));
        }
        FieldKind::Select => {
            out.push_str(&format!(
                "<select class=\"{}{invalid}\" id=\"{id}\" name=\"{name}\"{required}>\n",
                classes.select
            ));
            if !field.required {
                out.push_str("<option value=\"\"></option>\n");
            }
            let selected = current_string(ctx, path);
            for option in &field.constraints.options {
                let marker = if selected.as_deref() == Some(option.value.as_str()) {
                    " selected"
                } else {
                    ""
                };
                out.push_str(&format!(
                    "<option value=\"{}\"{marker}>{}</option>\n",
                    escape_html(&option.value),
                    escape_html(&option.label)
                ));
            }
            out.push_str("</select>\n");
        }
        FieldKind::MultiSelect => {
            let selected = selected_values(ctx, path);
            out.push_str(&format!(
                "<select multiple class=\"{}{invalid}\" id=\"{id}\" name=\"{name}\">\n",
                classes.select
            ));
            for option in &field.constraints.options {
                let marker = if selected.iter().any(|v| v == &option.value) {
                    " selected"
                } else {
                    ""
                };
                out.push_str(&format!(
                    "<option value=\"{}\"{marker}>{}</option>\n",
                    escape_html(&option.value),
                    escape_html(&option.label)
                ));
            }
            out.push_str("</select>\n");
        }
        FieldKind::Radio => {
            let selected = current_string(ctx, path);
            for (index, option) in field.constraints.options.iter().enumerate() {
                let marker = if selected.as_deref() == Some(option.value.as_str()) {
                    " checked"
                } else {
                    ""
                };
                out.push_str(&format!(
                    "<div class=\"{}\">\n<input type=\"radio\" class=\"{}{invalid}\" id=\"{id}-{index}\" name=\"{name}\" value=\"{}\"{marker}>\n<label class=\"{}\" for=\"{id}-{index}\">{}</label>\n</div>\n",
                    classes.check,
                    classes.check_input,
                    escape_html(&option.value),
                    classes.check_label,
                    escape_html(&option.label)
                ));
            }
        }
        FieldKind::Checkbox if field.is_multi_valued() => {
            let selected = selected_values(ctx, path);
            for (index, option) in field.constraints.options.iter().enumerate() {
                let marker = if selected.iter().any(|v| v == &option.value) {
                    " checked"
                } else {
                    ""
                };
                out.push_str(&format!(
                    "<div class=\"{}\">\n<input type=\"checkbox\" class=\"{}{invalid}\" id=\"{id}-{index}\" name=\"{name}\" value=\"{}\"{marker}>\n<label class=\"{}\" for=\"{id}-{index}\">{}</label>\n</div>\n",
                    classes.check,
                    classes.check_input,
                    escape_html(&option.value),
                    classes.check_label,
                    escape_html(&option.label)
                ));
            }
        }
        FieldKind::Checkbox => {
            let checked = match ctx.values.and_then(|v| v.at(path)) {
                Some(Value::Bool(b)) => *b,
                Some(Value::Str(s)) => matches!(s.trim(), "on" | "true" | "yes" | "1"),
                _ => false,
            };
            let marker = if checked { " checked" } else { "" };
            out.push_str(&format!(
                "<div class=\"{}\">\n<input type=\"checkbox\" class=\"{}{invalid}\" id=\"{id}\" name=\"{name}\" value=\"true\"{marker}>\n<label class=\"{}\" for=\"{id}\">{}</label>\n</div>\n",
                classes.check,
                classes.check_input,
                classes.check_label,
                escape_html(field.display_label())
            ));
        }
        kind => {
            let value = current_string(ctx, path).unwrap_or_default();
            out.push_str(&format!(
                "<input type=\"{}\" class=\"{}{invalid}\" id=\"{id}\" name=\"{name}\" value=\"{}\"{}{}{required}>\n",
                input_type(kind),
                classes.control,
                escape_html(&value),
                placeholder_attr(field),
                bound_attrs(field)
            ));
        }
    }

    if let Some(message) = error {
        out.push_str(&format!(
            "<div class=\"{}\">{}</div>\n",
            classes.error,
            escape_html(message)
        ));
    }
    if let Some(help) = &field.help_text {
        out.push_str(&format!(
            "<div class=\"{}\">{}</div>\n",
            classes.help,
            escape_html(help)
        ));
    }
    out.push_str("</div>\n");
}

/// The `type` attribute for single-input kinds. Kind decides the element;
/// the theme never does.
fn input_type(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::Email => "email",
        FieldKind::Password => "password",
        FieldKind::Number(_) => "number",
        FieldKind::Range(_) => "range",
        FieldKind::Color => "color",
        FieldKind::Date => "date",
        FieldKind::DateTime => "datetime-local",
        FieldKind::Time => "time",
        FieldKind::File => "file",
        FieldKind::Url => "url",
        FieldKind::Tel => "tel",
        _ => "text",
    }
}

fn placeholder_attr(field: &FieldSpec) -> String {
    match &field.placeholder {
        Some(placeholder) => format!(" placeholder=\"{}\"", escape_html(placeholder)),
        None => String::new(),
    }
}

/// Constraint bounds surfaced as native HTML attributes.
fn bound_attrs(field: &FieldSpec) -> String {
    let mut attrs = String::new();
    if let Some((min, max)) = field.constraints.length {
        if let Some(min) = min {
            attrs.push_str(&format!(" minlength=\"{min}\""));
        }
        if let Some(max) = max {
            attrs.push_str(&format!(" maxlength=\"{max}\""));
        }
    }
    if let Some((min, max)) = field.constraints.range {
        if let Some(min) = min {
            attrs.push_str(&format!(" min=\"{min}\""));
        }
        if let Some(max) = max {
            attrs.push_str(&format!(" max=\"{max}\""));
        }
    }
    if matches!(
        field.kind,
        FieldKind::Number(NumberKind::Float) | FieldKind::Range(NumberKind::Float)
    ) {
        attrs.push_str(" step=\"any\"");
    }
    attrs
}

fn icon_markup(icon: Option<&str>, theme: Theme) -> String {
    match icon {
        Some(icon) => match theme {
            Theme::Bootstrap => format!("<i class=\"bi bi-{}\"></i> ", escape_html(icon)),
            Theme::Material => {
                format!("<span class=\"material-icons\">{}</span> ", escape_html(icon))
            }
        },
        None => String::new(),
    }
}

fn current_string(ctx: &RenderContext<'_>, path: &FieldPath) -> Option<String> {
    ctx.values.and_then(|v| v.at(path)).and_then(Value::as_form_str)
}

fn selected_values(ctx: &RenderContext<'_>, path: &FieldPath) -> Vec<String> {
    match ctx.values.and_then(|v| v.at(path)) {
        Some(Value::List(items)) => items.0.iter().filter_map(Value::as_form_str).collect(),
        Some(single) => single.as_form_str().into_iter().collect(),
        None => Vec::new(),
    }
}

fn control_id(path: &FieldPath) -> String {
    let mut id = String::from("sf");
    for segment in &path.0 {
        match segment {
            PathSegment::Field(name) => {
                id.push('-');
                id.push_str(name);
            }
            PathSegment::Index(index) => {
                id.push('-');
                id.push_str(&index.to_string());
            }
        }
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use forma_schema::{FieldSpecBuilder, FormSchema};
    use forma_value::{ErrorMap, FieldMap, Items};
    use indexmap::IndexMap;

    fn contact_schema() -> FormSchema {
        FormSchema::new(
            "contact",
            vec![
                FieldSpecBuilder::new("email", FieldKind::Email)
                    .required()
                    .label("Email Address")
                    .build(),
            ],
        )
        .unwrap()
    }

    fn value_map(pairs: Vec<(&str, Value)>) -> Value {
        Value::Map(FieldMap(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<IndexMap<_, _>>(),
        ))
    }

    #[test]
    fn errors_and_values_merge_into_the_control() {
        let schema = contact_schema();
        let values = value_map(vec![("email", Value::from("bad"))]);
        let mut errors = ErrorMap::default();
        errors.push("email".parse().unwrap(), "invalid format");

        for theme in [Theme::Bootstrap, Theme::Material] {
            let ctx = RenderContext::new(theme)
                .asset_mode(AssetMode::None)
                .values(&values)
                .errors(&errors);
            let html = render(&schema, &ctx);
            assert!(html.contains("value=\"bad\""), "{theme:?}: {html}");
            assert!(html.contains("invalid format"), "{theme:?}");
        }
    }

    #[test]
    fn asset_mode_changes_only_the_prologue_and_epilogue() {
        let schema = contact_schema();
        let core = render(
            &schema,
            &RenderContext::new(Theme::Bootstrap).without_assets(),
        );
        let vendored = render(
            &schema,
            &RenderContext::new(Theme::Bootstrap).asset_mode(AssetMode::Vendored),
        );
        let cdn = render(
            &schema,
            &RenderContext::new(Theme::Bootstrap).asset_mode(AssetMode::Cdn),
        );

        assert!(vendored.contains(&core));
        assert!(cdn.contains(&core));
        assert!(vendored.contains("<style>"));
        assert!(cdn.contains("bootstrap@5.3.3"));
        assert!(!core.contains("<style>"));
        assert!(!core.contains("<link"));
    }

    #[test]
    fn include_assets_false_suppresses_assets_in_every_mode() {
        let schema = contact_schema();
        for mode in [AssetMode::Vendored, AssetMode::Cdn, AssetMode::None] {
            let html = render(
                &schema,
                &RenderContext::new(Theme::Material).asset_mode(mode).without_assets(),
            );
            assert!(!html.contains("<style>"));
            assert!(!html.contains("<script"));
        }
    }

    #[test]
    fn themes_change_classes_but_not_elements() {
        let schema = contact_schema();
        let bootstrap = render(
            &schema,
            &RenderContext::new(Theme::Bootstrap).without_assets(),
        );
        let material = render(
            &schema,
            &RenderContext::new(Theme::Material).without_assets(),
        );
        assert!(bootstrap.contains("type=\"email\""));
        assert!(material.contains("type=\"email\""));
        assert!(bootstrap.contains("form-control"));
        assert!(material.contains("md-input"));
    }

    #[test]
    fn lists_render_one_empty_item_without_values() {
        let schema = FormSchema::new(
            "pets",
            vec![FieldSpecBuilder::list(
                "pets",
                vec![FieldSpecBuilder::new("name", FieldKind::Text).build()],
            )
            .build()],
        )
        .unwrap();

        let html = render(&schema, &RenderContext::new(Theme::Bootstrap).without_assets());
        assert!(html.contains("name=\"pets[0].name\""));
        assert!(!html.contains("name=\"pets[1].name\""));
        assert!(html.contains("data-action=\"add-item\""));
    }

    #[test]
    fn lists_render_one_block_per_existing_item() {
        let schema = FormSchema::new(
            "pets",
            vec![FieldSpecBuilder::list(
                "pets",
                vec![FieldSpecBuilder::new("name", FieldKind::Text).build()],
            )
            .build()],
        )
        .unwrap();

        let values = value_map(vec![(
            "pets",
            Value::List(Items(vec![
                value_map(vec![("name", Value::from("Fido"))]),
                value_map(vec![("name", Value::from("Rex"))]),
            ])),
        )]);
        let html = render(
            &schema,
            &RenderContext::new(Theme::Bootstrap).without_assets().values(&values),
        );
        assert!(html.contains("value=\"Fido\""));
        assert!(html.contains("value=\"Rex\""));
        assert!(html.contains("name=\"pets[1].name\""));
    }

    #[test]
    fn rendering_is_deterministic() {
        let schema = contact_schema();
        let ctx = RenderContext::new(Theme::Material);
        assert_eq!(render(&schema, &ctx), render(&schema, &ctx));
    }

    #[test]
    fn user_input_is_escaped() {
        let schema = contact_schema();
        let values = value_map(vec![("email", Value::from("<script>alert(1)</script>"))]);
        let html = render(
            &schema,
            &RenderContext::new(Theme::Bootstrap).without_assets().values(&values),
        );
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
