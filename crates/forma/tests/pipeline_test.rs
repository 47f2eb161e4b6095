//! End-to-end submission pipeline tests: decode, coerce, validate.

use forma::prelude::*;
use forma::{FieldMap, FieldSpec, FileRef, Items, ListUi, decode, encode};
use indexmap::IndexMap;
use serde_json::json;

fn entries(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn value_map(pairs: Vec<(&str, Value)>) -> Value {
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
            FieldSpecBuilder::new("username", FieldKind::Text).required().build(),
            FieldSpecBuilder::new("password", FieldKind::Password).required().build(),
        ],
    )
    .unwrap()
}

fn pet_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpecBuilder::new("name", FieldKind::Text).required().build(),
        FieldSpecBuilder::new("age", FieldKind::Number(NumberKind::Integer)).build(),
    ]
}

fn pets_schema() -> FormSchema {
    FormSchema::new(
        "pets",
        vec![
            FieldSpecBuilder::new("owner_name", FieldKind::Text).required().build(),
            FieldSpecBuilder::list("pets", pet_fields()).build(),
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
fn test_minimal_login_empty_username() {
    let result = submit(
        &login_schema(),
        &entries(&[("username", ""), ("password", "secret")]),
    );
    assert_eq!(
        result.to_json(),
        json!({"success": false, "errors": {"username": ["required"]}})
    );
}

#[test]
fn test_minimal_login_success() {
    let result = submit(
        &login_schema(),
        &entries(&[("username", "demo_user"), ("password", "demo_pass")]),
    );
    assert_eq!(
        result.to_json(),
        json!({
            "success": true,
            "value": {"username": "demo_user", "password": "demo_pass"},
        })
    );
}

#[test]
fn test_list_decode_orders_by_index_not_submission_order() {
    let schema = pets_schema();
    let raw = decode(
        &entries(&[
            ("owner_name", "Sarah"),
            ("pets[1].name", "Rex"),
            ("pets[0].name", "Fido"),
        ]),
        &schema,
    )
    .unwrap();

    assert_eq!(
        raw.at(&"pets[0].name".parse().unwrap()),
        Some(&Value::from("Fido"))
    );
    assert_eq!(
        raw.at(&"pets[1].name".parse().unwrap()),
        Some(&Value::from("Rex"))
    );
}

#[test]
fn test_multiselect_coercion_collects_values_and_rejects_unknown() {
    let schema = tags_schema();

    let result = submit(&schema, &entries(&[("tags", "a"), ("tags", "c")]));
    assert_eq!(
        result.to_json(),
        json!({"success": true, "value": {"tags": ["a", "c"]}})
    );

    let result = submit(&schema, &entries(&[("tags", "a"), ("tags", "z")]));
    let errors = result.errors().unwrap();
    assert_eq!(
        errors.messages(&"tags".parse().unwrap()),
        Some(["'z' is not a valid choice".to_string()].as_slice())
    );
}

#[test]
fn test_round_trip_decode_encode() {
    let schema = FormSchema::new(
        "mixed",
        vec![
            FieldSpecBuilder::new("owner_name", FieldKind::Text).required().build(),
            FieldSpecBuilder::list("pets", pet_fields()).build(),
            FieldSpecBuilder::new("tags", FieldKind::MultiSelect)
                .plain_options(["a", "b", "c"])
                .build(),
        ],
    )
    .unwrap();

    let tree = value_map(vec![
        ("owner_name", Value::from("Sarah")),
        (
            "pets",
            Value::List(Items(vec![
                value_map(vec![("name", Value::from("Fido")), ("age", Value::from("3"))]),
                value_map(vec![("name", Value::from("Rex")), ("age", Value::from("5"))]),
            ])),
        ),
        (
            "tags",
            Value::List(Items(vec![Value::from("a"), Value::from("c")])),
        ),
    ]);

    let flat = encode(&tree);
    let decoded = decode(&flat, &schema).unwrap();
    assert_eq!(decoded, tree);
}

#[test]
fn test_all_problems_surface_in_one_pass() {
    let schema = FormSchema::new(
        "reg",
        vec![
            FieldSpecBuilder::new("username", FieldKind::Text)
                .required()
                .length(Some(3), None)
                .build(),
            FieldSpecBuilder::new("email", FieldKind::Email).required().build(),
            FieldSpecBuilder::new("age", FieldKind::Number(NumberKind::Integer))
                .range(Some(13.0), Some(120.0))
                .build(),
        ],
    )
    .unwrap();

    let result = submit(
        &schema,
        &entries(&[("username", "ab"), ("email", "nope"), ("age", "7")]),
    );
    let errors = result.errors().unwrap();
    assert_eq!(errors.0.len(), 3);
}

#[test]
fn test_absent_optional_fields_get_empty_values() {
    let schema = FormSchema::new(
        "prefs",
        vec![
            FieldSpecBuilder::new("nickname", FieldKind::Text).build(),
            FieldSpecBuilder::new("subscribed", FieldKind::Checkbox).build(),
            FieldSpecBuilder::new("tags", FieldKind::MultiSelect)
                .plain_options(["a"])
                .build(),
        ],
    )
    .unwrap();

    let result = submit(&schema, &entries(&[]));
    assert_eq!(
        result.to_json(),
        json!({
            "success": true,
            "value": {"nickname": "", "subscribed": false, "tags": []},
        })
    );
}

#[test]
fn test_index_gap_surfaces_as_missing_required_field() {
    let result = submit(
        &pets_schema(),
        &entries(&[
            ("owner_name", "Sarah"),
            ("pets[0].name", "Fido"),
            ("pets[2].name", "Rex"),
        ]),
    );
    let errors = result.errors().unwrap();
    assert_eq!(
        errors.messages(&"pets[1].name".parse().unwrap()),
        Some(["required".to_string()].as_slice())
    );
}

#[test]
fn test_failed_submission_preserves_valid_input_for_redisplay() {
    let schema = pets_schema();
    let flat = entries(&[
        ("owner_name", ""),
        ("pets[0].name", "Fido"),
        ("pets[0].age", "3"),
    ]);
    let result = submit(&schema, &flat);
    assert!(!result.is_success());

    // callers re-render from the decoded raw tree; nothing the user typed
    // is lost on failure
    let raw = decode(&flat, &schema).unwrap();
    let html = render_form(
        &schema,
        Theme::Bootstrap,
        AssetMode::None,
        false,
        Some(&raw),
        result.errors(),
    );
    assert!(html.contains("value=\"Fido\""));
    assert!(html.contains("is-invalid"));
}

#[test]
fn test_nested_object_fields_validate_in_scope() {
    let schema = FormSchema::new(
        "profile",
        vec![
            FieldSpecBuilder::object(
                "contact",
                vec![
                    FieldSpecBuilder::new("email", FieldKind::Email).required().build(),
                    FieldSpecBuilder::new("phone", FieldKind::Tel).build(),
                ],
            )
            .required()
            .build(),
        ],
    )
    .unwrap();

    let result = submit(&schema, &entries(&[("contact.email", "a@b.cc")]));
    assert_eq!(
        result.to_json(),
        json!({
            "success": true,
            "value": {"contact": {"email": "a@b.cc", "phone": ""}},
        })
    );

    let result = submit(&schema, &entries(&[("contact.phone", "555-0100")]));
    let errors = result.errors().unwrap();
    assert!(errors.contains(&"contact.email".parse().unwrap()));
}

#[test]
fn test_typed_values_in_success_payload() {
    let schema = FormSchema::new(
        "showcase",
        vec![
            FieldSpecBuilder::new("age", FieldKind::Number(NumberKind::Integer)).build(),
            FieldSpecBuilder::new("weight", FieldKind::Number(NumberKind::Float)).build(),
            FieldSpecBuilder::new("vaccinated", FieldKind::Checkbox).build(),
            FieldSpecBuilder::new("last_visit", FieldKind::Date).build(),
        ],
    )
    .unwrap();

    let result = submit(
        &schema,
        &entries(&[
            ("age", "3"),
            ("weight", "65.5"),
            ("vaccinated", "on"),
            ("last_visit", "2026-01-03"),
        ]),
    );
    assert_eq!(
        result.to_json(),
        json!({
            "success": true,
            "value": {
                "age": 3,
                "weight": 65.5,
                "vaccinated": true,
                "last_visit": "2026-01-03",
            },
        })
    );
}

#[test]
fn test_file_values_stay_opaque_references() {
    let schema = FormSchema::new(
        "upload",
        vec![FieldSpecBuilder::new("avatar", FieldKind::File).build()],
    )
    .unwrap();

    let result = submit(&schema, &entries(&[("avatar", "me.png")]));
    let value = result.value().unwrap();
    assert_eq!(
        value.at(&"avatar".parse().unwrap()),
        Some(&Value::File(FileRef { name: "me.png".to_string() }))
    );
}

#[test]
fn test_list_ui_options_do_not_affect_submission_semantics() {
    let with_ui = FormSchema::new(
        "pets",
        vec![
            FieldSpecBuilder::new("owner_name", FieldKind::Text).required().build(),
            FieldSpecBuilder::list("pets", pet_fields())
                .list_ui(ListUi {
                    add_button_text: "Add Another Pet".to_string(),
                    remove_button_text: "Remove Pet".to_string(),
                    collapsible_items: true,
                    items_expanded: false,
                })
                .build(),
        ],
    )
    .unwrap();

    let flat = entries(&[("owner_name", "Sarah"), ("pets[0].name", "Fido")]);
    assert_eq!(
        submit(&with_ui, &flat).to_json(),
        submit(&pets_schema(), &flat).to_json()
    );
}
