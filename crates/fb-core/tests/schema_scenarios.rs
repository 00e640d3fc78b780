//! Integration tests: schema store + property generator + edit merge.
//!
//! Walks the drop → select → edit → save flow across the fb-core modules.

use fb_core::model::*;
use fb_core::properties::generate;
use fb_core::{ComponentKey, SchemaError, Submission, merge_edit};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn submission(value: Value) -> Submission {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn assert_submit_last(schema: &Schema) {
    let last = schema.components().last().expect("schema is never empty");
    assert!(last.is_submit_button(), "last entry is {last:?}");
    let submits = schema
        .components()
        .iter()
        .filter(|c| c.key.is_submit())
        .count();
    assert_eq!(submits, 1);
}

// ─── Insertion ──────────────────────────────────────────────────────────

#[test]
fn every_type_inserts_before_submit() {
    let mut schema = Schema::new();
    for ty in ComponentType::ALL {
        let before = schema.len();
        let inserted = schema.insert(ty.as_str()).unwrap();
        assert_eq!(schema.len(), before + 1);
        assert_eq!(schema.position(inserted.key), Some(schema.len() - 2));
        assert_eq!(inserted.component_type(), ty);
        assert!(inserted.key.as_str().starts_with(ty.as_str()));
        assert_submit_last(&schema);
    }
}

#[test]
fn scenario_a_textfield_drop() {
    let mut schema = Schema::new();
    let field = schema.insert("textfield").unwrap();

    assert_eq!(schema.len(), 2);
    assert_eq!(schema.components()[0], field);
    assert_eq!(field.label, "Text Field");
    assert!(field.key.as_str().starts_with("textfield"));
    assert_submit_last(&schema);
}

#[test]
fn rapid_inserts_get_distinct_keys() {
    let mut schema = Schema::new();
    let keys: Vec<ComponentKey> = (0..50)
        .map(|_| schema.insert_type(ComponentType::Radio).key)
        .collect();
    let mut unique = keys.clone();
    unique.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    unique.dedup();
    assert_eq!(unique.len(), keys.len());
}

// ─── Editing ────────────────────────────────────────────────────────────

#[test]
fn scenario_b_label_and_required_edit() {
    let mut schema = Schema::new();
    let field = schema.insert("textfield").unwrap();

    let original = schema.select_for_edit(field.key).unwrap();
    let merged = merge_edit(
        &original,
        &submission(json!({ "label": "Name", "required": true })),
    )
    .unwrap();
    schema.apply_edit(merged).unwrap();

    let stored = schema.get(field.key).unwrap();
    assert_eq!(stored.label, "Name");
    assert!(stored.required);
    assert_eq!(stored.key, field.key);
}

#[test]
fn scenario_c_select_values_edit() {
    let mut schema = Schema::new();
    let select = schema.insert("select").unwrap();

    let original = schema.select_for_edit(select.key).unwrap();
    let merged = merge_edit(
        &original,
        &submission(json!({
            "data.values": [
                { "label": "A", "value": "a" },
                { "label": "B", "value": "b" }
            ],
            "dataSrc": "json"
        })),
    )
    .unwrap();
    schema.apply_edit(merged.clone()).unwrap();

    let stored = schema.select_for_edit(select.key).unwrap();
    assert_eq!(stored, merged);
    assert_eq!(
        stored.to_value().unwrap(),
        json!({
            "key": select.key.as_str(),
            "label": "Select",
            "type": "select",
            "data": { "values": [
                { "label": "A", "value": "a" },
                { "label": "B", "value": "b" }
            ] },
            "dataSrc": "values",
            "valueProperty": "value",
            "dataType": "auto"
        })
    );
}

#[test]
fn scenario_d_unknown_key_leaves_schema_untouched() {
    let mut schema = Schema::new();
    schema.insert("number").unwrap();
    schema.drain_changes();
    let before: Vec<Component> = schema.components().to_vec();

    let stray = Component::new(ComponentType::Number, ComponentKey::intern("never_inserted"));
    let err = schema.apply_edit(stray).unwrap_err();

    assert_eq!(err, SchemaError::NotFound(ComponentKey::intern("never_inserted")));
    assert_eq!(schema.components(), before.as_slice());
    assert!(!schema.has_pending_changes());
}

#[test]
fn selected_copy_is_isolated_from_schema() {
    let mut schema = Schema::new();
    let field = schema.insert("textarea").unwrap();

    let mut copy = schema.select_for_edit(field.key).unwrap();
    copy.label = "Scratch".into();

    assert_eq!(schema.get(field.key).unwrap().label, "Text Area");
}

#[test]
fn select_for_unknown_key_fails() {
    let schema = Schema::new();
    let missing = ComponentKey::intern("ghost");
    assert_eq!(schema.select_for_edit(missing), Err(SchemaError::NotFound(missing)));
}

#[test]
fn apply_then_select_roundtrip_for_every_type() {
    let mut schema = Schema::new();
    for ty in ComponentType::ALL {
        let inserted = schema.insert_type(ty);
        let original = schema.select_for_edit(inserted.key).unwrap();
        let merged = merge_edit(&original, &submission(json!({ "label": "Edited" }))).unwrap();
        schema.apply_edit(merged.clone()).unwrap();
        assert_eq!(schema.select_for_edit(inserted.key).unwrap(), merged);
    }
}

#[test]
fn submit_button_stays_put_through_edits() {
    let mut schema = Schema::new();
    schema.insert("checkbox").unwrap();

    let submit = schema.select_for_edit(ComponentKey::submit()).unwrap();
    let merged = merge_edit(&submit, &submission(json!({ "label": "Send" }))).unwrap();
    schema.apply_edit(merged).unwrap();

    assert_submit_last(&schema);
    assert_eq!(schema.components().last().unwrap().label, "Send");
}

#[test]
fn descriptors_follow_merged_values() {
    let mut schema = Schema::new();
    let select = schema.insert("select").unwrap();
    let merged = merge_edit(
        &select,
        &submission(json!({ "data.values": [{ "label": "One", "value": "1" }], "multiple": true })),
    )
    .unwrap();
    schema.apply_edit(merged).unwrap();

    let descriptors = generate(&schema.select_for_edit(select.key).unwrap());
    assert_eq!(
        descriptors[3].current_value,
        json!([{ "label": "One", "value": "1" }])
    );
    assert_eq!(descriptors[4].current_value, json!(true));
}

// ─── Builder sync ───────────────────────────────────────────────────────

#[test]
fn builder_sync_keeps_widget_attributes() {
    let reported = json!([
        {
            "type": "textfield",
            "key": "email",
            "label": "Email",
            "description": "Work address",
            "tooltip": "We never share it",
            "prefix": "@"
        },
        {
            "type": "panel",
            "key": "box",
            "label": "Box",
            "components": [{ "type": "textfield", "key": "inner", "label": "Inner" }]
        },
        {
            "type": "button",
            "key": "submit",
            "label": "Submit",
            "disableOnInvalid": true,
            "input": true,
            "tableView": false
        }
    ]);
    let components: Vec<Component> = serde_json::from_value(reported.clone()).unwrap();

    let mut schema = Schema::new();
    schema.sync_components(components).unwrap();
    assert_submit_last(&schema);

    let form = serde_json::to_value(&schema).unwrap();
    assert_eq!(form["components"], reported);
}
