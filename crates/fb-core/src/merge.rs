//! Edit merge policy: fold a property-form submission back into a component.
//!
//! The merge works on the flat wire object so that any submitted attribute
//! overrides the original one (shallow merge), then re-applies the
//! type-specific fixups and decodes back into a typed `Component`.
//! Attributes the property form never shows (kept in `Component::extra`)
//! pass through untouched, and a blank optional attribute reads as unset.

use crate::error::MergeError;
use crate::model::{
    Component, ComponentType, SELECT_DATA_SRC, SELECT_DATA_TYPE, SELECT_VALUE_PROPERTY,
};
use crate::properties::{CHOICE_VALUES_PATH, SAVE_ACTION_KEY, SELECT_VALUES_PATH};
use serde_json::{Map, Value, json};

/// Field values reported by the property form, keyed by descriptor path.
pub type Submission = Map<String, Value>;

/// Wire field carrying the component type; fixed at insert time.
const TYPE_FIELD: &str = "type";

/// Merge `submitted` onto a copy of `original`.
///
/// Pure: the same original and submission always give the same result.
///
/// # Errors
/// `InvalidSubmission` when a submitted value does not fit the component's
/// attribute types, `EmptyKey` when the API key was cleared.
pub fn merge_edit(original: &Component, submitted: &Submission) -> Result<Component, MergeError> {
    let component_type = original.component_type();
    let mut merged = match original.to_value().map_err(MergeError::Encode)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    for (name, value) in submitted {
        if name == TYPE_FIELD || name == SAVE_ACTION_KEY {
            continue;
        }
        merged.insert(name.clone(), value.clone());
    }

    match component_type {
        ComponentType::Select => {
            let values = submitted
                .get(SELECT_VALUES_PATH)
                .or_else(|| submitted.get("data").and_then(|data| data.get("values")))
                .filter(|v| !v.is_null())
                .cloned()
                .unwrap_or_else(|| json!([]));
            merged.remove(SELECT_VALUES_PATH);
            merged.insert("data".into(), json!({ "values": values }));
            merged.insert("dataSrc".into(), json!(SELECT_DATA_SRC));
            merged.insert("valueProperty".into(), json!(SELECT_VALUE_PROPERTY));
            merged.insert("dataType".into(), json!(SELECT_DATA_TYPE));
        }
        ComponentType::SelectBoxes | ComponentType::Radio => {
            let values = submitted
                .get(CHOICE_VALUES_PATH)
                .filter(|v| !v.is_null())
                .cloned()
                .unwrap_or_else(|| json!([]));
            merged.insert(CHOICE_VALUES_PATH.into(), values);
        }
        _ => {}
    }

    let component = Component::from_value(Value::Object(merged)).map_err(|source| {
        MergeError::InvalidSubmission {
            component_type,
            source,
        }
    })?;
    if component.key.is_blank() {
        return Err(MergeError::EmptyKey);
    }
    Ok(component)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ComponentKey;
    use crate::model::{ChoiceOption, ComponentKind, SelectData};
    use pretty_assertions::assert_eq;

    fn submission(value: Value) -> Submission {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn component(ty: ComponentType, key: &str) -> Component {
        Component::new(ty, ComponentKey::intern(key))
    }

    #[test]
    fn shallow_merge_overrides_common_fields() {
        let original = component(ComponentType::TextField, "textfield1");
        let merged = merge_edit(
            &original,
            &submission(json!({ "label": "Name", "required": true, "submit": true })),
        )
        .unwrap();
        assert_eq!(merged.label, "Name");
        assert!(merged.required);
        assert_eq!(merged.key, original.key);
        assert_eq!(merged.kind, original.kind);
        assert!(merged.extra.is_empty());
    }

    #[test]
    fn blank_action_on_submit_button_saves() {
        let merged = merge_edit(
            &Component::submit_button(),
            &submission(json!({ "label": "Send", "action": "", "submit": true })),
        )
        .unwrap();
        assert_eq!(merged.label, "Send");
        assert!(merged.is_submit_button());
        assert!(matches!(merged.kind, ComponentKind::Button { action: None, .. }));
        assert!(merged.extra.is_empty());
    }

    #[test]
    fn blank_number_bounds_clear_them() {
        let mut original = component(ComponentType::Number, "number2");
        original.kind = ComponentKind::Number {
            min: Some(1.0),
            max: Some(9.0),
        };
        let merged = merge_edit(&original, &submission(json!({ "min": "", "max": "" }))).unwrap();
        assert_eq!(merged.kind, ComponentKind::Number { min: None, max: None });
    }

    #[test]
    fn builder_attributes_survive_edit() {
        let original = Component::from_value(json!({
            "type": "textfield",
            "key": "email",
            "label": "Email",
            "description": "Work address",
            "prefix": "@"
        }))
        .unwrap();
        let merged = merge_edit(&original, &submission(json!({ "label": "E-mail" }))).unwrap();
        assert_eq!(merged.label, "E-mail");
        assert_eq!(merged.extra, original.extra);
        assert_eq!(merged.extra["description"], json!("Work address"));
    }

    #[test]
    fn select_values_come_from_dotted_path() {
        let original = component(ComponentType::Select, "select1");
        let merged = merge_edit(
            &original,
            &submission(json!({
                "data.values": [
                    { "label": "A", "value": "a" },
                    { "label": "B", "value": "b" }
                ]
            })),
        )
        .unwrap();
        match merged.kind {
            ComponentKind::Select { data, .. } => assert_eq!(
                data,
                SelectData {
                    values: vec![ChoiceOption::new("A", "a"), ChoiceOption::new("B", "b")],
                }
            ),
            other => panic!("expected select, got {other:?}"),
        }
    }

    #[test]
    fn select_forced_fields_ignore_overrides() {
        let original = component(ComponentType::Select, "select2");
        let merged = merge_edit(
            &original,
            &submission(json!({
                "dataSrc": "url",
                "valueProperty": "id",
                "dataType": "string",
                "multiple": true
            })),
        )
        .unwrap();
        match merged.kind {
            ComponentKind::Select {
                data,
                multiple,
                data_src,
                value_property,
                data_type,
            } => {
                assert!(data.values.is_empty());
                assert!(multiple);
                assert_eq!(data_src, "values");
                assert_eq!(value_property, "value");
                assert_eq!(data_type, "auto");
            }
            other => panic!("expected select, got {other:?}"),
        }
    }

    #[test]
    fn radio_values_replace_directly() {
        let mut original = component(ComponentType::Radio, "radio1");
        original.kind = ComponentKind::Radio {
            values: vec![ChoiceOption::new("Old", "old")],
        };

        let merged = merge_edit(
            &original,
            &submission(json!({ "values": [{ "label": "Yes", "value": "y" }] })),
        )
        .unwrap();
        assert_eq!(
            merged.kind,
            ComponentKind::Radio {
                values: vec![ChoiceOption::new("Yes", "y")],
            }
        );

        let cleared = merge_edit(&original, &Submission::new()).unwrap();
        assert_eq!(cleared.kind, ComponentKind::Radio { values: vec![] });
    }

    #[test]
    fn submitted_type_is_ignored() {
        let original = component(ComponentType::Number, "number1");
        let merged = merge_edit(
            &original,
            &submission(json!({ "type": "textfield", "min": 1, "max": 10 })),
        )
        .unwrap();
        assert_eq!(
            merged.kind,
            ComponentKind::Number {
                min: Some(1.0),
                max: Some(10.0),
            }
        );
    }

    #[test]
    fn ill_typed_submission_is_rejected() {
        let original = component(ComponentType::TextArea, "textarea1");
        let err = merge_edit(&original, &submission(json!({ "rows": "many" }))).unwrap_err();
        assert!(matches!(
            err,
            MergeError::InvalidSubmission {
                component_type: ComponentType::TextArea,
                ..
            }
        ));
    }

    #[test]
    fn empty_key_is_rejected() {
        let original = component(ComponentType::Checkbox, "checkbox1");
        let err = merge_edit(&original, &submission(json!({ "key": "  " }))).unwrap_err();
        assert!(matches!(err, MergeError::EmptyKey));
    }

    #[test]
    fn merge_is_pure() {
        let original = component(ComponentType::Select, "select3");
        let sub = submission(json!({ "label": "Pick", "data.values": [{ "label": "X", "value": "x" }] }));
        let first = merge_edit(&original, &sub).unwrap();
        let second = merge_edit(&original, &sub).unwrap();
        assert_eq!(first, second);
    }
}
