//! Translate property descriptors into a form.io form definition.
//!
//! The property popup is itself rendered by the form.io renderer, so each
//! `PropertyDescriptor` becomes one form.io component object.

use fb_core::properties::{AddPosition, EditorKind, PropertyDescriptor};
use serde_json::{Map, Value, json};

/// Build `{"components": [...]}` for the popup's form renderer.
pub fn property_form(descriptors: &[PropertyDescriptor]) -> Value {
    let components: Vec<Value> = descriptors.iter().map(component).collect();
    json!({ "components": components })
}

fn component(descriptor: &PropertyDescriptor) -> Value {
    let mut obj = match &descriptor.editor {
        EditorKind::Text => base("textfield", descriptor),
        EditorKind::Number => base("number", descriptor),
        EditorKind::Checkbox => base("checkbox", descriptor),
        EditorKind::Select { options } => {
            let mut obj = base("select", descriptor);
            obj.insert("dataSrc".into(), json!("values"));
            obj.insert("data".into(), json!({ "values": options }));
            obj
        }
        EditorKind::RepeatingGroup {
            fields,
            reorderable,
            add_position,
        } => {
            let mut obj = base("datagrid", descriptor);
            let columns: Vec<Value> = fields
                .iter()
                .map(|field| {
                    json!({
                        "type": "textfield",
                        "key": field.key,
                        "label": field.label,
                        "input": true,
                        "validate": { "required": field.required }
                    })
                })
                .collect();
            let position = match add_position {
                AddPosition::Bottom => "bottom",
            };
            obj.insert("reorder".into(), json!(reorderable));
            obj.insert("addAnotherPosition".into(), json!(position));
            obj.insert("components".into(), Value::Array(columns));
            obj
        }
        EditorKind::SaveAction { theme } => {
            return json!({
                "type": "button",
                "action": "submit",
                "key": descriptor.key,
                "label": descriptor.label,
                "theme": theme,
                "input": true
            });
        }
    };

    if descriptor.required {
        obj.insert("validate".into(), json!({ "required": true }));
    }
    Value::Object(obj)
}

fn base(ty: &str, descriptor: &PropertyDescriptor) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("type".into(), json!(ty));
    obj.insert("key".into(), json!(descriptor.key));
    obj.insert("label".into(), json!(descriptor.label));
    obj.insert("input".into(), json!(true));
    if !descriptor.current_value.is_null() {
        obj.insert("defaultValue".into(), descriptor.current_value.clone());
    }
    obj
}

#[cfg(test)]
mod tests {
    use super::*;
    use fb_core::{Component, ComponentKey, ComponentType, generate};
    use pretty_assertions::assert_eq;

    fn form_for(ty: ComponentType, key: &str) -> Value {
        property_form(&generate(&Component::new(ty, ComponentKey::intern(key))))
    }

    #[test]
    fn textfield_form_shape() {
        let form = form_for(ComponentType::TextField, "formio_name");
        let components = form["components"].as_array().unwrap();

        assert_eq!(
            components[0],
            json!({
                "type": "textfield",
                "key": "label",
                "label": "Label",
                "input": true,
                "defaultValue": "Text Field",
                "validate": { "required": true }
            })
        );
        assert_eq!(components[1]["defaultValue"], json!("formio_name"));
        assert_eq!(components[2]["type"], json!("checkbox"));
        assert_eq!(components[4]["type"], json!("number"));
        assert!(components[4].get("defaultValue").is_none());
    }

    #[test]
    fn option_grid_becomes_datagrid() {
        let form = form_for(ComponentType::Select, "formio_pick");
        let grid = &form["components"][3];

        assert_eq!(grid["type"], json!("datagrid"));
        assert_eq!(grid["key"], json!("data.values"));
        assert_eq!(grid["reorder"], json!(true));
        assert_eq!(grid["addAnotherPosition"], json!("bottom"));
        assert_eq!(grid["defaultValue"], json!([]));
        assert_eq!(grid["components"][0]["key"], json!("label"));
        assert_eq!(grid["components"][1]["validate"]["required"], json!(true));
    }

    #[test]
    fn button_action_is_select_with_values() {
        let form = form_for(ComponentType::Button, "formio_btn");
        let action = &form["components"][3];

        assert_eq!(action["type"], json!("select"));
        assert_eq!(action["dataSrc"], json!("values"));
        assert_eq!(action["data"]["values"][1]["value"], json!("reset"));
    }

    #[test]
    fn form_ends_with_primary_save_button() {
        let form = form_for(ComponentType::Well, "formio_well");
        let components = form["components"].as_array().unwrap();

        assert_eq!(
            components.last().unwrap(),
            &json!({
                "type": "button",
                "action": "submit",
                "key": "submit",
                "label": "Save",
                "theme": "primary",
                "input": true
            })
        );
    }
}
