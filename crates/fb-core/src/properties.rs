//! Property-editor generation.
//!
//! Given a component, derive the ordered list of editable properties shown
//! in the property popup. Output depends only on the component's type and
//! current attribute values, so two calls on an unmodified component yield
//! identical descriptors.
//!
//! | type | extra descriptors |
//! |------|-------------------|
//! | textfield | placeholder, maxLength |
//! | textarea | placeholder, rows (default 3) |
//! | number | min, max |
//! | checkbox | name (required) |
//! | select | `data.values` option grid, multiple |
//! | selectboxes, radio | `values` option grid |
//! | button | action |

use crate::model::{ButtonAction, ChoiceOption, Component, ComponentKind};
use serde::Serialize;
use serde_json::{Value, json};
use smallvec::{SmallVec, smallvec};

/// Dotted path of a select's option list.
pub const SELECT_VALUES_PATH: &str = "data.values";
/// Path of a selectboxes/radio option list.
pub const CHOICE_VALUES_PATH: &str = "values";
/// Key of the save action; the form renderer reports it as `true` on submit.
pub const SAVE_ACTION_KEY: &str = "submit";
/// Rows shown for a textarea that has none set.
pub const DEFAULT_TEXTAREA_ROWS: u32 = 3;

/// Where new rows of a repeating group are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddPosition {
    Bottom,
}

/// One column of a repeating group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubField {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
}

/// How a property is edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "editor", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum EditorKind {
    Text,
    Number,
    Checkbox,
    /// Single choice from a fixed option list.
    Select { options: Vec<ChoiceOption> },
    /// Ordered, user-extensible list of fixed-shape rows.
    RepeatingGroup {
        fields: SmallVec<[SubField; 2]>,
        reorderable: bool,
        add_position: AddPosition,
    },
    /// Terminal action that submits the property form.
    SaveAction { theme: &'static str },
}

/// One editable attribute of the selected component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    /// Dotted path into the component (`label`, `data.values`, ...).
    pub key: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub editor: EditorKind,
    pub required: bool,
    pub current_value: Value,
}

impl PropertyDescriptor {
    fn new(key: &'static str, label: &'static str, editor: EditorKind, current_value: Value) -> Self {
        Self {
            key,
            label,
            editor,
            required: false,
            current_value,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn is_save_action(&self) -> bool {
        matches!(self.editor, EditorKind::SaveAction { .. })
    }
}

fn text(key: &'static str, label: &'static str, value: Value) -> PropertyDescriptor {
    PropertyDescriptor::new(key, label, EditorKind::Text, value)
}

fn number(key: &'static str, label: &'static str, value: Value) -> PropertyDescriptor {
    PropertyDescriptor::new(key, label, EditorKind::Number, value)
}

fn checkbox(key: &'static str, label: &'static str, value: Value) -> PropertyDescriptor {
    PropertyDescriptor::new(key, label, EditorKind::Checkbox, value)
}

fn option_grid(key: &'static str, values: &[ChoiceOption]) -> PropertyDescriptor {
    let fields = smallvec![
        SubField {
            key: "label",
            label: "Label",
            required: true,
        },
        SubField {
            key: "value",
            label: "Value",
            required: true,
        },
    ];
    let editor = EditorKind::RepeatingGroup {
        fields,
        reorderable: true,
        add_position: AddPosition::Bottom,
    };
    PropertyDescriptor::new(key, "Values", editor, json!(values))
}

fn button_action(action: Option<ButtonAction>) -> PropertyDescriptor {
    let options = vec![
        ChoiceOption::new("Submit", "submit"),
        ChoiceOption::new("Reset", "reset"),
        ChoiceOption::new("Event", "event"),
    ];
    PropertyDescriptor::new("action", "Action", EditorKind::Select { options }, json!(action))
}

fn save_action() -> PropertyDescriptor {
    PropertyDescriptor::new(
        SAVE_ACTION_KEY,
        "Save",
        EditorKind::SaveAction { theme: "primary" },
        Value::Null,
    )
}

/// Derive the property-editor descriptors for `component`.
///
/// Always: label, API key, required; then the type-specific descriptors;
/// then the save action.
pub fn generate(component: &Component) -> Vec<PropertyDescriptor> {
    let mut out = vec![
        text("label", "Label", json!(component.label)).required(),
        text("key", "API Key", json!(component.key)).required(),
        checkbox("required", "Required", json!(component.required)),
    ];

    match &component.kind {
        ComponentKind::TextField {
            placeholder,
            max_length,
        } => {
            out.push(text("placeholder", "Placeholder", json!(placeholder)));
            out.push(number("maxLength", "Maximum Length", json!(max_length)));
        }
        ComponentKind::TextArea { placeholder, rows } => {
            let rows = (*rows).filter(|&r| r > 0).unwrap_or(DEFAULT_TEXTAREA_ROWS);
            out.push(text("placeholder", "Placeholder", json!(placeholder)));
            out.push(number("rows", "Rows", json!(rows)));
        }
        ComponentKind::Number { min, max } => {
            out.push(number("min", "Minimum Value", json!(min)));
            out.push(number("max", "Maximum Value", json!(max)));
        }
        ComponentKind::Checkbox { name } => {
            out.push(text("name", "Name", json!(name)).required());
        }
        ComponentKind::Select { data, multiple, .. } => {
            out.push(option_grid(SELECT_VALUES_PATH, &data.values));
            out.push(checkbox("multiple", "Allow Multiple Selections", json!(multiple)));
        }
        ComponentKind::SelectBoxes { values } | ComponentKind::Radio { values } => {
            out.push(option_grid(CHOICE_VALUES_PATH, values));
        }
        ComponentKind::Button { action, .. } => {
            out.push(button_action(*action));
        }
        ComponentKind::Password
        | ComponentKind::Columns
        | ComponentKind::Fieldset
        | ComponentKind::Panel
        | ComponentKind::Table
        | ComponentKind::Tabs
        | ComponentKind::Well => {}
    }

    out.push(save_action());
    log::debug!(
        "generated {} property descriptors for `{}`",
        out.len(),
        component.key
    );
    out
}
