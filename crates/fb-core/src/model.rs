//! Core data model for form definitions.
//!
//! A form is an ordered list of components. Each component has a unique API
//! key, a label, a required flag, and a `ComponentKind` carrying only the
//! attributes that make sense for its type. The wire form of a component is
//! the flat form.io object (`{"type": "select", "key": ..., "dataSrc": ...}`)
//! exchanged with the rendering layer.
//!
//! The `Schema` owns the components by value and keeps one invariant: a
//! `button` keyed `submit` is always present and always last.

use crate::error::SchemaError;
use crate::id::{Clock, ComponentKey, KeyGenerator};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

// ─── Component types ─────────────────────────────────────────────────────

/// The closed set of component types offered by the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    TextField,
    TextArea,
    Number,
    Password,
    Checkbox,
    SelectBoxes,
    Select,
    Radio,
    Button,
    Columns,
    Fieldset,
    Panel,
    Table,
    Tabs,
    Well,
}

impl ComponentType {
    pub const ALL: [ComponentType; 15] = [
        ComponentType::TextField,
        ComponentType::TextArea,
        ComponentType::Number,
        ComponentType::Password,
        ComponentType::Checkbox,
        ComponentType::SelectBoxes,
        ComponentType::Select,
        ComponentType::Radio,
        ComponentType::Button,
        ComponentType::Columns,
        ComponentType::Fieldset,
        ComponentType::Panel,
        ComponentType::Table,
        ComponentType::Tabs,
        ComponentType::Well,
    ];

    /// The wire name, also used as the prefix of generated keys.
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentType::TextField => "textfield",
            ComponentType::TextArea => "textarea",
            ComponentType::Number => "number",
            ComponentType::Password => "password",
            ComponentType::Checkbox => "checkbox",
            ComponentType::SelectBoxes => "selectboxes",
            ComponentType::Select => "select",
            ComponentType::Radio => "radio",
            ComponentType::Button => "button",
            ComponentType::Columns => "columns",
            ComponentType::Fieldset => "fieldset",
            ComponentType::Panel => "panel",
            ComponentType::Table => "table",
            ComponentType::Tabs => "tabs",
            ComponentType::Well => "well",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| SchemaError::InvalidType(s.to_string()))
    }
}

// ─── Attribute value types ───────────────────────────────────────────────

/// One selectable option of a choice component.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChoiceOption {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The `data` block of a select component.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectData {
    #[serde(default)]
    pub values: Vec<ChoiceOption>,
}

/// What a button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonAction {
    Submit,
    Reset,
    Event,
}

/// Option source of a select; the only source this builder edits.
pub const SELECT_DATA_SRC: &str = "values";
/// Property of each option used as the stored value.
pub const SELECT_VALUE_PROPERTY: &str = "value";
/// Value coercion mode of a select.
pub const SELECT_DATA_TYPE: &str = "auto";

fn default_data_src() -> String {
    SELECT_DATA_SRC.to_string()
}

fn default_value_property() -> String {
    SELECT_VALUE_PROPERTY.to_string()
}

fn default_data_type() -> String {
    SELECT_DATA_TYPE.to_string()
}

fn is_false(b: &bool) -> bool {
    !*b
}

// ─── Components ──────────────────────────────────────────────────────────

/// Type-specific attributes of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ComponentKind {
    TextField {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
    },
    TextArea {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rows: Option<u32>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Password,
    Checkbox {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    SelectBoxes {
        #[serde(default)]
        values: Vec<ChoiceOption>,
    },
    Select {
        #[serde(default)]
        data: SelectData,
        #[serde(default, skip_serializing_if = "is_false")]
        multiple: bool,
        #[serde(default = "default_data_src")]
        data_src: String,
        #[serde(default = "default_value_property")]
        value_property: String,
        #[serde(default = "default_data_type")]
        data_type: String,
    },
    Radio {
        #[serde(default)]
        values: Vec<ChoiceOption>,
    },
    Button {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        action: Option<ButtonAction>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        disable_on_invalid: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        input: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table_view: Option<bool>,
    },
    Columns,
    Fieldset,
    Panel,
    Table,
    Tabs,
    Well,
}

impl ComponentKind {
    /// Attributes a freshly dropped component of `ty` starts with.
    pub fn defaults(ty: ComponentType) -> Self {
        match ty {
            ComponentType::TextField => ComponentKind::TextField {
                placeholder: None,
                max_length: None,
            },
            ComponentType::TextArea => ComponentKind::TextArea {
                placeholder: None,
                rows: None,
            },
            ComponentType::Number => ComponentKind::Number {
                min: None,
                max: None,
            },
            ComponentType::Password => ComponentKind::Password,
            ComponentType::Checkbox => ComponentKind::Checkbox { name: None },
            ComponentType::SelectBoxes => ComponentKind::SelectBoxes { values: Vec::new() },
            ComponentType::Select => ComponentKind::Select {
                data: SelectData::default(),
                multiple: false,
                data_src: default_data_src(),
                value_property: default_value_property(),
                data_type: default_data_type(),
            },
            ComponentType::Radio => ComponentKind::Radio { values: Vec::new() },
            ComponentType::Button => ComponentKind::Button {
                action: None,
                disable_on_invalid: None,
                input: None,
                table_view: None,
            },
            ComponentType::Columns => ComponentKind::Columns,
            ComponentType::Fieldset => ComponentKind::Fieldset,
            ComponentType::Panel => ComponentKind::Panel,
            ComponentType::Table => ComponentKind::Table,
            ComponentType::Tabs => ComponentKind::Tabs,
            ComponentType::Well => ComponentKind::Well,
        }
    }

    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentKind::TextField { .. } => ComponentType::TextField,
            ComponentKind::TextArea { .. } => ComponentType::TextArea,
            ComponentKind::Number { .. } => ComponentType::Number,
            ComponentKind::Password => ComponentType::Password,
            ComponentKind::Checkbox { .. } => ComponentType::Checkbox,
            ComponentKind::SelectBoxes { .. } => ComponentType::SelectBoxes,
            ComponentKind::Select { .. } => ComponentType::Select,
            ComponentKind::Radio { .. } => ComponentType::Radio,
            ComponentKind::Button { .. } => ComponentType::Button,
            ComponentKind::Columns => ComponentType::Columns,
            ComponentKind::Fieldset => ComponentType::Fieldset,
            ComponentKind::Panel => ComponentType::Panel,
            ComponentKind::Table => ComponentType::Table,
            ComponentKind::Tabs => ComponentType::Tabs,
            ComponentKind::Well => ComponentType::Well,
        }
    }
}

/// A single form field or layout element.
///
/// Wire attributes the builder does not model (`description`, `tooltip`,
/// layout children under `components` or `columns`, ...) ride along in
/// `extra` so a component survives a round trip through the builder widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Unique API key; the component's identity within the schema.
    pub key: ComponentKey,

    pub label: String,

    pub required: bool,

    /// Type tag plus type-specific attributes, flattened into the wire object.
    pub kind: ComponentKind,

    /// Unmodeled wire attributes. Typed fields win on a name clash.
    pub extra: Map<String, Value>,
}

impl Component {
    /// A component of `ty` with its default attributes and palette label.
    pub fn new(ty: ComponentType, key: ComponentKey) -> Self {
        Self {
            key,
            label: ty.display_name().to_string(),
            required: false,
            kind: ComponentKind::defaults(ty),
            extra: Map::new(),
        }
    }

    /// The trailing submit button every schema starts with.
    pub fn submit_button() -> Self {
        Self {
            key: ComponentKey::submit(),
            label: "Submit".to_string(),
            required: false,
            kind: ComponentKind::Button {
                action: None,
                disable_on_invalid: Some(true),
                input: Some(true),
                table_view: Some(false),
            },
            extra: Map::new(),
        }
    }

    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }

    pub fn is_submit_button(&self) -> bool {
        self.key.is_submit() && matches!(self.kind, ComponentKind::Button { .. })
    }

    /// Encode as the flat wire object.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Decode from the flat wire object.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// The modeled half of the wire object.
    fn typed_wire(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let typed = TypedWireRef {
            key: self.key,
            label: &self.label,
            required: self.required,
            kind: &self.kind,
        };
        match serde_json::to_value(typed)? {
            Value::Object(map) => Ok(map),
            other => Err(<serde_json::Error as ser::Error>::custom(format!(
                "component encoded as {other}"
            ))),
        }
    }
}

// ─── Wire form ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TypedWireRef<'a> {
    key: ComponentKey,
    label: &'a str,
    #[serde(skip_serializing_if = "is_false")]
    required: bool,
    #[serde(flatten)]
    kind: &'a ComponentKind,
}

#[derive(Deserialize)]
struct TypedWire {
    key: ComponentKey,
    #[serde(default)]
    label: String,
    #[serde(default)]
    required: bool,
    #[serde(flatten)]
    kind: ComponentKind,
}

/// Optional attributes for which an empty string means "not set". Form
/// inputs left blank (an unpicked select, a cleared number) report `""`.
fn blank_means_unset(ty: ComponentType) -> &'static [&'static str] {
    match ty {
        ComponentType::TextField => &["maxLength"],
        ComponentType::TextArea => &["rows"],
        ComponentType::Number => &["min", "max"],
        ComponentType::Select => &["multiple"],
        ComponentType::Button => &["action", "disableOnInvalid", "input", "tableView"],
        _ => &[],
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut wire = self.typed_wire().map_err(<S::Error as ser::Error>::custom)?;
        for (name, value) in &self.extra {
            wire.entry(name.clone()).or_insert_with(|| value.clone());
        }
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut wire = Map::<String, Value>::deserialize(deserializer)?;

        let ty = wire
            .get("type")
            .and_then(Value::as_str)
            .and_then(|name| name.parse::<ComponentType>().ok());
        if let Some(ty) = ty {
            for name in blank_means_unset(ty) {
                if wire.get(*name).and_then(Value::as_str) == Some("") {
                    wire.remove(*name);
                }
            }
        }

        let typed: TypedWire = serde_json::from_value(Value::Object(wire.clone()))
            .map_err(<D::Error as de::Error>::custom)?;
        let mut component = Component {
            key: typed.key,
            label: typed.label,
            required: typed.required,
            kind: typed.kind,
            extra: Map::new(),
        };
        let modeled = component.typed_wire().map_err(<D::Error as de::Error>::custom)?;
        wire.retain(|name, _| !modeled.contains_key(name));
        component.extra = wire;
        Ok(component)
    }
}

// ─── Schema ──────────────────────────────────────────────────────────────

/// A change notification, drained by the rendering bridge to re-render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaChange {
    Inserted { key: ComponentKey, index: usize },
    Updated { key: ComponentKey },
    Renamed { from: ComponentKey, to: ComponentKey },
    /// The whole list was replaced from the builder widget.
    Synced,
}

/// The form definition for one editing session.
#[derive(Debug, Clone)]
pub struct Schema {
    components: Vec<Component>,
    keys: KeyGenerator,
    changes: Vec<SchemaChange>,
    revision: u64,
}

impl Schema {
    /// A schema holding only the submit button, stamping keys from the host clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_keys(KeyGenerator::default())
    }

    /// A schema whose generated keys are stamped from `clock`.
    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self::with_keys(KeyGenerator::new(clock))
    }

    fn with_keys(keys: KeyGenerator) -> Self {
        Self {
            components: vec![Component::submit_button()],
            keys,
            changes: Vec::new(),
            revision: 0,
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Always false: the submit button is never removed.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, key: ComponentKey) -> Option<&Component> {
        self.components.iter().find(|c| c.key == key)
    }

    pub fn position(&self, key: ComponentKey) -> Option<usize> {
        self.components.iter().position(|c| c.key == key)
    }

    pub fn contains(&self, key: ComponentKey) -> bool {
        self.position(key).is_some()
    }

    /// Insert a component by its wire type name.
    ///
    /// # Errors
    /// `InvalidType` if the name is not a palette type; nothing is inserted.
    pub fn insert(&mut self, type_name: &str) -> Result<Component, SchemaError> {
        let ty = type_name.parse::<ComponentType>().inspect_err(|e| {
            log::warn!("insert rejected: {e}");
        })?;
        Ok(self.insert_type(ty))
    }

    /// Insert a default component of `ty` immediately before the submit button.
    pub fn insert_type(&mut self, ty: ComponentType) -> Component {
        let key = self.fresh_key(ty);
        let component = Component::new(ty, key);
        let index = self.components.len().saturating_sub(1);
        self.components.insert(index, component.clone());
        log::debug!("inserted {ty} as `{key}` at {index}");
        self.notify(SchemaChange::Inserted { key, index });
        component
    }

    /// A deep copy of the component with `key`, isolated from the live schema.
    ///
    /// # Errors
    /// `NotFound` if no component carries the key.
    pub fn select_for_edit(&self, key: ComponentKey) -> Result<Component, SchemaError> {
        self.get(key).cloned().ok_or(SchemaError::NotFound(key))
    }

    /// Replace the entry whose key matches `updated.key`.
    ///
    /// # Errors
    /// `NotFound` if nothing matches (the schema is unchanged), or
    /// `SubmitButtonLocked` if the submit entry would stop being a button.
    pub fn apply_edit(&mut self, updated: Component) -> Result<(), SchemaError> {
        let Some(index) = self.position(updated.key) else {
            log::warn!("edit for `{}` dropped: key not in schema", updated.key);
            return Err(SchemaError::NotFound(updated.key));
        };
        if updated.key.is_submit() && !updated.is_submit_button() {
            return Err(SchemaError::SubmitButtonLocked);
        }
        let key = updated.key;
        self.components[index] = updated;
        log::debug!("updated `{key}` at {index}");
        self.notify(SchemaChange::Updated { key });
        Ok(())
    }

    /// Replace the entry keyed `original` with `updated`, which may carry a
    /// new key. Used when the API key itself was edited.
    ///
    /// # Errors
    /// `NotFound`, `DuplicateKey` if the new key belongs to another entry,
    /// or `SubmitButtonLocked` if the submit button would be re-keyed.
    pub fn replace(&mut self, original: ComponentKey, updated: Component) -> Result<(), SchemaError> {
        if updated.key == original {
            return self.apply_edit(updated);
        }
        let index = self.position(original).ok_or(SchemaError::NotFound(original))?;
        if original.is_submit() || updated.key.is_submit() {
            return Err(SchemaError::SubmitButtonLocked);
        }
        if self.contains(updated.key) {
            return Err(SchemaError::DuplicateKey(updated.key));
        }
        let to = updated.key;
        self.components[index] = updated;
        log::debug!("renamed `{original}` to `{to}` at {index}");
        self.notify(SchemaChange::Renamed { from: original, to });
        Ok(())
    }

    /// Adopt a component list reported by the builder widget, restoring the
    /// submit button as the last entry (recreating it if it went missing).
    ///
    /// # Errors
    /// `DuplicateKey` if two entries share a key, `SubmitButtonLocked` if the
    /// `submit` key is held by a non-button. The schema is unchanged on error.
    pub fn sync_components(&mut self, components: Vec<Component>) -> Result<(), SchemaError> {
        let mut seen = HashSet::with_capacity(components.len());
        for component in &components {
            if !seen.insert(component.key) {
                return Err(SchemaError::DuplicateKey(component.key));
            }
        }

        let mut submit = None;
        let mut body = Vec::with_capacity(components.len() + 1);
        for component in components {
            if component.key.is_submit() {
                if !component.is_submit_button() {
                    return Err(SchemaError::SubmitButtonLocked);
                }
                submit = Some(component);
            } else {
                body.push(component);
            }
        }
        body.push(submit.unwrap_or_else(Component::submit_button));

        log::debug!("synced {} components from builder", body.len());
        self.components = body;
        self.notify(SchemaChange::Synced);
        Ok(())
    }

    /// Take all pending change notifications.
    pub fn drain_changes(&mut self) -> Vec<SchemaChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Monotonic mutation counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn fresh_key(&mut self, ty: ComponentType) -> ComponentKey {
        // A user may have renamed some component to a would-be generated key.
        loop {
            let key = self.keys.next_key(ty.as_str());
            if !self.contains(key) {
                return key;
            }
        }
    }

    fn notify(&mut self, change: SchemaChange) {
        self.revision += 1;
        self.changes.push(change);
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes as the form definition `{"components": [...]}`.
impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut form = serializer.serialize_struct("Schema", 1)?;
        form.serialize_field("components", &self.components)?;
        form.end()
    }
}
