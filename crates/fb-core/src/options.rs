//! Builder options passed through unchanged to the form.io builder widget.

use crate::model::ComponentType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ─── Config ───────────────────────────────────────────────────────────────

/// Which of the widget's built-in palette groups are offered.
///
/// All disabled by default: the app supplies its own palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderCapabilities {
    pub basic: bool,
    pub advanced: bool,
    pub data: bool,
    pub premium: bool,
    pub layout: bool,
    pub custom: bool,
}

/// Visibility of one field inside an edit-form tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditFormField {
    pub key: String,
    pub ignore: bool,
}

/// Visibility of one tab of the widget's own edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditFormTab {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<EditFormField>,
}

impl EditFormTab {
    fn shown(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ignore: Some(false),
            components: Vec::new(),
        }
    }

    fn hidden(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ignore: Some(true),
            components: Vec::new(),
        }
    }
}

/// Options handed to the builder widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderOptions {
    pub builder: BuilderCapabilities,

    /// Per-type edit-form tab visibility.
    #[serde(default)]
    pub edit_form: BTreeMap<ComponentType, Vec<EditFormTab>>,

    /// Suppress the widget's own default submit control. Default: **true**.
    pub no_default_submit_button: bool,

    /// Allow editing dropped components. Default: **true**.
    pub allow_editing: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        let display = EditFormTab {
            key: "display".to_string(),
            ignore: None,
            components: ["label", "placeholder", "description", "tooltip", "prefix", "suffix"]
                .into_iter()
                .map(|key| EditFormField {
                    key: key.to_string(),
                    ignore: false,
                })
                .collect(),
        };
        let textfield_tabs = vec![
            display,
            EditFormTab::shown("data"),
            EditFormTab::shown("validation"),
            EditFormTab::hidden("api"),
            EditFormTab::hidden("conditional"),
            EditFormTab::hidden("logic"),
        ];

        Self {
            builder: BuilderCapabilities::default(),
            edit_form: BTreeMap::from([(ComponentType::TextField, textfield_tabs)]),
            no_default_submit_button: true,
            allow_editing: true,
        }
    }
}
