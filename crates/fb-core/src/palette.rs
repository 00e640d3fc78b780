//! The component palette: which types the picker offers, grouped into
//! categories, and the display name each type is dropped with.

use crate::model::ComponentType;
use serde::Serialize;

/// A titled group of palette entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteCategory {
    pub id: &'static str,
    pub title: &'static str,
}

pub const BASIC: PaletteCategory = PaletteCategory {
    id: "basic",
    title: "Basic",
};

pub const LAYOUT: PaletteCategory = PaletteCategory {
    id: "layout",
    title: "Layout",
};

/// Categories in picker order.
pub const PALETTE: [PaletteCategory; 2] = [BASIC, LAYOUT];

impl ComponentType {
    /// Human-readable name; also the default label of a dropped component.
    pub fn display_name(self) -> &'static str {
        match self {
            ComponentType::TextField => "Text Field",
            ComponentType::TextArea => "Text Area",
            ComponentType::Number => "Number",
            ComponentType::Password => "Password",
            ComponentType::Checkbox => "Checkbox",
            ComponentType::SelectBoxes => "Select Boxes",
            ComponentType::Select => "Select",
            ComponentType::Radio => "Radio",
            ComponentType::Button => "Button",
            ComponentType::Columns => "Columns",
            ComponentType::Fieldset => "Fieldset",
            ComponentType::Panel => "Panel",
            ComponentType::Table => "Table",
            ComponentType::Tabs => "Tabs",
            ComponentType::Well => "Well",
        }
    }

    /// The palette category this type is listed under.
    pub fn category(self) -> &'static PaletteCategory {
        match self {
            ComponentType::Columns
            | ComponentType::Fieldset
            | ComponentType::Panel
            | ComponentType::Table
            | ComponentType::Tabs
            | ComponentType::Well => &LAYOUT,
            _ => &BASIC,
        }
    }
}

// ─── Picker view ─────────────────────────────────────────────────────────

/// One draggable entry as shown in the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub label: &'static str,
}

/// One category as shown in the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteSection {
    pub id: &'static str,
    pub title: &'static str,
    pub components: Vec<PaletteEntry>,
}

/// The full picker contents, in display order.
pub fn palette_sections() -> Vec<PaletteSection> {
    PALETTE
        .iter()
        .map(|category| PaletteSection {
            id: category.id,
            title: category.title,
            components: ComponentType::ALL
                .into_iter()
                .filter(|ty| ty.category() == category)
                .map(|ty| PaletteEntry {
                    component_type: ty,
                    label: ty.display_name(),
                })
                .collect(),
        })
        .collect()
}
