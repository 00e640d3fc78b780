//! Editing session: the controller behind the builder page.
//!
//! Owns the schema and the (at most one) open property popup, and turns the
//! rendering layer's events into schema operations:
//!
//! - **drop** → insert a component and open its popup at the drop point
//! - **select** → deep-copy a component into the popup
//! - **change** → record the popup's live draft values
//! - **submit** → merge the submission and write it back to the schema
//! - **cancel** → close the popup, schema untouched

use crate::error::EditError;
use crate::input::{Point, PointerEvent};
use crate::popup::PropertyPopup;
use fb_core::{
    BuilderOptions, Component, ComponentKey, PropertyDescriptor, Schema, SchemaChange,
    SchemaError, Submission,
};
use serde::{Deserialize, Serialize};

/// Which tab of the page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorView {
    /// Builder canvas plus component picker.
    #[default]
    Editor,
    /// Read-only rendering of the current form.
    Preview,
}

// ─── Config ───────────────────────────────────────────────────────────────

/// Configuration for an `EditorSession`.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Where the popup opens when an existing component is selected.
    /// Default: **(100, 100)**.
    pub select_popup_position: Point,

    /// Whether the component picker starts open. Default: **true**.
    pub picker_open: bool,

    /// Tab shown first. Default: **Editor**.
    pub initial_view: EditorView,

    /// Passed through to the builder widget.
    pub builder: BuilderOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            select_popup_position: Point::new(100.0, 100.0),
            picker_open: true,
            initial_view: EditorView::Editor,
            builder: BuilderOptions::default(),
        }
    }
}

// ─── Session ──────────────────────────────────────────────────────────────

/// The editing session holds the authoritative schema for one page lifetime.
pub struct EditorSession {
    schema: Schema,
    config: SessionConfig,
    view: EditorView,
    picker_open: bool,
    popup: Option<PropertyPopup>,
}

impl EditorSession {
    pub fn new(schema: Schema, config: SessionConfig) -> Self {
        Self {
            schema,
            view: config.initial_view,
            picker_open: config.picker_open,
            config,
            popup: None,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn builder_options(&self) -> &BuilderOptions {
        &self.config.builder
    }

    pub fn popup(&self) -> Option<&PropertyPopup> {
        self.popup.as_ref()
    }

    // ─── Drop / select ───────────────────────────────────────────────────

    /// Insert a component of `type_name` and open its popup at `at`.
    ///
    /// # Errors
    /// `InvalidType` for names outside the palette; nothing changes.
    pub fn drop_component(&mut self, type_name: &str, at: Point) -> Result<Component, EditError> {
        let component = self.schema.insert(type_name)?;
        self.popup = Some(PropertyPopup::open(component.clone(), at));
        Ok(component)
    }

    /// Open the popup on a deep copy of the component keyed `key`.
    ///
    /// # Errors
    /// `NotFound` if no such component exists; the current popup stays.
    pub fn select_component(&mut self, key: ComponentKey) -> Result<&PropertyPopup, EditError> {
        let copy = self.schema.select_for_edit(key)?;
        let popup = PropertyPopup::open(copy, self.config.select_popup_position);
        Ok(&*self.popup.insert(popup))
    }

    /// Descriptors of the component being edited, if any.
    pub fn property_form(&self) -> Option<Vec<PropertyDescriptor>> {
        self.popup.as_ref().map(PropertyPopup::descriptors)
    }

    // ─── Change / submit / cancel ────────────────────────────────────────

    /// Record the popup's live values (fired on every keystroke/toggle).
    ///
    /// # Errors
    /// `NoSelection` when no popup is open.
    pub fn record_change(&mut self, values: Submission) -> Result<(), EditError> {
        let popup = self.popup.as_mut().ok_or(EditError::NoSelection)?;
        popup.record_change(values);
        Ok(())
    }

    /// Merge `values` onto the selected component and write it back.
    ///
    /// A renamed API key updates the entry in place. On a merge error or a
    /// key collision the popup stays open so the user can correct it; if the
    /// component disappeared from the schema meanwhile, the edit is dropped
    /// and the popup closes.
    ///
    /// # Errors
    /// `NoSelection`, merge errors, or schema errors.
    pub fn submit(&mut self, values: &Submission) -> Result<Component, EditError> {
        let popup = self.popup.as_ref().ok_or(EditError::NoSelection)?;
        let original_key = popup.component().key;
        let merged = popup.merge(values)?;

        match self.schema.replace(original_key, merged.clone()) {
            Ok(()) => {
                self.popup = None;
                Ok(merged)
            }
            Err(err @ SchemaError::NotFound(_)) => {
                log::warn!("edit dropped: {err}");
                self.popup = None;
                Err(err.into())
            }
            Err(err) => {
                log::warn!("edit rejected: {err}");
                Err(err.into())
            }
        }
    }

    /// Submit the last values reported through `record_change`.
    ///
    /// # Errors
    /// As `submit`.
    pub fn submit_draft(&mut self) -> Result<Component, EditError> {
        let draft = self
            .popup
            .as_ref()
            .map(|popup| popup.draft().clone())
            .ok_or(EditError::NoSelection)?;
        self.submit(&draft)
    }

    /// Close the popup without touching the schema. Any drag in flight ends
    /// with it.
    pub fn cancel(&mut self) {
        if let Some(popup) = self.popup.take() {
            log::debug!("popup for `{}` cancelled", popup.component().key);
        }
    }

    // ─── Builder widget sync ─────────────────────────────────────────────

    /// Adopt the component list reported by the builder widget's own change
    /// event.
    ///
    /// # Errors
    /// Schema errors from `Schema::sync_components`; nothing changes.
    pub fn sync_from_builder(&mut self, components: Vec<Component>) -> Result<(), EditError> {
        self.schema.sync_components(components)?;
        Ok(())
    }

    pub fn drain_changes(&mut self) -> Vec<SchemaChange> {
        self.schema.drain_changes()
    }

    // ─── Popup drag ──────────────────────────────────────────────────────

    pub fn begin_popup_drag(&mut self, pointer: Point) -> bool {
        match self.popup.as_mut() {
            Some(popup) => {
                popup.begin_drag(pointer);
                true
            }
            None => false,
        }
    }

    pub fn drag_popup(&mut self, pointer: Point) -> bool {
        self.popup
            .as_mut()
            .is_some_and(|popup| popup.drag_to(pointer))
    }

    pub fn end_popup_drag(&mut self) {
        if let Some(popup) = self.popup.as_mut() {
            popup.end_drag();
        }
    }

    /// Route a pointer event to the popup. Returns true if it moved.
    pub fn handle_popup_input(&mut self, event: &PointerEvent) -> bool {
        self.popup
            .as_mut()
            .is_some_and(|popup| popup.handle_input(event))
    }

    // ─── Page chrome ─────────────────────────────────────────────────────

    pub fn view(&self) -> EditorView {
        self.view
    }

    pub fn set_view(&mut self, view: EditorView) {
        if self.view != view {
            log::debug!("switching to {view:?} view");
            self.view = view;
        }
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    /// Show or hide the component picker. Returns the new state.
    pub fn toggle_picker(&mut self) -> bool {
        self.picker_open = !self.picker_open;
        self.picker_open
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(Schema::new(), SessionConfig::default())
    }
}
