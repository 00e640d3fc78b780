//! WASM bridge for the form builder. Exposes the editing session to the
//! JavaScript page hosting the form.io builder and renderer.
//!
//! Compiled via `wasm-pack build --target web`. Every fallible call returns
//! JSON: `{"ok":true,...}` or `{"ok":false,"error":"..."}`.

mod formio;

use fb_core::{Component, ComponentKey, Schema, Submission, palette_sections};
use fb_editor::{EditorSession, EditorView, Point, PointerEvent, SessionConfig};
use serde::Deserialize;
use serde_json::{Value, json};
use wasm_bindgen::prelude::*;

/// Payload of the builder widget's change event.
#[derive(Deserialize)]
struct BuilderSchema {
    components: Vec<Component>,
}

/// The WASM-facing form editor.
///
/// Holds the editing session. All interaction from the page goes through
/// this struct.
#[wasm_bindgen]
pub struct FormEditor {
    session: EditorSession,
}

#[wasm_bindgen]
impl FormEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        Self {
            session: EditorSession::new(host_schema(), SessionConfig::default()),
        }
    }

    // ─── Schema ──────────────────────────────────────────────────────────

    /// The current schema, `{"components":[...]}`, fed to builder and preview.
    pub fn get_schema_json(&self) -> String {
        serde_json::to_string(self.session.schema())
            .unwrap_or_else(|_| r#"{"components":[]}"#.to_string())
    }

    /// Options passed to the builder widget.
    pub fn get_builder_options_json(&self) -> String {
        serde_json::to_string(self.session.builder_options()).unwrap_or_else(|_| "{}".to_string())
    }

    /// True once per batch of schema changes; the page re-renders on true.
    pub fn take_schema_changed(&mut self) -> bool {
        !self.session.drain_changes().is_empty()
    }

    pub fn schema_revision(&self) -> f64 {
        self.session.schema().revision() as f64
    }

    /// Adopt the builder widget's own edits (drag-reorder, delete, ...).
    pub fn sync_builder_schema(&mut self, json: &str) -> String {
        let parsed: BuilderSchema = match serde_json::from_str(json) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("rejected builder schema: {e}");
                return error_json(&e);
            }
        };
        match self.session.sync_from_builder(parsed.components) {
            Ok(()) => ok_json(json!({})),
            Err(e) => error_json(&e),
        }
    }

    // ─── Drop / select ───────────────────────────────────────────────────

    /// A palette entry was dropped at client coordinates (x, y).
    pub fn drop_component(&mut self, type_name: &str, x: f32, y: f32) -> String {
        match self.session.drop_component(type_name, Point::new(x, y)) {
            Ok(component) => ok_json(json!({ "component": component })),
            Err(e) => error_json(&e),
        }
    }

    /// An existing component was clicked in the builder.
    pub fn select_component(&mut self, key: &str) -> String {
        match self.session.select_component(ComponentKey::intern(key)) {
            Ok(popup) => ok_json(json!({ "component": popup.component() })),
            Err(e) => error_json(&e),
        }
    }

    // ─── Property popup ──────────────────────────────────────────────────

    /// `{"title","position","form"}` for the open popup, or `null`.
    pub fn get_popup_json(&self) -> String {
        let Some(popup) = self.session.popup() else {
            return "null".to_string();
        };
        let descriptors = popup.descriptors();
        json!({
            "title": popup.title(),
            "position": popup.position(),
            "form": formio::property_form(&descriptors)
        })
        .to_string()
    }

    /// The popup form's change event. Returns false if nothing is open or
    /// the payload is not an object.
    pub fn handle_property_change(&mut self, json: &str) -> bool {
        let Some(values) = parse_submission(json) else {
            return false;
        };
        self.session.record_change(values).is_ok()
    }

    /// The popup form's submit event, with the submission's `data`.
    pub fn submit_property_form(&mut self, json: &str) -> String {
        let Some(values) = parse_submission(json) else {
            return json!({ "ok": false, "error": "submission must be a JSON object" }).to_string();
        };
        match self.session.submit(&values) {
            Ok(component) => ok_json(json!({ "component": component })),
            Err(e) => error_json(&e),
        }
    }

    /// Submit whatever the change event last reported.
    pub fn submit_property_draft(&mut self) -> String {
        match self.session.submit_draft() {
            Ok(component) => ok_json(json!({ "component": component })),
            Err(e) => error_json(&e),
        }
    }

    pub fn cancel_property_form(&mut self) {
        self.session.cancel();
    }

    pub fn is_popup_open(&self) -> bool {
        self.session.popup().is_some()
    }

    // ─── Popup drag ──────────────────────────────────────────────────────

    /// Pointer pressed on the popup header.
    pub fn popup_pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.session
            .handle_popup_input(&PointerEvent::from_pointer_down(x, y))
    }

    /// Returns true if the popup moved.
    pub fn popup_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.session
            .handle_popup_input(&PointerEvent::from_pointer_move(x, y))
    }

    pub fn popup_pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.session
            .handle_popup_input(&PointerEvent::from_pointer_up(x, y))
    }

    pub fn popup_pointer_cancel(&mut self) {
        self.session.handle_popup_input(&PointerEvent::Cancel);
    }

    // ─── Page chrome ─────────────────────────────────────────────────────

    /// `"editor"` or `"preview"`.
    pub fn get_view(&self) -> String {
        match self.session.view() {
            EditorView::Editor => "editor",
            EditorView::Preview => "preview",
        }
        .to_string()
    }

    /// Switch tabs. Returns false for an unknown view name.
    pub fn set_view(&mut self, name: &str) -> bool {
        let view = match name {
            "editor" => EditorView::Editor,
            "preview" => EditorView::Preview,
            _ => return false,
        };
        self.session.set_view(view);
        true
    }

    pub fn is_picker_open(&self) -> bool {
        self.session.is_picker_open()
    }

    pub fn toggle_picker(&mut self) -> bool {
        self.session.toggle_picker()
    }
}

impl Default for FormEditor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Standalone functions (no editor needed) ─────────────────────────────

/// The component picker's sections as JSON.
#[wasm_bindgen]
pub fn palette_json() -> String {
    serde_json::to_string(&palette_sections()).unwrap_or_else(|_| "[]".to_string())
}

// ─── Helpers ─────────────────────────────────────────────────────────────

fn ok_json(mut body: Value) -> String {
    if let Value::Object(map) = &mut body {
        map.insert("ok".into(), Value::Bool(true));
    }
    body.to_string()
}

fn error_json(e: &dyn std::fmt::Display) -> String {
    json!({ "ok": false, "error": e.to_string() }).to_string()
}

fn parse_submission(json: &str) -> Option<Submission> {
    match serde_json::from_str(json) {
        Ok(values) => Some(values),
        Err(e) => {
            log::warn!("ignoring malformed property values: {e}");
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn host_schema() -> Schema {
    fn host_clock() -> u64 {
        js_sys::Date::now() as u64
    }
    Schema::with_clock(host_clock)
}

#[cfg(not(target_arch = "wasm32"))]
fn host_schema() -> Schema {
    Schema::new()
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("form builder WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
