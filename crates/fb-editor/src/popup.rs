//! Property popup: the pending selection, its live draft values, and the
//! popup's on-screen position.
//!
//! Repositioning is an explicit gesture: `PopupDrag` exists only between a
//! pointer-down on the header and the matching release (or abandon). It is
//! owned by the popup, so closing the popup also ends any gesture in flight.

use crate::input::{Point, PointerEvent};
use fb_core::{Component, MergeError, PropertyDescriptor, Submission, generate, merge_edit};

// ─── Drag gesture ────────────────────────────────────────────────────────

/// An in-flight popup drag. Records where inside the popup the pointer
/// grabbed it, so the popup follows the pointer without jumping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupDrag {
    grab_dx: f32,
    grab_dy: f32,
}

impl PopupDrag {
    /// Start a gesture with the pointer at `pointer` and the popup at `origin`.
    pub fn begin(pointer: Point, origin: Point) -> Self {
        Self {
            grab_dx: pointer.x - origin.x,
            grab_dy: pointer.y - origin.y,
        }
    }

    /// Popup position that keeps the grab offset under `pointer`.
    pub fn follow(&self, pointer: Point) -> Point {
        Point::new(pointer.x - self.grab_dx, pointer.y - self.grab_dy)
    }
}

// ─── Popup ───────────────────────────────────────────────────────────────

/// The open property editor for one component.
#[derive(Debug, Clone)]
pub struct PropertyPopup {
    /// Deep copy taken at selection time; the live schema is untouched
    /// until the form is submitted.
    original: Component,
    /// Latest field values reported by the change event.
    draft: Submission,
    position: Point,
    drag: Option<PopupDrag>,
}

impl PropertyPopup {
    pub fn open(original: Component, position: Point) -> Self {
        log::debug!("popup opened for `{}`", original.key);
        Self {
            original,
            draft: Submission::new(),
            position,
            drag: None,
        }
    }

    pub fn component(&self) -> &Component {
        &self.original
    }

    pub fn title(&self) -> String {
        format!("Properties for {}", self.original.label)
    }

    /// Property-editor fields for the selected component, regenerated on
    /// every call.
    pub fn descriptors(&self) -> Vec<PropertyDescriptor> {
        generate(&self.original)
    }

    pub fn record_change(&mut self, values: Submission) {
        self.draft = values;
    }

    pub fn draft(&self) -> &Submission {
        &self.draft
    }

    /// Merge a submission onto the selected component.
    ///
    /// # Errors
    /// Propagates the merge policy's errors.
    pub fn merge(&self, submitted: &Submission) -> Result<Component, MergeError> {
        merge_edit(&self.original, submitted)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn begin_drag(&mut self, pointer: Point) {
        self.drag = Some(PopupDrag::begin(pointer, self.position));
    }

    /// Follow the pointer. Returns true if the popup moved.
    pub fn drag_to(&mut self, pointer: Point) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let next = drag.follow(pointer);
        if next == self.position {
            return false;
        }
        log::trace!("popup moved to ({}, {})", next.x, next.y);
        self.position = next;
        true
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Route a pointer event through the drag gesture. Returns true if the
    /// popup moved.
    pub fn handle_input(&mut self, event: &PointerEvent) -> bool {
        match *event {
            PointerEvent::Down { x, y } => {
                self.begin_drag(Point::new(x, y));
                false
            }
            PointerEvent::Move { x, y } => self.drag_to(Point::new(x, y)),
            PointerEvent::Up { x, y } => {
                let moved = self.drag_to(Point::new(x, y));
                self.end_drag();
                moved
            }
            PointerEvent::Cancel => {
                self.end_drag();
                false
            }
        }
    }
}
