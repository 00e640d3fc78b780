//! Input abstraction layer.
//!
//! Normalizes the pointer events the popup header receives into a unified
//! `PointerEvent` enum consumed by the popup drag gesture.

use serde::{Deserialize, Serialize};

/// A point in viewport (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed on the popup header.
    Down { x: f32, y: f32 },

    /// Pointer moved anywhere in the document.
    Move { x: f32, y: f32 },

    /// Pointer released.
    Up { x: f32, y: f32 },

    /// Gesture abandoned (pointer left the window, focus lost, ...).
    Cancel,
}

impl PointerEvent {
    pub fn from_pointer_down(x: f32, y: f32) -> Self {
        Self::Down { x, y }
    }

    pub fn from_pointer_move(x: f32, y: f32) -> Self {
        Self::Move { x, y }
    }

    pub fn from_pointer_up(x: f32, y: f32) -> Self {
        Self::Up { x, y }
    }
}
