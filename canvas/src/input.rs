//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Modifiers` and `Key` capture the user's intent at the time of an event.
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up/leave, carrying what is needed to recompute the dragged quad
//! from the pointer position alone.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::{Point, Quad};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Windows/Linux or Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key as reported by the browser (`KeyboardEvent.key`, e.g. `"ArrowUp"`, `"Delete"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// Unit direction for arrow keys.
    #[must_use]
    pub fn arrow_direction(&self) -> Option<(f64, f64)> {
        match self.0.as_str() {
            "ArrowUp" => Some((0.0, -1.0)),
            "ArrowDown" => Some((0.0, 1.0)),
            "ArrowLeft" => Some((-1.0, 0.0)),
            "ArrowRight" => Some((1.0, 0.0)),
            _ => None,
        }
    }

    /// Only the Delete key removes a block; Backspace is left to text inputs.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete"
    }

    /// Case-insensitive letter match (`"z"` matches `"Z"` reported with Shift held).
    #[must_use]
    pub fn is_letter(&self, letter: char) -> bool {
        let mut chars = self.0.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.eq_ignore_ascii_case(&letter))
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    /// Index of the selected block, if any.
    pub selected_block: Option<usize>,
    /// Corner of the selected block being edited, if any.
    pub active_vertex: Option<usize>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving one corner of a block.
    DraggingVertex {
        block: usize,
        corner: usize,
        /// `corner - pointer` at drag start, so the grabbed point does not jump to the cursor.
        offset: Point,
    },
    /// The user is moving a whole block.
    DraggingBlock {
        block: usize,
        /// Image-space pointer position at drag start.
        start: Point,
        /// Quad at drag start; each move translates this by the total delta.
        orig_quad: Quad,
    },
}

impl InputState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
