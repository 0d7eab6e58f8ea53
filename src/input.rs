//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the gesture being tracked between pointer-down and
//! pointer-up (or an open text edit), carrying the drag origin needed to
//! recompute geometry from the cumulative delta and to commit on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::element::{ElementDraft, ElementId};
use crate::transform::{DragOrigin, ResizeHandle};
use crate::view::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Create a text element.
    Text,
    /// Create a rectangle.
    Rectangle,
    /// Create a circle.
    Circle,
    /// Create a line.
    Line,
    /// Insert an image from a user-supplied file.
    Image,
    /// Icon placement. No creation path exists yet; selecting it is a no-op on the canvas.
    Icon,
}

impl Tool {
    /// Tool bound to a single-letter shortcut (`v`, `t`, `r`, `c`, `l`), case-insensitive.
    #[must_use]
    pub fn from_shortcut(key: &str) -> Option<Self> {
        match key {
            "v" | "V" => Some(Self::Select),
            "t" | "T" => Some(Self::Text),
            "r" | "R" => Some(Self::Rectangle),
            "c" | "C" => Some(Self::Circle),
            "l" | "L" => Some(Self::Line),
            _ => None,
        }
    }

    /// Default element this tool creates when clicking at `at` (canvas units).
    #[must_use]
    pub fn draft_at(self, at: Point) -> Option<ElementDraft> {
        match self {
            Self::Text => Some(ElementDraft::text_at(at)),
            Self::Rectangle => Some(ElementDraft::rectangle_at(at)),
            Self::Circle => Some(ElementDraft::circle_at(at)),
            Self::Line => Some(ElementDraft::line_at(at)),
            Self::Select | Self::Image | Self::Icon => None,
        }
    }
}

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
    /// Ctrl on most platforms, Cmd on macOS.
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
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the host (e.g. `"Delete"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether this key matches `letter` ignoring case.
    #[must_use]
    pub fn is_letter(&self, letter: char) -> bool {
        let mut chars = self.0.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.eq_ignore_ascii_case(&letter))
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries the gesture context needed to recompute
/// geometry on every pointer-move and to commit on pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an element across the canvas.
    Moving {
        /// Id of the element being dragged.
        id: ElementId,
        /// Screen-space pointer position at pointer-down.
        start_screen: Point,
        /// Element geometry at pointer-down.
        origin: DragOrigin,
    },
    /// The user is resizing an element by dragging one of its eight handles.
    Resizing {
        /// Id of the element being resized.
        id: ElementId,
        /// Which corner/edge handle is being dragged.
        handle: ResizeHandle,
        /// Screen-space pointer position at pointer-down.
        start_screen: Point,
        /// Element geometry at pointer-down.
        origin: DragOrigin,
    },
    /// The user is rotating an element by dragging the rotate handle.
    Rotating {
        /// Id of the element being rotated.
        id: ElementId,
        /// Element geometry at pointer-down; its center is the pivot.
        origin: DragOrigin,
    },
    /// A text element's content is being edited in place.
    EditingText {
        /// Id of the text element.
        id: ElementId,
        /// Content when editing started, used to skip no-op commits.
        original: String,
    },
}

impl InputState {
    /// Id of the element the active gesture targets, if any.
    #[must_use]
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Self::Idle => None,
            Self::Moving { id, .. }
            | Self::Resizing { id, .. }
            | Self::Rotating { id, .. }
            | Self::EditingText { id, .. } => Some(*id),
        }
    }

    /// Whether a pointer gesture (move/resize/rotate) is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Moving { .. } | Self::Resizing { .. } | Self::Rotating { .. })
    }
}
