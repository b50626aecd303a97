//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! This module defines the types consumed by the interaction controller.
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the active gesture being tracked between
//! pointer-down and pointer-up, carrying the context needed to compute the
//! next mutation on each pointer-move.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::{ElementId, ElementKind, Style};
use crate::geometry::{Point, Rect};
use crate::hit::ResizeAnchor;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pointer / selection / move tool (default).
    #[default]
    Select,
    /// Hand tool: every primary drag pans the canvas.
    Hand,
    /// Place a device frame.
    Frame,
    /// Place a text element.
    Text,
    /// Place an image placeholder.
    Image,
    /// Place a comment note.
    Comment,
    /// Place a rectangle.
    Rectangle,
    /// Place a circle.
    Circle,
}

impl Tool {
    /// The element kind a creation tool places, or `None` for navigation tools.
    #[must_use]
    pub fn creates(self) -> Option<ElementKind> {
        match self {
            Self::Select | Self::Hand => None,
            Self::Frame => Some(ElementKind::Frame),
            Self::Text => Some(ElementKind::Text),
            Self::Image => Some(ElementKind::Image),
            Self::Comment => Some(ElementKind::Comment),
            Self::Rectangle => Some(ElementKind::Rectangle),
            Self::Circle => Some(ElementKind::Circle),
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
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
    /// The platform zoom/shortcut modifier (ctrl or cmd).
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// A component dropped from the palette onto the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDrop {
    /// Kind resolved by the component catalog.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

/// Persistent UI state visible to the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
}

/// Internal state for the input state machine.
///
/// Each active variant carries the gesture context needed to compute the
/// next mutation. Every step is committed as it happens, so returning to
/// `Idle` never has anything left to flush.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the canvas.
    Panning {
        /// Pointer-down screen point minus the pan at that moment; pan is set
        /// to `pointer - anchor` on every move.
        anchor: Point,
    },
    /// The user is moving the current selection.
    Dragging {
        /// Screen-space position of the previous pointer event; deltas are incremental.
        last_screen: Point,
    },
    /// The user is resizing a single element by one of its eight handles.
    Resizing {
        /// Id of the element being resized.
        id: ElementId,
        /// Which corner/edge handle is being dragged.
        anchor: ResizeAnchor,
        /// Screen-space pointer position at the start of the resize.
        start_screen: Point,
        /// Element bounds at the start of the resize.
        start: Rect,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
