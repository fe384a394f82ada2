//! Input model: modifier keys, mouse buttons, wheel deltas, and the gesture state machine.
//!
//! `Modifiers` and `Button` capture the user's intent at the time of a pointer
//! event. `InputState` is the active gesture tracked between pointer-down and
//! pointer-up, carrying the anchors needed to turn later pointer positions
//! into absolute transform or element updates. `UiState` is the persistent
//! selection/inspector state read by the renderer and the inspector panel.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::ElementId;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command key.
    pub meta: bool,
}

impl Modifiers {
    /// Whether a zoom modifier (Ctrl, or Command on macOS) is held.
    ///
    /// Browsers also report trackpad pinch gestures as wheel events with
    /// `ctrlKey` set, so pinch zoom arrives through the same path.
    #[must_use]
    pub fn zoom(self) -> bool {
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

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// How wheel events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WheelMode {
    /// Wheel pans; wheel with a zoom modifier zooms.
    #[default]
    PanOrZoom,
    /// Wheel always zooms (read-only diagram viewer).
    Zoom,
}

/// Persistent UI state visible to the renderer and the inspector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// The id of the currently selected element, if any.
    pub selected_id: Option<ElementId>,
    /// Whether the inspector panel is showing the selected element.
    pub inspector_open: bool,
}

/// Tag of the active gesture, without its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
    DraggingElement,
    ResizingElement,
}

/// Internal state for the input state machine.
///
/// Each active variant carries the gesture context fixed at pointer-down.
/// Moves never accumulate deltas; they recompute from the anchor, so a lost
/// move event cannot cause drift.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the canvas by dragging empty space.
    Panning {
        /// Pointer screen position minus the transform offset at pointer-down.
        anchor: Point,
    },
    /// The user is moving an element.
    DraggingElement {
        id: ElementId,
        /// Canvas-space offset from the element origin to the pointer.
        offset: Point,
    },
    /// The user is resizing an element from its bottom-right handle.
    ResizingElement {
        id: ElementId,
        /// Canvas-space pointer position at the start of the resize.
        anchor: Point,
        start_width: f64,
        start_height: f64,
    },
}

impl InputState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        match self {
            Self::Idle => InteractionMode::Idle,
            Self::Panning { .. } => InteractionMode::Panning,
            Self::DraggingElement { .. } => InteractionMode::DraggingElement,
            Self::ResizingElement { .. } => InteractionMode::ResizingElement,
        }
    }

    /// The element targeted by the active gesture, if any.
    #[must_use]
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Self::DraggingElement { id, .. } | Self::ResizingElement { id, .. } => Some(*id),
            Self::Idle | Self::Panning { .. } => None,
        }
    }
}
