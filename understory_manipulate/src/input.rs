// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input as seen by the manipulation layer.

use kurbo::Point;
use ui_events::keyboard::Modifiers;
use ui_events::pointer::{PointerButton, PointerEvent, PointerId, PointerType, PointerUpdate};

use crate::options::modifier_held;

/// The phase of a pointer event that the coordinator acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    /// A button was pressed or a touch started.
    Down,
    /// The pointer moved.
    Move,
    /// A button was released or a touch ended.
    Up,
}

/// A single pointer sample.
///
/// `position` is in view (device-independent pixel) coordinates; the canvas
/// maps it to world coordinates through its viewport before calling action
/// handlers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    /// Pointer position in view coordinates.
    pub position: Point,
    /// The button that changed state, for down/up samples.
    pub button: Option<PointerButton>,
    /// The kind of device.
    pub pointer_type: PointerType,
    /// Device-assigned pointer id, used to tell touches apart.
    pub pointer_id: Option<PointerId>,
    /// Modifier keys held during the sample.
    pub modifiers: Modifiers,
}

impl PointerInput {
    /// A primary-button mouse sample at `position` with no modifiers.
    #[must_use]
    pub fn mouse(position: Point) -> Self {
        Self {
            position,
            button: Some(PointerButton::Primary),
            pointer_type: PointerType::Mouse,
            pointer_id: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// A touch sample at `position` for the touch identified by `id`.
    #[must_use]
    pub fn touch(position: Point, id: Option<PointerId>) -> Self {
        Self {
            position,
            button: Some(PointerButton::Primary),
            pointer_type: PointerType::Touch,
            pointer_id: id,
            modifiers: Modifiers::empty(),
        }
    }

    /// Replaces the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replaces the button.
    #[must_use]
    pub fn with_button(mut self, button: Option<PointerButton>) -> Self {
        self.button = button;
        self
    }

    /// Whether any modifier of `key` is held. An empty `key` is never held.
    #[must_use]
    pub fn is_pressed(&self, key: Modifiers) -> bool {
        modifier_held(self.modifiers, key)
    }

    /// Whether the sample comes from a touch screen.
    #[must_use]
    pub fn is_touch(&self) -> bool {
        self.pointer_type == PointerType::Touch
    }

    /// Extracts a sample from a `ui-events` pointer event.
    ///
    /// Returns `None` for events the coordinator does not act on (scroll,
    /// gestures, enter/leave, cancel).
    #[must_use]
    pub fn from_event(event: &PointerEvent) -> Option<(PointerPhase, Self)> {
        match event {
            PointerEvent::Down(e) => Some((
                PointerPhase::Down,
                Self {
                    position: e.state.logical_point(),
                    button: e.button,
                    pointer_type: e.pointer.pointer_type,
                    pointer_id: e.pointer.pointer_id,
                    modifiers: e.state.modifiers,
                },
            )),
            PointerEvent::Up(e) => Some((
                PointerPhase::Up,
                Self {
                    position: e.state.logical_point(),
                    button: e.button,
                    pointer_type: e.pointer.pointer_type,
                    pointer_id: e.pointer.pointer_id,
                    modifiers: e.state.modifiers,
                },
            )),
            PointerEvent::Move(PointerUpdate {
                pointer, current, ..
            }) => Some((
                PointerPhase::Move,
                Self {
                    position: current.logical_point(),
                    button: None,
                    pointer_type: pointer.pointer_type,
                    pointer_id: pointer.pointer_id,
                    modifiers: current.modifiers,
                },
            )),
            _ => None,
        }
    }
}
