// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas-wide and per-object configuration.

use ui_events::keyboard::Modifiers;

use crate::cursor::CursorStyle;
use crate::props::Locks;

/// Canvas-wide interaction settings.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasOptions {
    /// Corner handles keep the aspect ratio unless [`uni_scale_key`](Self::uni_scale_key) is held.
    pub uniform_scaling: bool,
    /// Modifier that inverts [`uniform_scaling`](Self::uniform_scaling) while held.
    pub uni_scale_key: Modifiers,
    /// Scale about the object center instead of the opposite handle.
    pub centered_scaling: bool,
    /// Rotate about the object center.
    pub centered_rotation: bool,
    /// Modifier that inverts the centered behavior while held.
    pub centered_key: Modifiers,
    /// Modifier that turns side handles from scaling into skewing.
    pub alt_action_key: Modifiers,
    /// Report right-button presses as `mouse:down`/`mouse:up`.
    pub fire_right_click: bool,
    /// Report middle-button presses as `mouse:down`/`mouse:up`.
    pub fire_middle_click: bool,
    /// Keep the active object at its stacking position for hit testing
    /// instead of treating it as topmost.
    pub preserve_object_stacking: bool,
    /// Pointer travel, in view pixels, under which a press still counts as a click.
    pub click_tolerance: f64,
    /// Cursor over empty canvas.
    pub default_cursor: CursorStyle,
    /// Cursor over an object body.
    pub hover_cursor: CursorStyle,
    /// Cursor while dragging an object.
    pub move_cursor: CursorStyle,
    /// Cursor over something that cannot be manipulated.
    pub not_allowed_cursor: CursorStyle,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            uniform_scaling: true,
            uni_scale_key: Modifiers::SHIFT,
            centered_scaling: false,
            centered_rotation: false,
            centered_key: Modifiers::ALT,
            alt_action_key: Modifiers::SHIFT,
            fire_right_click: false,
            fire_middle_click: false,
            preserve_object_stacking: false,
            click_tolerance: 0.0,
            default_cursor: CursorStyle::Default,
            hover_cursor: CursorStyle::Move,
            move_cursor: CursorStyle::Move,
            not_allowed_cursor: CursorStyle::NotAllowed,
        }
    }
}

/// Per-object interaction settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectOptions {
    /// Extra space between the object and its hit area / handles, in view pixels.
    pub padding: f64,
    /// Side of a square mouse handle, in view pixels.
    pub corner_size: f64,
    /// Side of a square touch handle, in view pixels.
    pub touch_corner_size: f64,
    /// Manipulation restrictions.
    pub locks: Locks,
    /// Rotation snaps to multiples of this many degrees; `0` disables snapping.
    pub snap_angle: f64,
    /// Snapping distance in degrees; unset or non-positive means [`snap_angle`](Self::snap_angle).
    pub snap_threshold: Option<f64>,
    /// Scale about the center, combined with the canvas setting.
    pub centered_scaling: bool,
    /// Rotate about the center, combined with the canvas setting.
    pub centered_rotation: bool,
    /// Smallest scale magnitude the setters accept.
    pub min_scale_limit: f64,
    /// The object can become the active object.
    pub selectable: bool,
    /// The object takes part in pointer hit testing.
    pub evented: bool,
    /// The object is shown and hit-testable.
    pub visible: bool,
    /// Handles are shown and hit-testable when active.
    pub has_controls: bool,
    /// Cursor over the body; falls back to the canvas hover cursor.
    pub hover_cursor: Option<CursorStyle>,
    /// Cursor while dragging; falls back to the canvas move cursor.
    pub move_cursor: Option<CursorStyle>,
}

impl Default for ObjectOptions {
    fn default() -> Self {
        Self {
            padding: 0.0,
            corner_size: 13.0,
            touch_corner_size: 24.0,
            locks: Locks::empty(),
            snap_angle: 0.0,
            snap_threshold: None,
            centered_scaling: false,
            centered_rotation: true,
            min_scale_limit: 0.0,
            selectable: true,
            evented: true,
            visible: true,
            has_controls: true,
            hover_cursor: None,
            move_cursor: None,
        }
    }
}

/// Whether `key` is non-empty and at least one of its modifiers is held.
pub(crate) fn modifier_held(held: Modifiers, key: Modifiers) -> bool {
    !key.is_empty() && held.intersects(key)
}
