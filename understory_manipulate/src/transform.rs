// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-gesture state.

use kurbo::Point;

use crate::actions::ActionHandler;
use crate::canvas::ObjectId;
use crate::control::{ActionName, ControlKey};
use crate::origin::Origin;
use crate::props::TransformSnapshot;

/// The state of one manipulation gesture, from pointer-down to pointer-up.
///
/// Action handlers read the gesture's starting values from here and update
/// the anchor (`origin_x`/`origin_y`) and sign trackers as the pointer crosses
/// the anchor.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    /// The object being manipulated.
    pub target: ObjectId,
    /// What the gesture does.
    pub action: ActionName,
    /// The control that started the gesture; `None` for body drags.
    pub corner: Option<ControlKey>,
    /// Handler run on every move.
    pub action_handler: ActionHandler,
    /// Properties at gesture start, with the initial anchor.
    pub original: TransformSnapshot,
    /// Current horizontal anchor.
    pub origin_x: Origin,
    /// Current vertical anchor.
    pub origin_y: Origin,
    /// Horizontal scale at gesture start.
    pub scale_x: f64,
    /// Vertical scale at gesture start.
    pub scale_y: f64,
    /// Horizontal skew at gesture start.
    pub skew_x: f64,
    /// Vertical skew at gesture start.
    pub skew_y: f64,
    /// Pointer minus `left`, in world space, at gesture start.
    pub offset_x: f64,
    /// Pointer minus `top`, in world space, at gesture start.
    pub offset_y: f64,
    /// Pointer x at gesture start, in world space.
    pub ex: f64,
    /// Pointer y at gesture start, in world space.
    pub ey: f64,
    /// Most recent pointer x, in world space.
    pub last_x: f64,
    /// Most recent pointer y, in world space.
    pub last_y: f64,
    /// Object angle at gesture start, in radians.
    pub theta: f64,
    /// Side of the anchor the pointer was on horizontally, once known.
    pub sign_x: Option<f64>,
    /// Side of the anchor the pointer was on vertically, once known.
    pub sign_y: Option<f64>,
    /// Pinch factor relative to gesture start, for gesture-driven scaling.
    pub gesture_scale: Option<f64>,
    /// Whether shift was held on the last event.
    pub shift_key: bool,
    /// Whether the centering key was held on the last event.
    pub alt_key: bool,
    /// Whether any move so far changed the object.
    pub action_performed: bool,
}

impl Transform {
    /// Whether the gesture is anchored at the object center.
    #[must_use]
    pub fn is_centered(&self) -> bool {
        self.origin_x.is_center() && self.origin_y.is_center()
    }

    /// The pointer position at gesture start.
    #[must_use]
    pub fn start_point(&self) -> Point {
        Point::new(self.ex, self.ey)
    }
}
