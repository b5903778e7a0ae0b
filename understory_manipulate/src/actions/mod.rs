// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action handlers: turning pointer positions into property changes.
//!
//! Every handler has the [`ActionHandler`] signature. It receives the input
//! that triggered it, the gesture state, an [`ActionContext`] with the target
//! object, and the pointer position in world space. It returns whether the
//! object changed.
//!
//! Handlers are built by composing plain `fn` items:
//!
//! - [`with_fixed_anchor`] keeps the gesture anchor in place across the
//!   wrapped change,
//! - [`with_fire_event`] queues a notification when the wrapped handler
//!   reports a change.
//!
//! The public handlers ([`scaling_equally`], [`rotation_with_snapping`], ...)
//! are such compositions and are what the default control sets install.

mod drag;
mod resize;
mod rotate;
mod scale;
mod skew;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;
use understory_affine::radians_to_degrees;

use crate::control::Control;
use crate::event::{CanvasEvent, EventKind};
use crate::input::PointerInput;
use crate::object::InteractiveObject;
use crate::options::CanvasOptions;
use crate::origin::Origin;
use crate::transform::Transform;

pub use drag::drag_handler;
pub use resize::{change_width, change_width_unwrapped};
pub use rotate::{rotate_object_with_snapping, rotation_style_handler, rotation_with_snapping};
pub use scale::{
    ScaleBy, scale_cursor_style_handler, scale_is_proportional, scale_object,
    scale_object_from_corner, scale_object_x, scale_object_y, scale_or_skew_action_name,
    scale_skew_cursor_style_handler, scaling_equally, scaling_is_forbidden, scaling_x,
    scaling_x_or_skewing_y, scaling_y, scaling_y_or_skewing_x,
};
pub use skew::{
    compensate_scale_for_skew, skew_cursor_style_handler, skew_handler_x, skew_handler_y,
    skew_object_x, skew_object_y,
};

/// Runs on every pointer move of a gesture.
///
/// Arguments are the triggering input, the gesture, the context and the
/// pointer position in world space. Returns whether the object changed.
pub type ActionHandler =
    fn(&PointerInput, &mut Transform, &mut ActionContext<'_>, Point) -> bool;

/// Runs when a gesture on a control starts or ends.
pub type MouseHandler = ActionHandler;

/// What a handler may touch while it runs.
#[derive(Debug)]
pub struct ActionContext<'a> {
    /// The object being manipulated.
    pub target: &'a mut InteractiveObject,
    /// Canvas-wide settings.
    pub options: &'a CanvasOptions,
    events: &'a mut Vec<CanvasEvent>,
}

impl<'a> ActionContext<'a> {
    /// Creates a context that queues notifications into `events`.
    pub fn new(
        target: &'a mut InteractiveObject,
        options: &'a CanvasOptions,
        events: &'a mut Vec<CanvasEvent>,
    ) -> Self {
        Self {
            target,
            options,
            events,
        }
    }

    /// Queues a notification about the gesture.
    pub fn fire(
        &mut self,
        kind: EventKind,
        input: &PointerInput,
        transform: &Transform,
        pointer: Point,
    ) {
        self.events.push(CanvasEvent {
            target: Some(transform.target),
            transform: Some(*transform),
            input: Some(*input),
            pointer: Some(pointer),
            ..CanvasEvent::new(kind)
        });
    }
}

/// Does nothing and reports no change.
pub fn noop_action(
    _input: &PointerInput,
    _transform: &mut Transform,
    _ctx: &mut ActionContext<'_>,
    _pointer: Point,
) -> bool {
    false
}

/// Runs `handler`, then moves the object so the point at the gesture anchor
/// is where it was before.
///
/// The anchor is read again after `handler` returns: a handler that flips
/// the object also moves the anchor to the opposite side, which is where the
/// old anchor point now lies.
pub fn with_fixed_anchor(
    handler: ActionHandler,
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    let constraint = ctx
        .target
        .position_by_origin(transform.origin_x, transform.origin_y);
    let changed = handler(input, transform, ctx, pointer);
    ctx.target
        .set_position_by_origin(constraint, transform.origin_x, transform.origin_y);
    changed
}

/// Runs `handler` and queues a `kind` notification if it changed the object.
pub fn with_fire_event(
    kind: EventKind,
    handler: ActionHandler,
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    let changed = handler(input, transform, ctx, pointer);
    if changed {
        ctx.fire(kind, input, transform, pointer);
    }
    changed
}

/// `pointer` in the target's unrotated frame, relative to the point at
/// `origin_x`/`origin_y`.
///
/// The padding is removed from both axes and the control offset of the
/// gesture's control is subtracted, so that grabbing a handle reads as
/// grabbing the box edge.
#[must_use]
pub fn get_local_point(
    transform: &Transform,
    target: &InteractiveObject,
    origin_x: Origin,
    origin_y: Origin,
    pointer: Point,
) -> Point {
    let zoom = target.zoom();
    let padding = if zoom != 0.0 {
        target.options().padding / zoom
    } else {
        target.options().padding
    };
    let mut local = target.to_local_point(pointer, origin_x, origin_y);
    if local.x >= padding {
        local.x -= padding;
    }
    if local.x <= -padding {
        local.x += padding;
    }
    if local.y >= padding {
        local.y -= padding;
    }
    if local.y <= -padding {
        local.y += padding;
    }
    if let Some(control) = transform.corner.and_then(|key| target.control(key)) {
        let (offset_x, offset_y) = control.offset();
        local.x -= offset_x;
        local.y -= offset_y;
    }
    local
}

/// Which of the eight compass octants a control faces, starting east and
/// turning clockwise, with `8` wrapping back to east.
#[must_use]
pub fn find_corner_quadrant(object: &InteractiveObject, control: &Control) -> usize {
    let angle = (object.total_angle() + radians_to_degrees(control.y().atan2(control.x())) + 360.0)
        .rem_euclid(360.0);
    let octant = (angle / 45.0).round();
    if octant.is_finite() {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "octant is a finite value in 0..=8"
        )]
        let octant = octant as usize;
        octant.min(8)
    } else {
        0
    }
}

/// Whether the canvas' alternate action key is held.
pub(crate) fn is_alt_action(input: &PointerInput, options: &CanvasOptions) -> bool {
    input.is_pressed(options.alt_action_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ControlCatalog;
    use crate::control::ControlKey;
    use crate::props::TransformProps;

    #[test]
    fn quadrants_follow_rotation() {
        let mut object = InteractiveObject::new(TransformProps::new(0.0, 0.0, 10.0, 10.0));
        let catalog = ControlCatalog::object();
        let mr = catalog.get(ControlKey::MR).unwrap();
        let br = catalog.get(ControlKey::BR).unwrap();
        let mt = catalog.get(ControlKey::MT).unwrap();
        assert_eq!(find_corner_quadrant(&object, mr), 0);
        assert_eq!(find_corner_quadrant(&object, br), 1);
        assert_eq!(find_corner_quadrant(&object, mt), 6);
        object.set_angle(90.0);
        assert_eq!(find_corner_quadrant(&object, mr), 2);
        assert_eq!(find_corner_quadrant(&object, mt), 0);
    }
}
