// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;
use understory_affine::radians_to_degrees;

use super::{
    ActionContext, find_corner_quadrant, get_local_point, with_fire_event, with_fixed_anchor,
};
use crate::control::Control;
use crate::cursor::{CursorStyle, SKEW_MAP};
use crate::event::EventKind;
use crate::input::PointerInput;
use crate::object::{DimensionOverrides, InteractiveObject};
use crate::options::CanvasOptions;
use crate::origin::Origin;
use crate::props::Locks;
use crate::transform::Transform;

/// Pointer travel, in object units, below which the skew resets to zero.
const MIN_SKEW_TRAVEL: f64 = 2.0;

/// Axis-aligned skew cursor, or the not-allowed cursor when the relevant
/// skew is locked.
pub fn skew_cursor_style_handler(
    _input: &PointerInput,
    control: &Control,
    object: &InteractiveObject,
    options: &CanvasOptions,
) -> CursorStyle {
    let locks = object.options().locks;
    if control.x() != 0.0 && locks.contains(Locks::SKEWING_Y) {
        return options.not_allowed_cursor;
    }
    if control.y() != 0.0 && locks.contains(Locks::SKEWING_X) {
        return options.not_allowed_cursor;
    }
    SKEW_MAP[find_corner_quadrant(object, control) % 4]
}

fn is_reversed(object: &InteractiveObject) -> bool {
    object.props().flip_x != object.props().flip_y
}

/// Sign correction for a skew computed from an unsigned pointer distance.
fn skew_sign(transform: &Transform, object: &InteractiveObject) -> f64 {
    let mut sign = 1.0;
    if (transform.origin_x == Origin::LEFT && transform.origin_y == Origin::BOTTOM)
        || (transform.origin_x == Origin::RIGHT && transform.origin_y == Origin::TOP)
    {
        sign = -sign;
    }
    if is_reversed(object) {
        sign = -sign;
    }
    sign
}

/// Restores the size along `vertical` (or horizontal) to `reference` after
/// a skew change, by adjusting the matching scale, when the other skew is
/// non-zero.
pub fn compensate_scale_for_skew(object: &mut InteractiveObject, vertical: bool, reference: f64) {
    let props = *object.props();
    let opposite_skew = if vertical { props.skew_y } else { props.skew_x };
    if opposite_skew == 0.0 {
        return;
    }
    let dim = object.transformed_dimensions(&DimensionOverrides::default());
    if vertical {
        object.set_scale_y(reference / dim.y * props.scale_y);
    } else {
        object.set_scale_x(reference / dim.x * props.scale_x);
    }
}

/// Sets `skew_x` so the grabbed top or bottom edge follows `pointer`.
pub fn skew_object_x(
    _input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    let target = &mut *ctx.target;
    let props = *target.props();
    let unskewed = target.transformed_dimensions(&DimensionOverrides {
        skew_x: Some(0.0),
        skew_y: Some(props.skew_y),
        ..DimensionOverrides::default()
    });
    let local = get_local_point(
        transform,
        target,
        transform.origin_x,
        transform.origin_y,
        pointer,
    );
    let travel = (local.x * 2.0).abs() - unskewed.x;
    let skew = if travel < MIN_SKEW_TRAVEL {
        0.0
    } else {
        skew_sign(transform, target)
            * radians_to_degrees((travel / props.scale_x).atan2(unskewed.y / props.scale_y))
    };
    if skew == props.skew_x {
        return false;
    }
    let reference = target
        .transformed_dimensions(&DimensionOverrides::default())
        .y;
    target.set_skew_x(skew);
    compensate_scale_for_skew(target, true, reference);
    true
}

/// Sets `skew_y` so the grabbed left or right edge follows `pointer`.
pub fn skew_object_y(
    _input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    let target = &mut *ctx.target;
    let props = *target.props();
    let unskewed = target.transformed_dimensions(&DimensionOverrides {
        skew_x: Some(props.skew_x),
        skew_y: Some(0.0),
        ..DimensionOverrides::default()
    });
    let local = get_local_point(
        transform,
        target,
        transform.origin_x,
        transform.origin_y,
        pointer,
    );
    let travel = (local.y * 2.0).abs() - unskewed.y;
    let skew = if travel < MIN_SKEW_TRAVEL {
        0.0
    } else {
        skew_sign(transform, target)
            * radians_to_degrees((travel / props.scale_y).atan2(unskewed.x / props.scale_x))
    };
    if skew == props.skew_y {
        return false;
    }
    let reference = target
        .transformed_dimensions(&DimensionOverrides::default())
        .x;
    target.set_skew_y(skew);
    compensate_scale_for_skew(target, false, reference);
    true
}

fn anchored_skew_x(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    with_fixed_anchor(skew_object_x, input, transform, ctx, pointer)
}

fn anchored_skew_y(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    with_fixed_anchor(skew_object_y, input, transform, ctx, pointer)
}

/// Skews horizontally from a top or bottom handle.
///
/// Picks the horizontal anchor first: from the pointer side when unskewed,
/// otherwise from the current skew direction and vertical anchor, so that
/// the edge opposite the handle stays put. Fires [`EventKind::Skewing`].
pub fn skew_handler_x(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    let target = &*ctx.target;
    if target.options().locks.contains(Locks::SKEWING_X) {
        return false;
    }
    let skew = target.props().skew_x;
    let origin_x = if skew == 0.0 {
        let from_center =
            get_local_point(transform, target, Origin::CENTER, Origin::CENTER, pointer);
        if from_center.x > 0.0 {
            Origin::LEFT
        } else {
            Origin::RIGHT
        }
    } else {
        let top = transform.origin_y == Origin::TOP;
        let origin = if (skew > 0.0) == top {
            Origin::LEFT
        } else {
            Origin::RIGHT
        };
        if is_reversed(target) {
            origin.opposite()
        } else {
            origin
        }
    };
    transform.origin_x = origin_x;
    with_fire_event(
        EventKind::Skewing,
        anchored_skew_x,
        input,
        transform,
        ctx,
        pointer,
    )
}

/// Skews vertically from a left or right handle; the vertical counterpart
/// of [`skew_handler_x`].
pub fn skew_handler_y(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    let target = &*ctx.target;
    if target.options().locks.contains(Locks::SKEWING_Y) {
        return false;
    }
    let skew = target.props().skew_y;
    let origin_y = if skew == 0.0 {
        let from_center =
            get_local_point(transform, target, Origin::CENTER, Origin::CENTER, pointer);
        if from_center.y > 0.0 {
            Origin::TOP
        } else {
            Origin::BOTTOM
        }
    } else {
        let left = transform.origin_x == Origin::LEFT;
        let origin = if (skew > 0.0) == left {
            Origin::TOP
        } else {
            Origin::BOTTOM
        };
        if is_reversed(target) {
            origin.opposite()
        } else {
            origin
        }
    };
    transform.origin_y = origin_y;
    with_fire_event(
        EventKind::Skewing,
        anchored_skew_y,
        input,
        transform,
        ctx,
        pointer,
    )
}
