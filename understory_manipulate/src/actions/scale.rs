// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use super::{
    ActionContext, find_corner_quadrant, get_local_point, is_alt_action, skew_cursor_style_handler,
    skew_handler_x, skew_handler_y, with_fire_event, with_fixed_anchor,
};
use crate::control::{ActionName, Control};
use crate::cursor::{CursorStyle, SCALE_MAP};
use crate::event::EventKind;
use crate::input::PointerInput;
use crate::object::{DimensionOverrides, InteractiveObject};
use crate::options::CanvasOptions;
use crate::props::Locks;
use crate::transform::Transform;

/// Which axes a scaling gesture may change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScaleBy {
    /// Both axes, uniformly when proportional.
    #[default]
    Both,
    /// Only `scale_x`.
    X,
    /// Only `scale_y`.
    Y,
}

impl ScaleBy {
    /// The axis constraint implied by a control's position: side handles
    /// scale along one axis, corners along both.
    #[must_use]
    pub fn from_control(control: &Control) -> Self {
        if control.x() != 0.0 && control.y() == 0.0 {
            Self::X
        } else if control.x() == 0.0 && control.y() != 0.0 {
            Self::Y
        } else {
            Self::Both
        }
    }
}

/// Whether corner scaling keeps the aspect ratio: the canvas setting,
/// inverted while the uniform-scaling key is held.
#[must_use]
pub fn scale_is_proportional(input: &PointerInput, options: &CanvasOptions) -> bool {
    options.uniform_scaling != input.is_pressed(options.uni_scale_key)
}

/// Whether locks or a degenerate size rule out scaling along `by`.
#[must_use]
pub fn scaling_is_forbidden(object: &InteractiveObject, by: ScaleBy, proportional: bool) -> bool {
    let locks = object.options().locks;
    let lock_x = locks.contains(Locks::SCALING_X);
    let lock_y = locks.contains(Locks::SCALING_Y);
    if lock_x && lock_y {
        return true;
    }
    if by == ScaleBy::Both && (lock_x || lock_y) && proportional {
        return true;
    }
    if (lock_x && by == ScaleBy::X) || (lock_y && by == ScaleBy::Y) {
        return true;
    }
    let props = object.props();
    if props.width == 0.0 && props.stroke_width == 0.0 && by != ScaleBy::Y {
        return true;
    }
    props.height == 0.0 && props.stroke_width == 0.0 && by != ScaleBy::X
}

/// Directional resize cursor for a scaling handle, or the not-allowed cursor
/// when scaling is forbidden.
pub fn scale_cursor_style_handler(
    input: &PointerInput,
    control: &Control,
    object: &InteractiveObject,
    options: &CanvasOptions,
) -> CursorStyle {
    let proportional = scale_is_proportional(input, options);
    if scaling_is_forbidden(object, ScaleBy::from_control(control), proportional) {
        return options.not_allowed_cursor;
    }
    SCALE_MAP[find_corner_quadrant(object, control)]
}

/// Skew cursor while the alternate action key is held, scale cursor
/// otherwise.
pub fn scale_skew_cursor_style_handler(
    input: &PointerInput,
    control: &Control,
    object: &InteractiveObject,
    options: &CanvasOptions,
) -> CursorStyle {
    if is_alt_action(input, options) {
        skew_cursor_style_handler(input, control, object, options)
    } else {
        scale_cursor_style_handler(input, control, object, options)
    }
}

/// The action a side handle performs: skewing along the side while the
/// alternate action key is held, scaling across it otherwise.
pub fn scale_or_skew_action_name(
    input: &PointerInput,
    control: &Control,
    _object: &InteractiveObject,
    options: &CanvasOptions,
) -> ActionName {
    let alternative = is_alt_action(input, options);
    if control.x() == 0.0 {
        if alternative {
            ActionName::SkewX
        } else {
            ActionName::ScaleY
        }
    } else if control.y() == 0.0 {
        if alternative {
            ActionName::SkewY
        } else {
            ActionName::ScaleX
        }
    } else {
        control.action_name()
    }
}

fn side_of(value: f64, known: Option<f64>) -> f64 {
    if value != 0.0 {
        value.signum()
    } else {
        known.unwrap_or(1.0)
    }
}

/// Scales the target so the grabbed handle follows `pointer`.
///
/// The pointer is projected into the object frame relative to the gesture
/// anchor. Proportional scaling compares the pointer's Manhattan distance
/// from the anchor with the box's extent at gesture start; per-axis scaling
/// divides each coordinate by the current size. Centered gestures double the
/// result. Crossing the anchor mirrors the object and moves the anchor to
/// the opposite side, unless [`Locks::SCALING_FLIP`] is set.
///
/// With [`Transform::gesture_scale`] set, the pointer is ignored and the
/// gesture-start scales are multiplied by the pinch factor.
pub fn scale_object(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
    by: ScaleBy,
) -> bool {
    let proportional = scale_is_proportional(input, ctx.options);
    if scaling_is_forbidden(ctx.target, by, proportional) {
        return false;
    }
    let (scale_x, scale_y) = match transform.gesture_scale {
        Some(factor) => (transform.scale_x * factor, transform.scale_y * factor),
        None => {
            let local = get_local_point(
                transform,
                ctx.target,
                transform.origin_x,
                transform.origin_y,
                pointer,
            );
            let sign_x = if by == ScaleBy::Y {
                1.0
            } else {
                side_of(local.x, transform.sign_x)
            };
            let sign_y = if by == ScaleBy::X {
                1.0
            } else {
                side_of(local.y, transform.sign_y)
            };
            let known_x = *transform.sign_x.get_or_insert(sign_x);
            let known_y = *transform.sign_y.get_or_insert(sign_y);
            let locks = ctx.target.options().locks;
            if locks.contains(Locks::SCALING_FLIP) && (known_x != sign_x || known_y != sign_y) {
                return false;
            }

            let dim = ctx
                .target
                .transformed_dimensions(&DimensionOverrides::default());
            let props = ctx.target.props();
            let (mut scale_x, mut scale_y) = if proportional && by == ScaleBy::Both {
                let distance = local.x.abs() + local.y.abs();
                let original = &transform.original;
                let original_distance = (dim.x * original.scale_x / props.scale_x).abs()
                    + (dim.y * original.scale_y / props.scale_y).abs();
                let scale = distance / original_distance;
                (original.scale_x * scale, original.scale_y * scale)
            } else {
                (
                    (local.x * props.scale_x / dim.x).abs(),
                    (local.y * props.scale_y / dim.y).abs(),
                )
            };
            if transform.is_centered() {
                scale_x *= 2.0;
                scale_y *= 2.0;
            }
            if known_x != sign_x && by != ScaleBy::Y {
                transform.origin_x = transform.origin_x.opposite();
                scale_x = -scale_x;
                transform.sign_x = Some(sign_x);
            }
            if known_y != sign_y && by != ScaleBy::X {
                transform.origin_y = transform.origin_y.opposite();
                scale_y = -scale_y;
                transform.sign_y = Some(sign_y);
            }
            (scale_x, scale_y)
        }
    };

    let before = *ctx.target.props();
    let locks = ctx.target.options().locks;
    match by {
        ScaleBy::Both => {
            if !locks.contains(Locks::SCALING_X) {
                ctx.target.set_scale_x(scale_x);
            }
            if !locks.contains(Locks::SCALING_Y) {
                ctx.target.set_scale_y(scale_y);
            }
        }
        ScaleBy::X => {
            ctx.target.set_scale_x(scale_x);
        }
        ScaleBy::Y => {
            ctx.target.set_scale_y(scale_y);
        }
    }
    let after = ctx.target.props();
    before.scale_x != after.scale_x
        || before.scale_y != after.scale_y
        || before.flip_x != after.flip_x
        || before.flip_y != after.flip_y
}

/// [`scale_object`] on both axes.
pub fn scale_object_from_corner(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    scale_object(input, transform, ctx, pointer, ScaleBy::Both)
}

/// [`scale_object`] on the horizontal axis.
pub fn scale_object_x(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    scale_object(input, transform, ctx, pointer, ScaleBy::X)
}

/// [`scale_object`] on the vertical axis.
pub fn scale_object_y(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    scale_object(input, transform, ctx, pointer, ScaleBy::Y)
}

fn anchored_scale_from_corner(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    with_fixed_anchor(scale_object_from_corner, input, transform, ctx, pointer)
}

fn anchored_scale_x(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    with_fixed_anchor(scale_object_x, input, transform, ctx, pointer)
}

fn anchored_scale_y(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    with_fixed_anchor(scale_object_y, input, transform, ctx, pointer)
}

/// Corner handle: scales both axes about the anchor and fires
/// [`EventKind::Scaling`].
pub fn scaling_equally(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    with_fire_event(
        EventKind::Scaling,
        anchored_scale_from_corner,
        input,
        transform,
        ctx,
        pointer,
    )
}

/// Scales horizontally about the anchor and fires [`EventKind::Scaling`].
pub fn scaling_x(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    with_fire_event(
        EventKind::Scaling,
        anchored_scale_x,
        input,
        transform,
        ctx,
        pointer,
    )
}

/// Scales vertically about the anchor and fires [`EventKind::Scaling`].
pub fn scaling_y(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    with_fire_event(
        EventKind::Scaling,
        anchored_scale_y,
        input,
        transform,
        ctx,
        pointer,
    )
}

/// Left/right handle: [`skew_handler_y`] while the alternate action key is
/// held, [`scaling_x`] otherwise.
pub fn scaling_x_or_skewing_y(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    if is_alt_action(input, ctx.options) {
        skew_handler_y(input, transform, ctx, pointer)
    } else {
        scaling_x(input, transform, ctx, pointer)
    }
}

/// Top/bottom handle: [`skew_handler_x`] while the alternate action key is
/// held, [`scaling_y`] otherwise.
pub fn scaling_y_or_skewing_x(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    if is_alt_action(input, ctx.options) {
        skew_handler_x(input, transform, ctx, pointer)
    } else {
        scaling_y(input, transform, ctx, pointer)
    }
}
