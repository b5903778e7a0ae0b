// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;
use understory_affine::radians_to_degrees;

use super::{ActionContext, with_fire_event, with_fixed_anchor};
use crate::control::Control;
use crate::cursor::CursorStyle;
use crate::event::EventKind;
use crate::input::PointerInput;
use crate::object::InteractiveObject;
use crate::options::CanvasOptions;
use crate::props::Locks;
use crate::transform::Transform;

/// Snaps `angle` to a multiple of `snap_angle` when one lies within
/// `threshold`, preferring the nearer multiple. Angles near no multiple fall
/// back to the multiple below.
fn snap(angle: f64, snap_angle: f64, threshold: f64) -> f64 {
    let below = (angle / snap_angle).floor() * snap_angle;
    let above = (angle / snap_angle).ceil() * snap_angle;
    let (nearer, farther) = if angle - below <= above - angle {
        (below, above)
    } else {
        (above, below)
    };
    if (angle - nearer).abs() < threshold {
        nearer
    } else if (angle - farther).abs() < threshold {
        farther
    } else {
        below
    }
}

/// Rotates the target so the handle follows the pointer around the pivot.
///
/// The pivot is the gesture anchor; the new angle is the starting angle plus
/// the angle swept by the pointer since gesture start. With a positive
/// [`snap_angle`](crate::ObjectOptions::snap_angle) the result snaps to its
/// multiples. The angle is stored normalized to `[0, 360)`.
pub fn rotate_object_with_snapping(
    _input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    let target = &mut *ctx.target;
    if target.options().locks.contains(Locks::ROTATION) {
        return false;
    }
    let pivot = target.translate_to_origin_point(
        target.center_point(),
        transform.origin_x,
        transform.origin_y,
    );
    let start = (transform.ey - pivot.y).atan2(transform.ex - pivot.x);
    let current = (pointer.y - pivot.y).atan2(pointer.x - pivot.x);
    let mut angle = radians_to_degrees(current - start + transform.theta);

    let snap_angle = target.options().snap_angle;
    if snap_angle > 0.0 {
        let threshold = target
            .options()
            .snap_threshold
            .filter(|t| *t > 0.0)
            .unwrap_or(snap_angle);
        angle = snap(angle, snap_angle, threshold);
    }
    // `rem_euclid` rounds tiny negative angles up to exactly 360.
    let angle = match angle.rem_euclid(360.0) {
        a if a >= 360.0 => 0.0,
        a => a,
    };
    let changed = target.props().angle != angle;
    target.set_angle(angle);
    changed
}

fn anchored_rotation(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    with_fixed_anchor(rotate_object_with_snapping, input, transform, ctx, pointer)
}

/// Rotation handle: rotates about the anchor and fires
/// [`EventKind::Rotating`].
pub fn rotation_with_snapping(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    with_fire_event(
        EventKind::Rotating,
        anchored_rotation,
        input,
        transform,
        ctx,
        pointer,
    )
}

/// The control's cursor, or the not-allowed cursor when rotation is locked.
pub fn rotation_style_handler(
    _input: &PointerInput,
    control: &Control,
    object: &InteractiveObject,
    options: &CanvasOptions,
) -> CursorStyle {
    if object.options().locks.contains(Locks::ROTATION) {
        options.not_allowed_cursor
    } else {
        control.cursor()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::canvas::ObjectId;
    use crate::control::{ActionName, ControlKey};
    use crate::origin::Origin;
    use crate::props::{TransformProps, TransformSnapshot};

    #[test]
    fn snapping_rule() {
        assert_eq!(snap(13.0, 15.0, 5.0), 15.0);
        assert_eq!(snap(8.0, 15.0, 5.0), 0.0);
        assert_eq!(snap(17.0, 15.0, 5.0), 15.0);
        assert_eq!(snap(-13.0, 15.0, 5.0), -15.0);
        assert_eq!(snap(23.0, 15.0, 15.0), 30.0);
    }

    fn rotation(object: &InteractiveObject, start: Point) -> Transform {
        let props = *object.props();
        Transform {
            target: ObjectId::new(0, 1),
            action: ActionName::Rotate,
            corner: Some(ControlKey::MTR),
            action_handler: rotation_with_snapping,
            original: TransformSnapshot::capture(&props, Origin::CENTER, Origin::CENTER),
            origin_x: Origin::CENTER,
            origin_y: Origin::CENTER,
            scale_x: props.scale_x,
            scale_y: props.scale_y,
            skew_x: props.skew_x,
            skew_y: props.skew_y,
            offset_x: 0.0,
            offset_y: 0.0,
            ex: start.x,
            ey: start.y,
            last_x: start.x,
            last_y: start.y,
            theta: 0.0,
            sign_x: None,
            sign_y: None,
            gesture_scale: None,
            shift_key: false,
            alt_key: false,
            action_performed: false,
        }
    }

    #[test]
    fn quarter_turn_about_center() {
        let mut target = InteractiveObject::new(TransformProps::new(0.0, 0.0, 100.0, 100.0));
        let center = target.center_point();
        let options = CanvasOptions::default();
        let mut events = Vec::new();
        let mut t = rotation(&target, Point::new(50.0, -40.0));
        let input = PointerInput::mouse(Point::ORIGIN);
        let mut ctx = ActionContext::new(&mut target, &options, &mut events);
        assert!(rotation_with_snapping(&input, &mut t, &mut ctx, Point::new(140.0, 50.0)));
        assert!((target.props().angle - 90.0).abs() < 1e-9);
        assert!((target.center_point() - center).hypot() < 1e-9);
        assert_eq!(events[0].kind, EventKind::Rotating);
    }

    #[test]
    fn snapped_rotation() {
        let mut target = InteractiveObject::new(TransformProps::new(0.0, 0.0, 100.0, 100.0));
        target.options_mut().snap_angle = 15.0;
        target.options_mut().snap_threshold = Some(5.0);
        let options = CanvasOptions::default();
        let mut events = Vec::new();
        let mut t = rotation(&target, Point::new(150.0, 50.0));
        let input = PointerInput::mouse(Point::ORIGIN);
        let at = |deg: f64| {
            let r = deg.to_radians();
            Point::new(50.0 + 100.0 * r.cos(), 50.0 + 100.0 * r.sin())
        };
        let mut ctx = ActionContext::new(&mut target, &options, &mut events);
        assert!(rotation_with_snapping(&input, &mut t, &mut ctx, at(13.0)));
        assert!((ctx.target.props().angle - 15.0).abs() < 1e-9);
        rotation_with_snapping(&input, &mut t, &mut ctx, at(8.0));
        assert!(ctx.target.props().angle.abs() < 1e-9);
        rotation_with_snapping(&input, &mut t, &mut ctx, at(-13.0));
        assert!((ctx.target.props().angle - 345.0).abs() < 1e-9);
    }

    #[test]
    fn tiny_counter_clockwise_turn_stays_below_full_circle() {
        let mut target = InteractiveObject::new(TransformProps::new(0.0, 0.0, 100.0, 100.0));
        let options = CanvasOptions::default();
        let mut events = Vec::new();
        let mut t = rotation(&target, Point::new(50.0, -40.0));
        let input = PointerInput::mouse(Point::ORIGIN);
        let just_left = f64::from_bits(50.0_f64.to_bits() - 1);
        let mut ctx = ActionContext::new(&mut target, &options, &mut events);
        rotation_with_snapping(&input, &mut t, &mut ctx, Point::new(just_left, -40.0));
        let angle = target.props().angle;
        assert!((0.0..360.0).contains(&angle), "angle {angle} out of range");
    }

    #[test]
    fn zero_threshold_snaps_within_the_step() {
        let mut target = InteractiveObject::new(TransformProps::new(0.0, 0.0, 100.0, 100.0));
        target.options_mut().snap_angle = 15.0;
        target.options_mut().snap_threshold = Some(0.0);
        let options = CanvasOptions::default();
        let mut events = Vec::new();
        let mut t = rotation(&target, Point::new(150.0, 50.0));
        let input = PointerInput::mouse(Point::ORIGIN);
        let r = 8.0_f64.to_radians();
        let pointer = Point::new(50.0 + 100.0 * r.cos(), 50.0 + 100.0 * r.sin());
        let mut ctx = ActionContext::new(&mut target, &options, &mut events);
        rotation_with_snapping(&input, &mut t, &mut ctx, pointer);
        assert!(
            (target.props().angle - 15.0).abs() < 1e-9,
            "zero threshold falls back to the snap step"
        );
    }

    #[test]
    fn locked_rotation() {
        let mut target = InteractiveObject::new(TransformProps::new(0.0, 0.0, 100.0, 100.0));
        target.options_mut().locks = Locks::ROTATION;
        let options = CanvasOptions::default();
        let mut events = Vec::new();
        let mut t = rotation(&target, Point::new(50.0, -40.0));
        let input = PointerInput::mouse(Point::ORIGIN);
        let control = *target.control(ControlKey::MTR).unwrap();
        assert_eq!(
            rotation_style_handler(&input, &control, &target, &options),
            CursorStyle::NotAllowed
        );
        let mut ctx = ActionContext::new(&mut target, &options, &mut events);
        assert!(!rotation_with_snapping(&input, &mut t, &mut ctx, Point::new(140.0, 50.0)));
        assert_eq!(target.props().angle, 0.0);
    }
}
