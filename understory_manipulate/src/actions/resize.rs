// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use super::{ActionContext, get_local_point, with_fire_event, with_fixed_anchor};
use crate::event::EventKind;
use crate::input::PointerInput;
use crate::transform::Transform;

/// Changes the untransformed width so the grabbed side follows `pointer`,
/// without touching the scale. The outline is kept outside the new width.
pub fn change_width_unwrapped(
    _input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    let target = &mut *ctx.target;
    let local = get_local_point(
        transform,
        target,
        transform.origin_x,
        transform.origin_y,
        pointer,
    );
    let props = *target.props();
    let stroke_padding = props.stroke_width
        / if props.stroke_uniform {
            props.scale_x
        } else {
            1.0
        };
    let multiplier = if transform.is_centered() { 2.0 } else { 1.0 };
    let width = ((local.x * multiplier / props.scale_x).abs() - stroke_padding).max(0.0);
    target.set_width(width);
    target.props().width != props.width
}

fn anchored_change_width(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    with_fixed_anchor(change_width_unwrapped, input, transform, ctx, pointer)
}

/// Width handle of a fixed-height box: resizes about the anchor and fires
/// [`EventKind::Resizing`].
pub fn change_width(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    with_fire_event(
        EventKind::Resizing,
        anchored_change_width,
        input,
        transform,
        ctx,
        pointer,
    )
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::canvas::ObjectId;
    use crate::catalog::ControlCatalog;
    use crate::control::{ActionName, ControlKey};
    use crate::object::InteractiveObject;
    use crate::options::CanvasOptions;
    use crate::origin::Origin;
    use crate::props::{TransformProps, TransformSnapshot};

    #[test]
    fn width_follows_pointer_and_keeps_scale() {
        let mut props = TransformProps::new(0.0, 0.0, 100.0, 40.0);
        props.scale_x = 2.0;
        props.stroke_width = 4.0;
        let mut target = InteractiveObject::new(props).with_controls(ControlCatalog::textbox());
        let options = CanvasOptions::default();
        let mut events = Vec::new();
        let props = *target.props();
        let mut t = Transform {
            target: ObjectId::new(0, 1),
            action: ActionName::Resizing,
            corner: Some(ControlKey::MR),
            action_handler: change_width,
            original: TransformSnapshot::capture(&props, Origin::LEFT, Origin::CENTER),
            origin_x: Origin::LEFT,
            origin_y: Origin::CENTER,
            scale_x: props.scale_x,
            scale_y: props.scale_y,
            skew_x: 0.0,
            skew_y: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            ex: 0.0,
            ey: 0.0,
            last_x: 0.0,
            last_y: 0.0,
            theta: 0.0,
            sign_x: None,
            sign_y: None,
            gesture_scale: None,
            shift_key: false,
            alt_key: false,
            action_performed: false,
        };
        let input = PointerInput::mouse(Point::ORIGIN);
        let mut ctx = ActionContext::new(&mut target, &options, &mut events);
        assert!(change_width(&input, &mut t, &mut ctx, Point::new(308.0, 20.0)));
        assert_eq!(target.props().width, 150.0);
        assert_eq!(target.props().scale_x, 2.0);
        assert_eq!(target.props().left, 0.0);
        assert_eq!(events[0].kind, EventKind::Resizing);
    }
}
