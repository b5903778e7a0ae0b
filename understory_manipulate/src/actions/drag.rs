// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use super::ActionContext;
use crate::event::EventKind;
use crate::input::PointerInput;
use crate::props::Locks;
use crate::transform::Transform;

/// Moves the target so the grab point follows `pointer`, honoring the
/// movement locks per axis. Fires [`EventKind::Moving`] when either axis
/// moved.
pub fn drag_handler(
    input: &PointerInput,
    transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    pointer: Point,
) -> bool {
    let left = pointer.x - transform.offset_x;
    let top = pointer.y - transform.offset_y;
    let locks = ctx.target.options().locks;
    let props = ctx.target.props();
    let move_x = !locks.contains(Locks::MOVEMENT_X) && props.left != left;
    let move_y = !locks.contains(Locks::MOVEMENT_Y) && props.top != top;
    if move_x {
        ctx.target.set_left(left);
    }
    if move_y {
        ctx.target.set_top(top);
    }
    let moved = move_x || move_y;
    if moved {
        ctx.fire(EventKind::Moving, input, transform, pointer);
    }
    moved
}
