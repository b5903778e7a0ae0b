// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end pointer gestures on a canvas.
//!
//! Every scenario starts from a 100×100 box with its top-left corner at the
//! world origin, under an identity viewport unless stated otherwise.

use kurbo::{Point, Rect};
use ui_events::keyboard::Modifiers;
use ui_events::pointer::{PointerButton, PointerId};
use understory_manipulate::actions::ActionContext;
use understory_manipulate::{
    ActionName, Canvas, CanvasEvent, ControlCatalog, ControlKey, EventKind, InteractiveObject,
    Locks, ObjectId, Origin, PointerInput, Transform, TransformPhase, TransformProps,
};

const EPS: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

fn close_points(a: Point, b: Point) -> bool {
    (a - b).hypot() < EPS
}

fn mouse(x: f64, y: f64) -> PointerInput {
    PointerInput::mouse(Point::new(x, y))
}

fn square() -> InteractiveObject {
    InteractiveObject::new(TransformProps::new(0.0, 0.0, 100.0, 100.0))
}

fn canvas_with(object: InteractiveObject) -> (Canvas, ObjectId) {
    let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    let id = canvas.add(object);
    (canvas, id)
}

/// A canvas holding one selected object, with the selection event drained.
fn selected(object: InteractiveObject) -> (Canvas, ObjectId) {
    let (mut canvas, id) = canvas_with(object);
    assert!(canvas.set_active_object(id));
    canvas.take_events();
    (canvas, id)
}

fn gesture(canvas: &mut Canvas, from: PointerInput, to: PointerInput) -> Vec<CanvasEvent> {
    canvas.on_pointer_down(&from);
    canvas.on_pointer_move(&to);
    canvas.on_pointer_up(&to);
    canvas.take_events()
}

fn count(events: &[CanvasEvent], kind: EventKind) -> usize {
    events.iter().filter(|e| e.kind == kind).count()
}

#[test]
fn bottom_right_corner_scales_uniformly() {
    let (mut canvas, id) = selected(square());
    let events = gesture(&mut canvas, mouse(100.0, 100.0), mouse(200.0, 200.0));
    let props = canvas.get(id).unwrap().props();
    assert!(close(props.scale_x, 2.0));
    assert!(close(props.scale_y, 2.0));
    assert!(close(props.left, 0.0));
    assert!(close(props.top, 0.0));
    let before = events
        .iter()
        .find(|e| e.kind == EventKind::BeforeTransform)
        .and_then(|e| e.transform)
        .unwrap();
    assert_eq!(before.action, ActionName::Scale);
    assert_eq!(before.corner, Some(ControlKey::BR));
    assert_eq!((before.origin_x, before.origin_y), (Origin::LEFT, Origin::TOP));
    assert_eq!(count(&events, EventKind::Scaling), 1);
    assert_eq!(count(&events, EventKind::Modified), 1);
}

#[test]
fn right_side_scales_one_axis() {
    let (mut canvas, id) = selected(square());
    let events = gesture(&mut canvas, mouse(100.0, 50.0), mouse(50.0, 50.0));
    let props = canvas.get(id).unwrap().props();
    assert!(close(props.scale_x, 0.5));
    assert_eq!(props.scale_y, 1.0);
    assert_eq!(props.height, 100.0);
    assert!(close(props.left, 0.0));
    let before = events[0].transform.unwrap();
    assert_eq!(before.action, ActionName::ScaleX);
}

#[test]
fn rotation_handle_turns_about_center() {
    let (mut canvas, id) = selected(square());
    let events = gesture(&mut canvas, mouse(50.0, -40.0), mouse(140.0, 50.0));
    let object = canvas.get(id).unwrap();
    assert!(close(object.props().angle, 90.0));
    assert!(close_points(object.center_point(), Point::new(50.0, 50.0)));
    assert_eq!(count(&events, EventKind::Rotating), 1);
    let before = events[0].transform.unwrap();
    assert_eq!(before.action, ActionName::Rotate);
    assert!(before.is_centered());
}

#[test]
fn rotation_snaps_near_multiples() {
    let mut object = square();
    object.options_mut().snap_angle = 15.0;
    object.options_mut().snap_threshold = Some(5.0);
    let (mut canvas, id) = selected(object);
    // The handle sits 90 above the center, i.e. at -90 degrees.
    let on_circle = |deg: f64| {
        let r = (deg - 90.0).to_radians();
        PointerInput::mouse(Point::new(50.0 + 90.0 * r.cos(), 50.0 + 90.0 * r.sin()))
    };
    canvas.on_pointer_down(&mouse(50.0, -40.0));
    canvas.on_pointer_move(&on_circle(13.0));
    assert!(close(canvas.get(id).unwrap().props().angle, 15.0));
    canvas.on_pointer_move(&on_circle(8.0));
    assert!(close(canvas.get(id).unwrap().props().angle, 0.0));
    canvas.on_pointer_up(&on_circle(8.0));
}

#[test]
fn horizontal_movement_lock_moves_only_top() {
    let mut object = square();
    object.options_mut().locks = Locks::MOVEMENT_X;
    let (mut canvas, id) = selected(object);
    let events = gesture(&mut canvas, mouse(50.0, 50.0), mouse(80.0, 90.0));
    let props = canvas.get(id).unwrap().props();
    assert_eq!(props.left, 0.0);
    assert_eq!(props.top, 40.0);
    assert_eq!(count(&events, EventKind::Moving), 1);
}

#[test]
fn corner_resize_keeps_opposite_corner_of_rotated_box() {
    let mut object = square();
    object.set_angle(30.0);
    let (mut canvas, id) = selected(object);
    let object = canvas.get(id).unwrap();
    let handle = object.control_coords(ControlKey::TL).unwrap().position;
    let anchor = object.position_by_origin(Origin::RIGHT, Origin::BOTTOM);
    let to = handle + kurbo::Vec2::new(-20.0, -30.0);
    gesture(
        &mut canvas,
        PointerInput::mouse(handle),
        PointerInput::mouse(to),
    );
    let object = canvas.get(id).unwrap();
    assert!(object.props().scale_x > 1.0);
    assert!(close_points(
        object.position_by_origin(Origin::RIGHT, Origin::BOTTOM),
        anchor
    ));
}

#[test]
fn click_without_change_is_not_modified() {
    let (mut canvas, id) = selected(square());
    canvas.on_pointer_down(&mouse(50.0, 50.0));
    canvas.on_pointer_up(&mouse(50.0, 50.0));
    let events = canvas.take_events();
    assert_eq!(count(&events, EventKind::Modified), 0);
    let up = events.iter().find(|e| e.kind == EventKind::MouseUp).unwrap();
    assert!(up.is_click);
    assert_eq!(up.target, Some(id));
    assert_eq!(canvas.phase(), TransformPhase::Idle);

    let events = gesture(&mut canvas, mouse(50.0, 50.0), mouse(60.0, 50.0));
    assert_eq!(count(&events, EventKind::Modified), 1);
    assert!(!events.last().unwrap().is_click);
}

#[test]
fn right_click_never_starts_a_gesture() {
    let (mut canvas, id) = canvas_with(square());
    let right = mouse(50.0, 50.0).with_button(Some(PointerButton::Secondary));
    canvas.on_pointer_down(&right);
    canvas.on_pointer_up(&right);
    assert!(canvas.take_events().is_empty());
    assert!(canvas.transform().is_none());
    assert_eq!(canvas.active_object(), None);

    canvas.options_mut().fire_right_click = true;
    canvas.on_pointer_down(&right);
    let events = canvas.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::MouseDown);
    assert_eq!(events[0].target, Some(id));
    assert_eq!(canvas.phase(), TransformPhase::Idle);
    assert_eq!(canvas.active_object(), None);
}

#[test]
fn middle_click_is_silent_by_default() {
    let (mut canvas, _) = canvas_with(square());
    let middle = mouse(50.0, 50.0).with_button(Some(PointerButton::Auxiliary));
    canvas.on_pointer_down(&middle);
    assert!(canvas.take_events().is_empty());
    canvas.options_mut().fire_middle_click = true;
    canvas.on_pointer_up(&middle);
    assert_eq!(canvas.take_events()[0].kind, EventKind::MouseUp);
}

#[test]
fn only_the_first_touch_drives_the_gesture() {
    let (mut canvas, id) = canvas_with(square());
    let first = |x, y| PointerInput::touch(Point::new(x, y), PointerId::new(2));
    let second = |x, y| PointerInput::touch(Point::new(x, y), PointerId::new(3));

    canvas.on_pointer_down(&first(50.0, 50.0));
    canvas.take_events();
    canvas.on_pointer_down(&second(60.0, 60.0));
    canvas.on_pointer_move(&second(90.0, 90.0));
    assert!(canvas.take_events().is_empty());
    assert_eq!(canvas.get(id).unwrap().props().left, 0.0);

    canvas.on_pointer_move(&first(70.0, 50.0));
    assert_eq!(canvas.get(id).unwrap().props().left, 20.0);
    canvas.on_pointer_up(&second(90.0, 90.0));
    assert!(canvas.transform().is_some());
    canvas.on_pointer_up(&first(70.0, 50.0));
    assert!(canvas.transform().is_none());
}

fn count_release(
    _input: &PointerInput,
    _transform: &mut Transform,
    ctx: &mut ActionContext<'_>,
    _pointer: Point,
) -> bool {
    let releases = ctx.target.props().stroke_width;
    ctx.target.set_stroke_width(releases + 1.0)
}

#[test]
fn release_reaches_the_pressed_handle_once() {
    let catalog = ControlCatalog::object();
    let br = catalog
        .get(ControlKey::BR)
        .unwrap()
        .with_mouse_up_handler(count_release);
    let mut object = square().with_controls(catalog.with(ControlKey::BR, br));
    object.options_mut().locks = Locks::SCALING_X | Locks::SCALING_Y;
    let (mut canvas, id) = selected(object);

    // Released over the handle itself.
    gesture(&mut canvas, mouse(100.0, 100.0), mouse(100.0, 100.0));
    assert_eq!(canvas.get(id).unwrap().props().stroke_width, 1.0);

    // Released far away from it.
    gesture(&mut canvas, mouse(100.0, 100.0), mouse(300.0, 300.0));
    assert_eq!(canvas.get(id).unwrap().props().stroke_width, 2.0);
}

#[test]
fn removing_the_target_mid_gesture_is_harmless() {
    let (mut canvas, id) = selected(square());
    canvas.on_pointer_down(&mouse(50.0, 50.0));
    assert!(canvas.remove(id).is_some());
    canvas.on_pointer_move(&mouse(80.0, 80.0));
    canvas.on_pointer_up(&mouse(80.0, 80.0));
    let events = canvas.take_events();
    assert_eq!(count(&events, EventKind::Moving), 0);
    assert_eq!(count(&events, EventKind::Modified), 0);
    assert_eq!(count(&events, EventKind::SelectionCleared), 1);
    assert_eq!(events.last().unwrap().kind, EventKind::MouseUp);
    assert_eq!(canvas.phase(), TransformPhase::Idle);
    assert!(canvas.transform().is_none());
}

#[test]
fn drags_are_measured_in_world_space() {
    let (mut canvas, id) = selected(square());
    assert!(canvas.set_zoom(2.0));
    gesture(&mut canvas, mouse(100.0, 100.0), mouse(140.0, 100.0));
    let props = canvas.get(id).unwrap().props();
    assert_eq!((props.left, props.top), (20.0, 0.0));
}

#[test]
fn alternate_key_turns_side_handles_into_skew() {
    let (mut canvas, id) = selected(square());
    let shift = |x, y| mouse(x, y).with_modifiers(Modifiers::SHIFT);
    let events = gesture(&mut canvas, shift(50.0, 100.0), shift(100.0, 100.0));
    assert_eq!(events[0].transform.unwrap().action, ActionName::SkewX);
    assert!(close(canvas.get(id).unwrap().props().skew_x, 45.0));
    assert_eq!(count(&events, EventKind::Skewing), 1);
}

#[test]
fn textbox_sides_change_width() {
    let object = square().with_controls(ControlCatalog::textbox());
    let (mut canvas, id) = selected(object);
    let events = gesture(&mut canvas, mouse(100.0, 50.0), mouse(150.0, 50.0));
    let props = canvas.get(id).unwrap().props();
    assert!(close(props.width, 150.0));
    assert_eq!(props.scale_x, 1.0);
    assert_eq!(events[0].transform.unwrap().action, ActionName::Resizing);
    assert_eq!(count(&events, EventKind::Resizing), 1);
}
