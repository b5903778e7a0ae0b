// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pointer coordinator: object storage, selection and transform sessions.
//!
//! A [`Canvas`] owns its objects and a [`Viewport2D`]. Pointer input arrives
//! in view coordinates and is routed as follows:
//!
//! - **Down** finds the target (handles of the active object first), updates
//!   the selection and, on the active object, arms a [`Transform`] session
//!   and fires [`EventKind::BeforeTransform`].
//! - **Move** runs the session's action handler with the world-space pointer,
//!   or resolves the hover cursor and `MouseOver`/`MouseOut` when idle.
//! - **Up** refreshes the target's coordinates, fires [`EventKind::Modified`]
//!   if its properties differ from the gesture-start snapshot, runs the
//!   controls' mouse-up handlers and ends the session.
//!
//! Secondary and auxiliary buttons never start a session. Touches are
//! serialized onto the first finger down; other fingers are ignored until it
//! lifts.
//!
//! Notifications are queued and handed out by [`Canvas::take_events`]; paints
//! are coalesced in a [`RenderRequest`].

use alloc::vec::Vec;

use kurbo::{Affine, Point, Rect, Vec2};
use ui_events::keyboard::Modifiers;
use ui_events::pointer::{PointerButton, PointerEvent, PointerId};
use understory_affine::degrees_to_radians;
use understory_event_state::press::{PressState, Release};
use understory_event_state::touch::MainTouchState;
use understory_view2d::Viewport2D;

use crate::actions::{self, ActionContext, ActionHandler};
use crate::control::{ActionName, ControlKey};
use crate::cursor::CursorStyle;
use crate::event::{CanvasEvent, EventKind};
use crate::input::{PointerInput, PointerPhase};
use crate::object::InteractiveObject;
use crate::options::CanvasOptions;
use crate::origin::Origin;
use crate::props::{TransformProps, TransformSnapshot};
use crate::render::RenderRequest;
use crate::transform::Transform;

/// Handle of an object on a [`Canvas`].
///
/// A slot index plus a generation counter. Removing an object frees its slot;
/// reusing the slot bumps the generation, so stale handles never alias a
/// newer object. Use [`Canvas::is_alive`] to check a handle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObjectId(u32, u32);

impl ObjectId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }

    const fn generation(self) -> u32 {
        self.1
    }
}

/// Where the canvas is in a manipulation gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransformPhase {
    /// No gesture.
    #[default]
    Idle,
    /// A gesture was set up on pointer-down; no move has been handled yet.
    Armed,
    /// At least one move has been routed to the action handler.
    Active,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    object: Option<InteractiveObject>,
}

type PressTarget = (Option<ObjectId>, Option<ControlKey>);

fn slot_object(slots: &[Slot], id: ObjectId) -> Option<&InteractiveObject> {
    slots
        .get(id.idx())
        .filter(|slot| slot.generation == id.generation())
        .and_then(|slot| slot.object.as_ref())
}

fn slot_object_mut(slots: &mut [Slot], id: ObjectId) -> Option<&mut InteractiveObject> {
    slots
        .get_mut(id.idx())
        .filter(|slot| slot.generation == id.generation())
        .and_then(|slot| slot.object.as_mut())
}

fn is_hit(object: &InteractiveObject, point: Point) -> bool {
    let options = object.options();
    options.visible && options.evented && object.contains_point(point)
}

/// The anchor opposite `corner`, falling back to the object's own origin on
/// axes the control does not grab.
fn origin_from_corner(corner: Option<ControlKey>, props: &TransformProps) -> (Origin, Origin) {
    let mut origin_x = props.origin_x;
    let mut origin_y = props.origin_y;
    let Some(corner) = corner else {
        return (origin_x, origin_y);
    };
    if [ControlKey::ML, ControlKey::TL, ControlKey::BL].contains(&corner) {
        origin_x = Origin::RIGHT;
    } else if [ControlKey::MR, ControlKey::TR, ControlKey::BR].contains(&corner) {
        origin_x = Origin::LEFT;
    }
    if [ControlKey::TL, ControlKey::MT, ControlKey::TR].contains(&corner) {
        origin_y = Origin::BOTTOM;
    } else if [ControlKey::BL, ControlKey::MB, ControlKey::BR].contains(&corner) {
        origin_y = Origin::TOP;
    }
    (origin_x, origin_y)
}

/// A set of interactive objects under a viewport, driven by pointer input.
///
/// ## Example
///
/// ```
/// use kurbo::{Point, Rect};
/// use understory_manipulate::{
///     Canvas, EventKind, InteractiveObject, PointerInput, TransformProps,
/// };
///
/// let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 800.0, 600.0));
/// let id = canvas.add(InteractiveObject::new(TransformProps::new(0.0, 0.0, 100.0, 100.0)));
///
/// // Select with a click, then drag the bottom-right handle outwards.
/// canvas.on_pointer_down(&PointerInput::mouse(Point::new(50.0, 50.0)));
/// canvas.on_pointer_up(&PointerInput::mouse(Point::new(50.0, 50.0)));
/// canvas.on_pointer_down(&PointerInput::mouse(Point::new(100.0, 100.0)));
/// canvas.on_pointer_move(&PointerInput::mouse(Point::new(200.0, 200.0)));
/// canvas.on_pointer_up(&PointerInput::mouse(Point::new(200.0, 200.0)));
///
/// let props = canvas.get(id).unwrap().props();
/// assert!((props.scale_x - 2.0).abs() < 1e-9);
/// assert!(canvas.take_events().iter().any(|e| e.kind == EventKind::Modified));
/// ```
#[derive(Debug)]
pub struct Canvas {
    options: CanvasOptions,
    viewport: Viewport2D,
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<ObjectId>,
    active: Option<ObjectId>,
    hovered: Option<ObjectId>,
    transform: Option<Transform>,
    phase: TransformPhase,
    cursor: CursorStyle,
    main_touch: MainTouchState<PointerId>,
    press: PressState<PressTarget>,
    events: Vec<CanvasEvent>,
    render: RenderRequest,
}

impl Canvas {
    /// An empty canvas over `view_rect` with default options.
    #[must_use]
    pub fn new(view_rect: Rect) -> Self {
        Self::with_options(view_rect, CanvasOptions::default())
    }

    /// An empty canvas over `view_rect`.
    #[must_use]
    pub fn with_options(view_rect: Rect, options: CanvasOptions) -> Self {
        Self {
            cursor: options.default_cursor,
            press: PressState::new(options.click_tolerance),
            options,
            viewport: Viewport2D::new(view_rect),
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
            active: None,
            hovered: None,
            transform: None,
            phase: TransformPhase::Idle,
            main_touch: MainTouchState::new(),
            events: Vec::new(),
            render: RenderRequest::new(),
        }
    }

    /// Canvas-wide settings.
    #[must_use]
    pub fn options(&self) -> &CanvasOptions {
        &self.options
    }

    /// Mutable canvas-wide settings.
    pub fn options_mut(&mut self) -> &mut CanvasOptions {
        &mut self.options
    }

    // --- storage ---

    /// Adds `object` on top of the stack.
    ///
    /// The object takes the canvas viewport and its coordinates are computed.
    pub fn add(&mut self, mut object: InteractiveObject) -> ObjectId {
        object.set_viewport_transform(self.viewport.transform());
        object.set_coords(false);
        let id = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.object = Some(object);
            ObjectId::new(idx, slot.generation)
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "more than u32::MAX live slots is not supported"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                object: Some(object),
            });
            ObjectId::new(idx, 1)
        };
        self.order.push(id);
        self.render.request_render_all();
        id
    }

    /// Removes an object, returning it.
    ///
    /// Removing the active object clears the selection. A gesture on the
    /// object is left in place; later moves are ignored and the next
    /// pointer-up ends it.
    pub fn remove(&mut self, id: ObjectId) -> Option<InteractiveObject> {
        let slot = self
            .slots
            .get_mut(id.idx())
            .filter(|slot| slot.generation == id.generation())?;
        let object = slot.object.take()?;
        self.free.push(id.0);
        self.order.retain(|other| *other != id);
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if self.active == Some(id) {
            self.active = None;
            self.events.push(CanvasEvent {
                previous: Some(id),
                ..CanvasEvent::new(EventKind::SelectionCleared)
            });
        }
        self.render.request_render_all();
        Some(object)
    }

    /// Whether `id` refers to an object still on the canvas.
    #[must_use]
    pub fn is_alive(&self, id: ObjectId) -> bool {
        slot_object(&self.slots, id).is_some()
    }

    /// The object behind `id`.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&InteractiveObject> {
        slot_object(&self.slots, id)
    }

    /// Mutable access to the object behind `id`.
    ///
    /// Call [`InteractiveObject::set_coords`] after changing geometry so hit
    /// testing sees the change.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut InteractiveObject> {
        slot_object_mut(&mut self.slots, id)
    }

    /// Objects from bottom to top.
    pub fn objects(&self) -> impl DoubleEndedIterator<Item = (ObjectId, &InteractiveObject)> {
        self.order
            .iter()
            .filter_map(|id| slot_object(&self.slots, *id).map(|object| (*id, object)))
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the canvas has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Visible objects with some part inside the visible world rectangle,
    /// bottom to top.
    pub fn objects_on_screen(&self) -> impl Iterator<Item = ObjectId> + '_ {
        let visible = self.viewport.visible_world_rect();
        self.objects()
            .filter(move |(_, object)| {
                object.options().visible && object.is_on_screen(visible, false)
            })
            .map(|(id, _)| id)
    }

    // --- viewport ---

    /// The viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport2D {
        &self.viewport
    }

    /// Replaces the world → view transform and refreshes every object's
    /// coordinates. A non-invertible transform is rejected.
    pub fn set_viewport_transform(&mut self, transform: Affine) -> bool {
        let applied = self.viewport.set_transform(transform);
        self.viewport_changed(applied)
    }

    /// Zooms so that `anchor` (view space) keeps showing the same world point.
    pub fn zoom_to_point(&mut self, anchor: Point, zoom: f64) -> bool {
        let applied = self.viewport.zoom_to_point(anchor, zoom);
        self.viewport_changed(applied)
    }

    /// Zooms about the view origin.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        let applied = self.viewport.set_zoom(zoom);
        self.viewport_changed(applied)
    }

    /// Pans so that the world origin lands at `-offset` in view space.
    pub fn absolute_pan(&mut self, offset: Point) -> bool {
        let applied = self.viewport.absolute_pan(offset);
        self.viewport_changed(applied)
    }

    /// Pans by `delta` in view space.
    pub fn relative_pan(&mut self, delta: Vec2) -> bool {
        let applied = self.viewport.relative_pan(delta);
        self.viewport_changed(applied)
    }

    fn viewport_changed(&mut self, applied: bool) -> bool {
        if !applied {
            tracing::warn!("ignoring viewport change that is not invertible");
            return false;
        }
        let vpt = self.viewport.transform();
        for object in self.slots.iter_mut().filter_map(|slot| slot.object.as_mut()) {
            object.set_viewport_transform(vpt);
            object.set_coords(false);
        }
        self.render.request_render_all();
        true
    }

    // --- selection ---

    /// The active object.
    #[must_use]
    pub fn active_object(&self) -> Option<ObjectId> {
        self.active
    }

    /// The object under the pointer when idle.
    #[must_use]
    pub fn hovered_object(&self) -> Option<ObjectId> {
        self.hovered
    }

    /// Makes `id` the active object.
    ///
    /// Fires `SelectionCreated`, or `SelectionUpdated` when another object
    /// was active. A gesture on the previous object is ended. Returns `false`
    /// for stale handles, unselectable objects and the already active object.
    pub fn set_active_object(&mut self, id: ObjectId) -> bool {
        if self.active == Some(id) {
            return false;
        }
        let Some(object) = slot_object_mut(&mut self.slots, id) else {
            tracing::warn!("cannot activate missing object {id:?}");
            return false;
        };
        if !object.options().selectable {
            tracing::debug!("object {id:?} is not selectable");
            return false;
        }
        object.set_coords(false);
        let previous = self.active;
        if previous.is_some() && self.transform.map(|t| t.target) == previous {
            self.end_current_transform();
        }
        self.active = Some(id);
        let kind = if previous.is_some() {
            EventKind::SelectionUpdated
        } else {
            EventKind::SelectionCreated
        };
        self.events.push(CanvasEvent {
            target: Some(id),
            previous,
            ..CanvasEvent::new(kind)
        });
        self.render.request_render_all();
        true
    }

    /// Clears the selection, ending any gesture on the active object.
    ///
    /// Fires `SelectionCleared`. Returns `false` if nothing was active.
    pub fn discard_active_object(&mut self) -> bool {
        let Some(previous) = self.active else {
            return false;
        };
        if self.transform.map(|t| t.target) == Some(previous) {
            self.end_current_transform();
        }
        self.active = None;
        self.events.push(CanvasEvent {
            previous: Some(previous),
            ..CanvasEvent::new(EventKind::SelectionCleared)
        });
        self.render.request_render_all();
        true
    }

    /// The object at `point` (view space).
    ///
    /// The active object wins when one of its handles is under the point, and
    /// when its body is, unless
    /// [`preserve_object_stacking`](CanvasOptions::preserve_object_stacking)
    /// is set. Otherwise the topmost visible, evented object containing the
    /// point is returned.
    #[must_use]
    pub fn find_target(&self, point: Point, for_touch: bool) -> Option<ObjectId> {
        if let Some(id) = self.active
            && let Some(object) = slot_object(&self.slots, id)
        {
            if object.find_target_corner(point, for_touch, true).is_some() {
                return Some(id);
            }
            if !self.options.preserve_object_stacking && is_hit(object, point) {
                return Some(id);
            }
        }
        self.order
            .iter()
            .rev()
            .copied()
            .find(|id| slot_object(&self.slots, *id).is_some_and(|object| is_hit(object, point)))
    }

    fn find_corner(&self, id: ObjectId, point: Point, for_touch: bool) -> Option<ControlKey> {
        slot_object(&self.slots, id)?.find_target_corner(point, for_touch, self.active == Some(id))
    }

    // --- session ---

    /// The gesture in progress.
    #[must_use]
    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    /// The gesture phase.
    #[must_use]
    pub fn phase(&self) -> TransformPhase {
        self.phase
    }

    /// The cursor to show.
    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    /// Ends the gesture in progress as if the pointer was released: the
    /// target's coordinates are refreshed and `Modified` fires if it changed.
    ///
    /// Returns `false` if there was no gesture.
    pub fn end_current_transform(&mut self) -> bool {
        self.finalize_current_transform(None, None).is_some()
    }

    fn finalize_current_transform(
        &mut self,
        input: Option<&PointerInput>,
        pointer: Option<Point>,
    ) -> Option<Transform> {
        let transform = self.transform.take()?;
        self.phase = TransformPhase::Idle;
        match slot_object_mut(&mut self.slots, transform.target) {
            Some(target) => {
                target.set_coords(false);
                if transform.original.differs_from(target.props()) {
                    self.events.push(CanvasEvent {
                        target: Some(transform.target),
                        transform: Some(transform),
                        input: input.copied(),
                        pointer,
                        ..CanvasEvent::new(EventKind::Modified)
                    });
                }
            }
            None => tracing::warn!(
                "object {:?} was removed before its gesture ended",
                transform.target
            ),
        }
        Some(transform)
    }

    fn should_center_transform(
        &self,
        object: &InteractiveObject,
        action: ActionName,
        alt_key: bool,
    ) -> bool {
        let centered = if action.is_scaling() {
            self.options.centered_scaling || object.options().centered_scaling
        } else if action == ActionName::Rotate {
            self.options.centered_rotation || object.options().centered_rotation
        } else {
            false
        };
        centered != alt_key
    }

    fn setup_current_transform(
        &mut self,
        id: ObjectId,
        corner: Option<ControlKey>,
        already_selected: bool,
        input: &PointerInput,
        pointer: Point,
    ) {
        let Some(object) = slot_object(&self.slots, id) else {
            return;
        };
        let control = corner.and_then(|key| object.control(key));
        let (action, action_handler) = match control {
            Some(control) if already_selected => (
                control.resolve_action_name(input, object, &self.options),
                control.action_handler(),
            ),
            _ => (ActionName::Drag, actions::drag_handler as ActionHandler),
        };
        let props = *object.props();
        let (mut origin_x, mut origin_y) = origin_from_corner(corner, &props);
        let original = TransformSnapshot::capture(&props, origin_x, origin_y);
        let alt_key = input.is_pressed(self.options.centered_key);
        if self.should_center_transform(object, action, alt_key) {
            origin_x = Origin::CENTER;
            origin_y = Origin::CENTER;
        }
        let transform = Transform {
            target: id,
            action,
            corner,
            action_handler,
            original,
            origin_x,
            origin_y,
            scale_x: props.scale_x,
            scale_y: props.scale_y,
            skew_x: props.skew_x,
            skew_y: props.skew_y,
            offset_x: pointer.x - props.left,
            offset_y: pointer.y - props.top,
            ex: pointer.x,
            ey: pointer.y,
            last_x: pointer.x,
            last_y: pointer.y,
            theta: degrees_to_radians(props.angle),
            sign_x: None,
            sign_y: None,
            gesture_scale: None,
            shift_key: input.modifiers.contains(Modifiers::SHIFT),
            alt_key,
            action_performed: false,
        };
        self.transform = Some(transform);
        self.phase = TransformPhase::Armed;
        self.events.push(CanvasEvent {
            target: Some(id),
            transform: Some(transform),
            input: Some(*input),
            pointer: Some(pointer),
            ..CanvasEvent::new(EventKind::BeforeTransform)
        });
    }

    /// Runs `handler` against the target of `transform`. `None` when the
    /// target is gone.
    fn invoke(
        &mut self,
        handler: ActionHandler,
        input: &PointerInput,
        transform: &mut Transform,
        pointer: Point,
    ) -> Option<bool> {
        let target = slot_object_mut(&mut self.slots, transform.target)?;
        let mut ctx = ActionContext::new(target, &self.options, &mut self.events);
        Some(handler(input, transform, &mut ctx, pointer))
    }

    fn pointer_event(
        &self,
        kind: EventKind,
        target: Option<ObjectId>,
        input: &PointerInput,
        pointer: Point,
    ) -> CanvasEvent {
        CanvasEvent {
            target,
            transform: self.transform,
            input: Some(*input),
            pointer: Some(pointer),
            ..CanvasEvent::new(kind)
        }
    }

    /// Whether `input` belongs to the pointer that drives gestures.
    fn is_main_event(&mut self, phase: PointerPhase, input: &PointerInput) -> bool {
        if !input.is_touch() {
            return true;
        }
        let Some(id) = input.pointer_id else {
            return true;
        };
        match phase {
            PointerPhase::Down => self.main_touch.on_down(id),
            PointerPhase::Move => self.main_touch.is_main(&id),
            PointerPhase::Up => self.main_touch.on_up(&id),
        }
    }

    /// Handles secondary and auxiliary buttons, returning `true` if `input`
    /// was one of them.
    fn bypass_button(&mut self, kind: EventKind, input: &PointerInput) -> bool {
        let notify = match input.button {
            Some(PointerButton::Secondary) => self.options.fire_right_click,
            Some(PointerButton::Auxiliary) => self.options.fire_middle_click,
            _ => return false,
        };
        if notify {
            let target = self.find_target(input.position, input.is_touch());
            let pointer = self.viewport.view_to_world_point(input.position);
            let event = CanvasEvent {
                transform: None,
                ..self.pointer_event(kind, target, input, pointer)
            };
            self.events.push(event);
        }
        true
    }

    fn set_cursor_from_event(&mut self, input: &PointerInput, target: Option<ObjectId>) {
        let Some(object) = target.and_then(|id| slot_object(&self.slots, id)) else {
            self.cursor = self.options.default_cursor;
            return;
        };
        let is_active = target == self.active;
        let control = object
            .find_target_corner(input.position, input.is_touch(), is_active)
            .and_then(|key| object.control(key));
        self.cursor = match control {
            Some(control) => control.cursor_style(input, object, &self.options),
            None => object
                .options()
                .hover_cursor
                .unwrap_or(self.options.hover_cursor),
        };
    }

    fn fire_over_out(&mut self, target: Option<ObjectId>, input: &PointerInput, pointer: Point) {
        if self.hovered == target {
            return;
        }
        let previous = core::mem::replace(&mut self.hovered, target);
        if let Some(old) = previous {
            let event = self.pointer_event(EventKind::MouseOut, Some(old), input, pointer);
            self.events.push(event);
        }
        if let Some(new) = target {
            let event = CanvasEvent {
                previous,
                ..self.pointer_event(EventKind::MouseOver, Some(new), input, pointer)
            };
            self.events.push(event);
        }
    }

    // --- pointer input ---

    /// Routes a `ui-events` pointer event. Returns `false` for event kinds the
    /// canvas does not handle.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> bool {
        let Some((phase, input)) = PointerInput::from_event(event) else {
            return false;
        };
        match phase {
            PointerPhase::Down => self.on_pointer_down(&input),
            PointerPhase::Move => self.on_pointer_move(&input),
            PointerPhase::Up => self.on_pointer_up(&input),
        }
        true
    }

    /// A button was pressed or a touch started.
    pub fn on_pointer_down(&mut self, input: &PointerInput) {
        if self.bypass_button(EventKind::MouseDown, input) {
            return;
        }
        if !self.is_main_event(PointerPhase::Down, input) {
            tracing::debug!("ignoring secondary touch {:?}", input.pointer_id);
            return;
        }
        if self.transform.is_some() {
            return;
        }
        let view = input.position;
        let pointer = self.viewport.view_to_world_point(view);
        let for_touch = input.is_touch();
        let target = self.find_target(view, for_touch);

        let clear_selection = match target.and_then(|id| self.get(id)) {
            None => true,
            Some(object) => {
                let other_active = self.active.is_some() && self.active != target;
                !object.options().evented || (!object.options().selectable && other_active)
            }
        };
        if clear_selection {
            self.discard_active_object();
        }

        let mut corner = None;
        if let Some(id) = target {
            let already_selected = self.active == Some(id);
            self.set_active_object(id);
            if self.active == Some(id) {
                corner = self.find_corner(id, view, for_touch);
                self.setup_current_transform(id, corner, already_selected, input, pointer);
                let handler = corner
                    .and_then(|key| self.get(id)?.control(key)?.mouse_down_handler());
                if let (Some(handler), Some(mut transform)) = (handler, self.transform) {
                    self.invoke(handler, input, &mut transform, pointer);
                    self.transform = Some(transform);
                }
            }
        }

        self.press = PressState::new(self.options.click_tolerance);
        self.press.on_down((target, corner), view);
        let event = self.pointer_event(EventKind::MouseDown, target, input, pointer);
        self.events.push(event);
        self.render.request_render_all();
    }

    /// The pointer moved.
    pub fn on_pointer_move(&mut self, input: &PointerInput) {
        if !self.is_main_event(PointerPhase::Move, input) {
            return;
        }
        let view = input.position;
        let pointer = self.viewport.view_to_world_point(view);
        self.press.on_move(view);

        let target = if let Some(mut transform) = self.transform {
            transform.shift_key = input.modifiers.contains(Modifiers::SHIFT);
            transform.alt_key = input.is_pressed(self.options.centered_key);
            match self.invoke(transform.action_handler, input, &mut transform, pointer) {
                Some(performed) => {
                    if performed && transform.action == ActionName::Drag {
                        self.cursor = self
                            .get(transform.target)
                            .and_then(|object| object.options().move_cursor)
                            .unwrap_or(self.options.move_cursor);
                    }
                    transform.action_performed |= performed;
                    transform.last_x = pointer.x;
                    transform.last_y = pointer.y;
                    self.phase = TransformPhase::Active;
                    if transform.action_performed {
                        self.render.request_render_all();
                    }
                }
                None => tracing::warn!(
                    "ignoring move: object {:?} is no longer on the canvas",
                    transform.target
                ),
            }
            self.transform = Some(transform);
            Some(transform.target)
        } else {
            let target = self.find_target(view, input.is_touch());
            self.set_cursor_from_event(input, target);
            self.fire_over_out(target, input, pointer);
            target
        };

        let event = self.pointer_event(EventKind::MouseMove, target, input, pointer);
        self.events.push(event);
    }

    /// A button was released or a touch ended.
    pub fn on_pointer_up(&mut self, input: &PointerInput) {
        if self.bypass_button(EventKind::MouseUp, input) {
            return;
        }
        if !self.is_main_event(PointerPhase::Up, input) {
            tracing::debug!("ignoring secondary touch release {:?}", input.pointer_id);
            return;
        }
        let view = input.position;
        let pointer = self.viewport.view_to_world_point(view);
        let for_touch = input.is_touch();

        let transform = self.finalize_current_transform(Some(input), Some(pointer));
        let target = match transform {
            Some(t) => self.is_alive(t.target).then_some(t.target),
            None => self.find_target(view, for_touch),
        };
        let corner = target.and_then(|id| self.find_corner(id, view, for_touch));

        if let Some(mut t) = transform {
            let handler = target
                .zip(corner)
                .and_then(|(id, key)| self.get(id)?.control(key)?.mouse_up_handler());
            if let Some(handler) = handler {
                self.invoke(handler, input, &mut t, pointer);
            }
        }

        let release = self.press.on_up(Some(&(target, corner)));
        let is_click = match release {
            Release::Same { is_click } | Release::Elsewhere { is_click, .. } => is_click,
            Release::Untracked => false,
        };
        if let (Some(mut t), Release::Elsewhere { original, .. }) = (transform, release)
            && let (Some(id), Some(key)) = original
        {
            let handler = self.get(id).and_then(|o| o.control(key)?.mouse_up_handler());
            if let Some(handler) = handler {
                self.invoke(handler, input, &mut t, pointer);
            }
        }

        self.set_cursor_from_event(input, target);
        let event = CanvasEvent {
            transform,
            is_click,
            ..self.pointer_event(EventKind::MouseUp, target, input, pointer)
        };
        self.events.push(event);
        if transform.is_some_and(|t| t.action_performed) {
            self.render.request_render_all();
        }
    }

    /// Scales the gesture target by a pinch factor relative to the gesture
    /// start, about its center.
    ///
    /// Only acts while a gesture is in progress. The session continues as a
    /// drag from the pinch position, whatever handle it started on. Returns
    /// whether the object changed.
    pub fn on_gesture_scale(&mut self, input: &PointerInput, scale: f64) -> bool {
        if !(scale.is_finite() && scale > 0.0) {
            tracing::warn!("ignoring pinch factor {scale}");
            return false;
        }
        let Some(mut transform) = self.transform else {
            tracing::debug!("ignoring pinch without a gesture in progress");
            return false;
        };
        let pointer = self.viewport.view_to_world_point(input.position);
        let (origin_x, origin_y) = (transform.origin_x, transform.origin_y);
        transform.action = ActionName::Scale;
        transform.origin_x = Origin::CENTER;
        transform.origin_y = Origin::CENTER;
        transform.gesture_scale = Some(scale);
        let changed = self
            .invoke(actions::scaling_equally, input, &mut transform, pointer)
            .unwrap_or_else(|| {
                tracing::warn!("ignoring pinch: object {:?} is gone", transform.target);
                false
            });
        transform.action = ActionName::Drag;
        transform.action_handler = actions::drag_handler;
        transform.origin_x = origin_x;
        transform.origin_y = origin_y;
        transform.gesture_scale = None;
        transform.action_performed |= changed;
        if let Some(object) = slot_object(&self.slots, transform.target) {
            transform.offset_x = pointer.x - object.props().left;
            transform.offset_y = pointer.y - object.props().top;
        }
        self.transform = Some(transform);
        if changed {
            self.render.request_render_all();
        }
        changed
    }

    // --- output ---

    /// Takes the queued notifications.
    pub fn take_events(&mut self) -> Vec<CanvasEvent> {
        core::mem::take(&mut self.events)
    }

    /// Drains the queued notifications.
    pub fn drain_events(&mut self) -> impl Iterator<Item = CanvasEvent> + '_ {
        self.events.drain(..)
    }

    /// Schedules a paint.
    pub fn request_render_all(&mut self) {
        self.render.request_render_all();
    }

    /// Consumes the pending paint, returning whether there was one.
    pub fn take_render_request(&mut self) -> bool {
        self.render.take_render_request()
    }

    /// Records a synchronous paint.
    pub fn render_now(&mut self) {
        self.render.render_now();
    }

    /// Paint bookkeeping.
    #[must_use]
    pub fn render_request(&self) -> &RenderRequest {
        &self.render
    }
}
