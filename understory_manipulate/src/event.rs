// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications emitted by the canvas.

use kurbo::Point;

use crate::canvas::ObjectId;
use crate::input::PointerInput;
use crate::transform::Transform;

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A gesture was armed on an object.
    BeforeTransform,
    /// A drag moved the object.
    Moving,
    /// A scaling handle changed the scale.
    Scaling,
    /// The rotation handle changed the angle.
    Rotating,
    /// A skewing handle changed the skew.
    Skewing,
    /// A width handle changed the width.
    Resizing,
    /// A gesture ended with the object changed.
    Modified,
    /// An object became active with nothing active before.
    SelectionCreated,
    /// The active object changed to another object.
    SelectionUpdated,
    /// The active object was discarded.
    SelectionCleared,
    /// A button was pressed.
    MouseDown,
    /// The pointer moved.
    MouseMove,
    /// A button was released.
    MouseUp,
    /// The pointer entered an object.
    MouseOver,
    /// The pointer left an object.
    MouseOut,
}

impl EventKind {
    /// The conventional event name, such as `object:scaling`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BeforeTransform => "before:transform",
            Self::Moving => "object:moving",
            Self::Scaling => "object:scaling",
            Self::Rotating => "object:rotating",
            Self::Skewing => "object:skewing",
            Self::Resizing => "object:resizing",
            Self::Modified => "object:modified",
            Self::SelectionCreated => "selection:created",
            Self::SelectionUpdated => "selection:updated",
            Self::SelectionCleared => "selection:cleared",
            Self::MouseDown => "mouse:down",
            Self::MouseMove => "mouse:move",
            Self::MouseUp => "mouse:up",
            Self::MouseOver => "mouse:over",
            Self::MouseOut => "mouse:out",
        }
    }
}

/// A notification, queued by the canvas until drained.
#[derive(Clone, Copy, Debug)]
pub struct CanvasEvent {
    /// What happened.
    pub kind: EventKind,
    /// The object concerned, if any.
    pub target: Option<ObjectId>,
    /// The gesture in progress, as of this event.
    pub transform: Option<Transform>,
    /// The input that caused the event.
    pub input: Option<PointerInput>,
    /// Pointer position in world space.
    pub pointer: Option<Point>,
    /// The previously active object, for selection events.
    pub previous: Option<ObjectId>,
    /// For `MouseUp`: the press never moved beyond the click tolerance.
    pub is_click: bool,
}

impl CanvasEvent {
    /// An event of `kind` with no payload.
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            target: None,
            transform: None,
            input: None,
            pointer: None,
            previous: None,
            is_click: false,
        }
    }

    /// The conventional event name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}
