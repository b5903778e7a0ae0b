// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_manipulate --heading-base-level=0

//! Understory Manipulate: interactive move, scale, skew and rotate handles.
//!
//! This crate models the direct-manipulation layer of a 2D editor. Objects
//! carry affine transform properties (position, size, scale, skew, angle,
//! flips and an origin); a declarative set of handles sits on each object's
//! box; pointer gestures on those handles are turned into property changes.
//!
//! - [`InteractiveObject`]: transform properties plus cached corner and
//!   handle coordinates, and the geometry helpers handlers are written with.
//! - [`Control`] and [`ControlCatalog`]: immutable handle descriptors,
//!   shared between objects. [`OBJECT_CONTROLS`] is the standard set of
//!   eight resize handles and a rotation handle.
//! - [`actions`]: the handlers that run while a handle is dragged, composed
//!   from plain functions with [`actions::with_fixed_anchor`] and
//!   [`actions::with_fire_event`].
//! - [`Canvas`]: object storage, selection and the pointer-driven transform
//!   session, with a [`Viewport2D`](understory_view2d::Viewport2D) between
//!   pointer (view) space and object (world) space.
//!
//! It does **not** render anything. Hosts draw objects and handles from the
//! cached coordinates, feed pointer input to the canvas and react to the
//! queued [`CanvasEvent`]s.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_manipulate::{Canvas, EventKind, InteractiveObject, PointerInput, TransformProps};
//!
//! let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let id = canvas.add(InteractiveObject::new(TransformProps::new(0.0, 0.0, 100.0, 100.0)));
//!
//! // Press on the body to select and drag it.
//! canvas.on_pointer_down(&PointerInput::mouse(Point::new(50.0, 50.0)));
//! canvas.on_pointer_move(&PointerInput::mouse(Point::new(80.0, 60.0)));
//! canvas.on_pointer_up(&PointerInput::mouse(Point::new(80.0, 60.0)));
//!
//! let props = canvas.get(id).unwrap().props();
//! assert_eq!((props.left, props.top), (30.0, 10.0));
//!
//! let names: Vec<_> = canvas.take_events().iter().map(|e| e.name()).collect();
//! assert!(names.contains(&"object:moving"));
//! assert!(names.contains(&"object:modified"));
//! ```
//!
//! ## Coordinate spaces
//!
//! Transform properties live in world space. Pointer input and the cached
//! `line_coords`/`o_coords` live in view space; `a_coords` are world space.
//! Handle sizes and padding are in view pixels, so handles keep their size
//! under zoom.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod actions;
mod canvas;
mod catalog;
mod control;
mod cursor;
mod event;
mod input;
mod object;
mod options;
mod origin;
mod props;
mod render;
mod transform;

pub use canvas::{Canvas, ObjectId, TransformPhase};
pub use catalog::{ControlCatalog, OBJECT_CONTROLS, TEXTBOX_CONTROLS};
pub use control::{
    ActionName, ActionNameHandler, Control, ControlKey, CursorStyleHandler, PositionHandler,
    default_action_name, default_cursor_style, default_position_handler,
};
pub use cursor::CursorStyle;
pub use event::{CanvasEvent, EventKind};
pub use input::{PointerInput, PointerPhase};
pub use object::{ControlCoords, DimensionOverrides, InteractiveObject};
pub use options::{CanvasOptions, ObjectOptions};
pub use origin::{Origin, ParseOriginError};
pub use props::{Locks, TransformProps, TransformSnapshot};
pub use render::RenderRequest;
pub use transform::Transform;
