// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view2d --heading-base-level=0

//! Understory View 2D: a 2D viewport with an arbitrary affine transform.
//!
//! This crate provides a small, headless model of a world‑space view where
//! the view extents are expressed in device pixels. It focuses on:
//! - Viewport state: an invertible world → view affine (pan, zoom, and any
//!   rotation or skew a host wants to apply).
//! - Coordinate conversion between world and view/device (pixel) space.
//! - Zooming about an anchor, absolute and relative panning.
//!
//! It does **not** own any scene graph or rendering backend. Callers are
//! expected to:
//! - Maintain their own scene and recompute cached screen‑space geometry
//!   whenever the viewport changes.
//! - Wire input events (for example, from `ui-events`) into pan/zoom
//!   operations at a higher layer.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use understory_view2d::Viewport2D;
//!
//! // Device/view rect: 800x600 window.
//! let mut view = Viewport2D::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//!
//! // Zoom in around the pointer, then scroll a little.
//! let pointer = Point::new(400.0, 300.0);
//! let under_pointer = view.view_to_world_point(pointer);
//! view.zoom_to_point(pointer, 2.0);
//! assert!((view.view_to_world_point(pointer) - under_pointer).hypot() < 1e-9);
//!
//! view.relative_pan(Vec2::new(-50.0, 0.0));
//! assert_eq!(view.zoom(), 2.0);
//! ```
//!
//! ## Design notes
//!
//! - The transform must stay invertible: [`Viewport2D::set_transform`]
//!   refuses singular matrices and reports it, leaving the previous state.
//! - [`Viewport2D::zoom`] reads the horizontal scale coefficient, which is
//!   the zoom for the pan+zoom transforms hosts normally install.
//!
//! This crate is `no_std`.

#![no_std]

mod viewport2d;

pub use viewport2d::{Viewport2D, Viewport2DDebugInfo};
